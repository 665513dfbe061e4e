// ==========================================
// 预制混凝土质量控制 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================
// InvalidState: 终态记录再次流转，属业务规则错误，不重试
// PermissionDenied: 编辑窗口已过，属常规情况，展示层渲染为"已锁定"
// ==========================================

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::domain::types::RecordState;

/// 生命周期错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LifecycleError {
    #[error("无效的状态转换: record_id={record_id}, 当前状态={state} 已是终态")]
    InvalidState { record_id: String, state: RecordState },

    #[error(
        "记录已锁定: record_id={record_id}, 起算时间={reference_at}, 编辑窗口={window_minutes}分钟"
    )]
    PermissionDenied {
        record_id: String,
        reference_at: NaiveDateTime,
        window_minutes: i64,
    },

    #[error("来源读数已见证: source_id={source_id}, record_id={record_id}")]
    DuplicateSource { source_id: String, record_id: String },

    #[error("记录未找到: record_id={record_id}")]
    NotFound { record_id: String },

    #[error("记录集锁获取失败: {0}")]
    LockPoisoned(String),
}

impl LifecycleError {
    /// 是否为"已锁定"（展示层禁用操作而非弹出异常）
    pub fn is_locked(&self) -> bool {
        matches!(self, LifecycleError::PermissionDenied { .. })
    }
}

/// Result 类型别名
pub type LifecycleResult<T> = Result<T, LifecycleError>;

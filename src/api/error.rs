// ==========================================
// 预制混凝土质量控制 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，转换引擎与配置错误为用户可读的错误消息
// ==========================================

use thiserror::Error;

use crate::config::error::ConfigError;
use crate::engine::error::LifecycleError;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    /// 编辑窗口已过，展示层渲染为禁用而非报错
    #[error("记录已锁定: {0}")]
    RecordLocked(String),

    #[error("无效的状态转换: record_id={record_id}, state={state}")]
    InvalidStateTransition { record_id: String, state: String },

    // ==========================================
    // 配置错误
    // ==========================================
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    pub fn is_locked(&self) -> bool {
        matches!(self, ApiError::RecordLocked(_))
    }
}

// ==========================================
// 从 LifecycleError 转换
// ==========================================
impl From<LifecycleError> for ApiError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidState { record_id, state } => ApiError::InvalidStateTransition {
                record_id,
                state: state.to_db_str().to_string(),
            },
            locked @ LifecycleError::PermissionDenied { .. } => {
                ApiError::RecordLocked(locked.to_string())
            }
            duplicate @ LifecycleError::DuplicateSource { .. } => {
                ApiError::InvalidInput(duplicate.to_string())
            }
            LifecycleError::NotFound { record_id } => {
                ApiError::NotFound(format!("record_id={}", record_id))
            }
            LifecycleError::LockPoisoned(msg) => ApiError::InternalError(msg),
        }
    }
}

/// API 结果类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RecordState;
    use chrono::NaiveDate;

    #[test]
    fn test_lifecycle_error_conversion() {
        let at = NaiveDate::from_ymd_opt(2026, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        let locked: ApiError = LifecycleError::PermissionDenied {
            record_id: "r1".to_string(),
            reference_at: at,
            window_minutes: 60,
        }
        .into();
        assert!(locked.is_locked());

        let invalid: ApiError = LifecycleError::InvalidState {
            record_id: "r1".to_string(),
            state: RecordState::Tested,
        }
        .into();
        assert!(matches!(
            invalid,
            ApiError::InvalidStateTransition { ref state, .. } if state == "TESTED"
        ));

        let missing: ApiError = LifecycleError::NotFound {
            record_id: "r2".to_string(),
        }
        .into();
        assert!(matches!(missing, ApiError::NotFound(_)));

        let duplicate: ApiError = LifecycleError::DuplicateSource {
            source_id: "SCADA-1".to_string(),
            record_id: "r3".to_string(),
        }
        .into();
        assert!(matches!(duplicate, ApiError::InvalidInput(ref msg) if msg.contains("SCADA-1")));
    }
}

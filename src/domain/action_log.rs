// ==========================================
// 预制混凝土质量控制 - 记录操作日志
// ==========================================
// 红线: 所有写入必须记录
// 用途: 审计追踪（谁在何时对哪条记录做了什么）
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::RecordState;

// ==========================================
// ActionLog - 操作日志
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionLog {
    pub record_id: String,
    pub action_type: ActionType,
    pub action_ts: NaiveDateTime,
    pub state_before: Option<RecordState>, // 新建时为 None
    pub state_after: Option<RecordState>,  // 删除后为 None
}

// ==========================================
// ActionType - 操作类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    Declare,      // 申报
    Transition,   // 检测完成
    RecordManual, // 人工录入
    Witness,      // 见证确认
    Modify,       // 修改
    Delete,       // 删除
}

impl ActionType {
    /// 转换为字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Declare => "DECLARE",
            ActionType::Transition => "TRANSITION",
            ActionType::RecordManual => "RECORD_MANUAL",
            ActionType::Witness => "WITNESS",
            ActionType::Modify => "MODIFY",
            ActionType::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

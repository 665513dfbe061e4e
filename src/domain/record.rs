// ==========================================
// 预制混凝土质量控制 - 生命周期记录
// ==========================================
// Record<P>: 各模块共享的两态实体，P 为模块负载
// 创建事件 + 可选终态事件，终态事件带独立时间戳
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::reading::{GroupKeys, Grouped};
use crate::domain::types::RecordState;

// ==========================================
// LifecyclePayload - 模块负载约束
// ==========================================
/// 记录负载
///
/// `Outcome` 为检测/见证时合并进记录的结果字段
pub trait LifecyclePayload: Clone {
    type Outcome;

    /// 合并检测结果
    fn merge_outcome(&mut self, outcome: Self::Outcome);

    /// 分组键（批次/等级/养护室/台座）
    fn group_keys(&self) -> &GroupKeys;
}

// ==========================================
// Record - 生命周期记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record<P> {
    pub id: String,
    pub payload: P,
    pub state: RecordState,
    pub created_at: NaiveDateTime,
    /// 进入终态的时间，未流转时为 None
    pub terminal_at: Option<NaiveDateTime>,
    /// 见证记录的来源读数 ID
    #[serde(default)]
    pub source_id: Option<String>,
}

impl<P> Record<P> {
    /// 编辑窗口的起算时间
    ///
    /// 初始态取 created_at，终态取 terminal_at
    pub fn reference_timestamp(&self) -> NaiveDateTime {
        match self.terminal_at {
            Some(ts) if self.state.is_terminal() => ts,
            _ => self.created_at,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

impl<P: LifecyclePayload> Grouped for Record<P> {
    fn group_keys(&self) -> &GroupKeys {
        self.payload.group_keys()
    }
}

// ==========================================
// RecordView - 带可编辑标记的展示视图
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordView<P> {
    #[serde(flatten)]
    pub record: Record<P>,
    pub can_modify: bool,
}

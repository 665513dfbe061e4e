// ==========================================
// 预制混凝土质量控制 - 领域类型定义
// ==========================================
// 判定等级 / 规格区间 / 记录状态 / 骨料分级
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 西格玛等级 (Sigma Band)
// ==========================================
// 顺序: Normal < Warning < Action < OutOfControl
// 边界归属: 恰好 1σ 为 Normal, 恰好 2σ 为 Warning, 恰好 3σ 为 Action
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SigmaBand {
    Normal,       // ≤1σ
    Warning,      // (1σ,2σ]
    Action,       // (2σ,3σ]
    OutOfControl, // >3σ
}

impl SigmaBand {
    /// 全部等级（按严重程度递增）
    pub const ALL: [SigmaBand; 4] = [
        SigmaBand::Normal,
        SigmaBand::Warning,
        SigmaBand::Action,
        SigmaBand::OutOfControl,
    ];

    /// 国际化键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            SigmaBand::Normal => "band.sigma.normal",
            SigmaBand::Warning => "band.sigma.warning",
            SigmaBand::Action => "band.sigma.action",
            SigmaBand::OutOfControl => "band.sigma.out_of_control",
        }
    }
}

impl fmt::Display for SigmaBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SigmaBand::Normal => write!(f, "NORMAL"),
            SigmaBand::Warning => write!(f, "WARNING"),
            SigmaBand::Action => write!(f, "ACTION"),
            SigmaBand::OutOfControl => write!(f, "OUT_OF_CONTROL"),
        }
    }
}

// ==========================================
// 规格区间判定 (Spec Band)
// ==========================================
// LSL ≤ value ≤ USL 为合格（两端闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecBand {
    WithinSpec, // 合格
    AboveUsl,   // 超上限
    BelowLsl,   // 低于下限
    Invalid,    // 非有限读数，按不合格计
}

impl SpecBand {
    pub fn is_within(&self) -> bool {
        matches!(self, SpecBand::WithinSpec)
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            SpecBand::WithinSpec => "band.spec.within_spec",
            SpecBand::AboveUsl => "band.spec.above_usl",
            SpecBand::BelowLsl => "band.spec.below_lsl",
            SpecBand::Invalid => "band.spec.invalid",
        }
    }
}

impl fmt::Display for SpecBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecBand::WithinSpec => write!(f, "WITHIN_SPEC"),
            SpecBand::AboveUsl => write!(f, "ABOVE_USL"),
            SpecBand::BelowLsl => write!(f, "BELOW_LSL"),
            SpecBand::Invalid => write!(f, "INVALID"),
        }
    }
}

// ==========================================
// 记录状态 (Record State)
// ==========================================
// Declared -> Tested 为常规流转
// Manual / Witnessed 为创建即终态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecordState {
    Declared,  // 已申报（待检测）
    Tested,    // 已检测
    Manual,    // 人工录入
    Witnessed, // 见证确认（来自 SCADA / 申报读数）
}

impl RecordState {
    /// 是否为终态
    pub fn is_terminal(&self) -> bool {
        !matches!(self, RecordState::Declared)
    }

    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_uppercase().as_str() {
            "DECLARED" => Some(RecordState::Declared),
            "TESTED" => Some(RecordState::Tested),
            "MANUAL" => Some(RecordState::Manual),
            "WITNESSED" => Some(RecordState::Witnessed),
            _ => None,
        }
    }

    pub fn to_db_str(&self) -> &'static str {
        match self {
            RecordState::Declared => "DECLARED",
            RecordState::Tested => "TESTED",
            RecordState::Manual => "MANUAL",
            RecordState::Witnessed => "WITNESSED",
        }
    }

    pub fn i18n_key(&self) -> &'static str {
        match self {
            RecordState::Declared => "record.state.declared",
            RecordState::Tested => "record.state.tested",
            RecordState::Manual => "record.state.manual",
            RecordState::Witnessed => "record.state.witnessed",
        }
    }
}

impl fmt::Display for RecordState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

// ==========================================
// 骨料分级 (Aggregate Fraction)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregateFraction {
    Ca1, // 粗骨料 1
    Ca2, // 粗骨料 2
    Fa,  // 细骨料
}

impl fmt::Display for AggregateFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AggregateFraction::Ca1 => write!(f, "CA1"),
            AggregateFraction::Ca2 => write!(f, "CA2"),
            AggregateFraction::Fa => write!(f, "FA"),
        }
    }
}

// ==========================================
// 预制混凝土质量控制 - 统计与判定结果
// ==========================================
// StatSummary / DeviationResult 均为派生值，按需重算，不做存储
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::{SigmaBand, SpecBand};

// ==========================================
// StatSummary - 描述统计
// ==========================================
// 不变量: std_dev ≥ 0; count > 0 时 min ≤ mean ≤ max
// count = 0 时所有字段为 0，调用方需先检查 count 再做除法
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatSummary {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// 总体标准差 (除以 n)
    pub std_dev: f64,
    pub median: f64,
    /// 变异系数 (%)，均值为 0 时取 0
    pub cv: f64,
}

impl StatSummary {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// 极差
    pub fn range(&self) -> f64 {
        self.max - self.min
    }
}

// ==========================================
// Band - 判定等级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "band", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Band {
    Sigma(SigmaBand),
    Spec(SpecBand),
}

impl Band {
    pub fn sigma(&self) -> Option<SigmaBand> {
        match self {
            Band::Sigma(b) => Some(*b),
            Band::Spec(_) => None,
        }
    }
}

// ==========================================
// DeviationResult - 单读数判定
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviationResult {
    pub value: f64,
    /// 相对设定值偏差 (%)，无设定值或设定值为 0 时取 0
    pub deviation_pct: f64,
    pub band: Band,
    /// |deviation_pct| > 容差 (仅设定值模式)
    pub outlier: bool,
}

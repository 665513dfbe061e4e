// ==========================================
// 预制混凝土质量控制 - 参考基准
// ==========================================
// 设定值模式: target + 容差百分比 (偏差分析 / 异常值)
// 规格限模式: LSL / USL (合格率分析)
// 两者可同时存在
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::SpecBand;

// ==========================================
// SetPoint - 设定值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SetPoint {
    pub target: f64,
    /// 容差，以百分比表示（3.0 = ±3%）
    pub tolerance_pct: f64,
}

impl SetPoint {
    pub fn new(target: f64, tolerance_pct: f64) -> Self {
        Self {
            target,
            tolerance_pct,
        }
    }

    /// 由小数形式的容差构造（0.03 = ±3%）
    pub fn from_fraction(target: f64, tolerance_fraction: f64) -> Self {
        Self::new(target, tolerance_fraction * 100.0)
    }
}

// ==========================================
// SpecLimits - 规格上下限
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpecLimits {
    pub lower: f64,
    pub upper: f64,
}

impl SpecLimits {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    /// 仅有下限（如立方体强度 ≥ 设计强度）
    pub fn at_least(lower: f64) -> Self {
        Self::new(lower, f64::INFINITY)
    }

    /// 仅有上限（如升温速率 ≤ 15°C/h）
    pub fn at_most(upper: f64) -> Self {
        Self::new(f64::NEG_INFINITY, upper)
    }

    /// 判定规格区间（两端闭区间），NaN / Infinity 判为无效
    pub fn classify(&self, value: f64) -> SpecBand {
        if !value.is_finite() {
            SpecBand::Invalid
        } else if value < self.lower {
            SpecBand::BelowLsl
        } else if value > self.upper {
            SpecBand::AboveUsl
        } else {
            SpecBand::WithinSpec
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        self.classify(value).is_within()
    }
}

// ==========================================
// ReferenceSpec - 参考基准组合
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReferenceSpec {
    #[serde(default)]
    pub set_point: Option<SetPoint>,
    #[serde(default)]
    pub limits: Option<SpecLimits>,
}

impl ReferenceSpec {
    pub fn set_point(target: f64, tolerance_pct: f64) -> Self {
        Self {
            set_point: Some(SetPoint::new(target, tolerance_pct)),
            limits: None,
        }
    }

    pub fn limits(lower: f64, upper: f64) -> Self {
        Self {
            set_point: None,
            limits: Some(SpecLimits::new(lower, upper)),
        }
    }

    pub fn with_limits(mut self, limits: SpecLimits) -> Self {
        self.limits = Some(limits);
        self
    }
}

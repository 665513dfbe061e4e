// ==========================================
// 预制混凝土质量控制 - 含水率配合比调整计算
// ==========================================
// 输入: 三种骨料 (CA1/CA2/FA) + 申报用水 + 水泥用量
// 输出: BatchMixSummary (表面水、调整用水、水灰比、骨灰比)
// ==========================================
// 红线: 采用重量向上取整（不得欠配），不可改为四舍五入或向下取整
// 红线: 纯函数，相同输入逐位相同输出
// ==========================================

use crate::domain::mix::{BatchMixSummary, ComponentMoisture, MixComponent, MixInput};
use crate::domain::types::AggregateFraction;
use crate::engine::statistics::{checked_ratio, safe_pct};

/// 默认水灰比上限
pub const DEFAULT_WC_RATIO_LIMIT: f64 = 0.40;

// ==========================================
// MixCalculator - 配合比调整计算器
// ==========================================
pub struct MixCalculator {
    wc_ratio_limit: f64,
}

impl MixCalculator {
    pub fn new(wc_ratio_limit: f64) -> Self {
        Self { wc_ratio_limit }
    }

    pub fn wc_ratio_limit(&self) -> f64 {
        self.wc_ratio_limit
    }

    /// 单组分派生值
    ///
    /// - 水分损失 = 湿样 - 干样，不小于 0
    /// - 含水率 = 损失 / 干样 * 100，干样为 0 时取 0
    /// - 表面含水率 = max(0, 含水率 - 吸水率)
    /// - 表面水 = 干重 * 表面含水率 / 100
    /// - 调整重量 = 干重 + 表面水，采用重量 = ceil(调整重量)
    pub fn component(&self, fraction: AggregateFraction, c: &MixComponent) -> ComponentMoisture {
        let moisture_loss_g = (c.wet_sample_weight - c.dried_sample_weight).max(0.0);
        let moisture_pct = safe_pct(moisture_loss_g, c.dried_sample_weight);
        let free_moisture_pct = (moisture_pct - c.absorption_pct).max(0.0);
        let free_moisture_kg = c.dry_weight * free_moisture_pct / 100.0;
        let adjusted_weight = c.dry_weight + free_moisture_kg;

        ComponentMoisture {
            fraction,
            dry_weight: c.dry_weight,
            moisture_loss_g,
            moisture_pct,
            free_moisture_pct,
            free_moisture_kg,
            adjusted_weight,
            adopted_weight: adjusted_weight.ceil(),
        }
    }

    /// 计算批次配合比调整
    pub fn compute(&self, input: &MixInput) -> BatchMixSummary {
        let ca1 = self.component(AggregateFraction::Ca1, &input.ca1);
        let ca2 = self.component(AggregateFraction::Ca2, &input.ca2);
        let fa = self.component(AggregateFraction::Fa, &input.fa);

        let total_free_moisture_kg =
            ca1.free_moisture_kg + ca2.free_moisture_kg + fa.free_moisture_kg;
        let adjusted_water = input.declared_water - total_free_moisture_kg;
        let total_dry_aggregate = input.ca1.dry_weight + input.ca2.dry_weight + input.fa.dry_weight;

        let water_cement_ratio = checked_ratio(adjusted_water, input.cement_weight);
        let aggregate_cement_ratio = checked_ratio(total_dry_aggregate, input.cement_weight);
        let wc_ratio_exceeded = water_cement_ratio
            .map(|ratio| ratio > self.wc_ratio_limit)
            .unwrap_or(false);

        if wc_ratio_exceeded {
            tracing::warn!(
                water_cement_ratio = ?water_cement_ratio,
                limit = self.wc_ratio_limit,
                "水灰比超限"
            );
        }

        BatchMixSummary {
            ca1,
            ca2,
            fa,
            total_free_moisture_kg,
            adjusted_water,
            water_cement_ratio,
            aggregate_cement_ratio,
            wc_ratio_limit: self.wc_ratio_limit,
            wc_ratio_exceeded,
        }
    }
}

impl Default for MixCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_WC_RATIO_LIMIT)
    }
}

/// 便捷函数，使用默认水灰比上限
pub fn compute_mix(input: &MixInput) -> BatchMixSummary {
    MixCalculator::default().compute(input)
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;

    fn sample_component() -> MixComponent {
        MixComponent {
            dry_weight: 436.2,
            wet_sample_weight: 120.0,
            dried_sample_weight: 100.0,
            absorption_pct: 0.5,
        }
    }

    #[test]
    fn test_component_worked_example() {
        let calc = MixCalculator::default();
        let c = calc.component(AggregateFraction::Ca1, &sample_component());

        assert_eq!(c.moisture_loss_g, 20.0);
        assert_eq!(c.moisture_pct, 20.0);
        assert_eq!(c.free_moisture_pct, 19.5);
        assert!((c.free_moisture_kg - 85.059).abs() < 1e-9);
        assert!((c.adjusted_weight - 521.259).abs() < 1e-9);
        assert_eq!(c.adopted_weight, 522.0);
    }

    #[test]
    fn test_dried_zero_resolves_to_zero() {
        let calc = MixCalculator::default();
        let c = calc.component(
            AggregateFraction::Fa,
            &MixComponent {
                dry_weight: 600.0,
                wet_sample_weight: 50.0,
                dried_sample_weight: 0.0,
                absorption_pct: 1.0,
            },
        );
        assert_eq!(c.moisture_pct, 0.0);
        assert_eq!(c.free_moisture_pct, 0.0);
        assert_eq!(c.free_moisture_kg, 0.0);
        assert_eq!(c.adopted_weight, 600.0);
    }

    #[test]
    fn test_dry_sample_heavier_than_wet_clamps_loss() {
        let calc = MixCalculator::default();
        let c = calc.component(
            AggregateFraction::Ca2,
            &MixComponent {
                dry_weight: 300.0,
                wet_sample_weight: 95.0,
                dried_sample_weight: 100.0,
                absorption_pct: 0.5,
            },
        );
        assert_eq!(c.moisture_loss_g, 0.0);
        assert_eq!(c.free_moisture_pct, 0.0);
    }

    #[test]
    fn test_absorption_above_moisture_gives_no_free_water() {
        let calc = MixCalculator::default();
        let c = calc.component(
            AggregateFraction::Fa,
            &MixComponent {
                dry_weight: 500.0,
                wet_sample_weight: 101.0,
                dried_sample_weight: 100.0,
                absorption_pct: 2.0,
            },
        );
        assert_eq!(c.moisture_pct, 1.0);
        assert_eq!(c.free_moisture_pct, 0.0);
    }

    #[test]
    fn test_zero_cement_leaves_ratios_undefined() {
        let summary = compute_mix(&MixInput {
            declared_water: 150.0,
            cement_weight: 0.0,
            ..MixInput::default()
        });
        assert_eq!(summary.water_cement_ratio, None);
        assert_eq!(summary.aggregate_cement_ratio, None);
        assert!(!summary.wc_ratio_exceeded);
    }

    #[test]
    fn test_wc_ratio_limit_flag() {
        let input = MixInput {
            declared_water: 170.0,
            cement_weight: 400.0,
            ..MixInput::default()
        };
        // 170 / 400 = 0.425
        assert!(compute_mix(&input).wc_ratio_exceeded);
        assert!(!MixCalculator::new(0.45).compute(&input).wc_ratio_exceeded);
    }
}

// ==========================================
// 预制混凝土质量控制 - 偏差与控制限判定引擎
// ==========================================
// 模式 (a) 设定值偏差: 偏差% + 西格玛分级 + 异常值 (|偏差%| > 容差)
// 模式 (b) 规格限: LSL ≤ value ≤ USL 闭区间，合格率
// 多参数过程（如蒸汽养护七项）: 每项独立判定，全部合格才算零异常
// ==========================================
// 红线: 西格玛分级与异常值判定相互独立，分别计算
// 红线: 零分母取 0，不抛错
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::quality::{Band, DeviationResult, StatSummary};
use crate::domain::reference::{ReferenceSpec, SpecLimits};
use crate::domain::types::{SigmaBand, SpecBand};
use crate::engine::statistics::{safe_pct, StatisticsEngine};

// ==========================================
// ControlChart - 控制图分区
// ==========================================
/// 以 centre 为中心、sigma 为单位的控制图分区
///
/// 边界归属低一级: 恰好 1σ 为 Normal，恰好 2σ 为 Warning，恰好 3σ 为 Action
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlChart {
    pub centre: f64,
    pub sigma: f64,
}

impl ControlChart {
    /// 固定的西格玛倍数
    pub const SIGMA_MULTIPLES: [f64; 3] = [1.0, 2.0, 3.0];

    pub fn new(centre: f64, sigma: f64) -> Self {
        Self {
            centre,
            sigma: sigma.abs(),
        }
    }

    /// 以批次均值为中心
    pub fn from_summary(summary: &StatSummary) -> Self {
        Self::new(summary.mean, summary.std_dev)
    }

    /// 以设定值为中心，离散度取批次标准差
    pub fn on_target(target: f64, summary: &StatSummary) -> Self {
        Self::new(target, summary.std_dev)
    }

    pub fn classify(&self, value: f64) -> SigmaBand {
        classify_distance((value - self.centre).abs(), self.sigma)
    }

    /// 第 k 倍西格玛对应的上下限
    pub fn zone_limits(&self, k: f64) -> SpecLimits {
        SpecLimits::new(self.centre - k * self.sigma, self.centre + k * self.sigma)
    }
}

/// 按 |value - centre| 与 k·σ 比较分级
pub fn classify_distance(distance: f64, sigma: f64) -> SigmaBand {
    let [one, two, three] = ControlChart::SIGMA_MULTIPLES;
    if distance <= one * sigma {
        SigmaBand::Normal
    } else if distance <= two * sigma {
        SigmaBand::Warning
    } else if distance <= three * sigma {
        SigmaBand::Action
    } else {
        SigmaBand::OutOfControl
    }
}

// ==========================================
// ParameterCheck - 多参数判定结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterOutcome<K> {
    pub parameter: K,
    pub value: f64,
    pub limits: SpecLimits,
    pub band: SpecBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterCheck<K> {
    pub outcomes: Vec<ParameterOutcome<K>>,
    pub failing_count: usize,
}

impl<K: Copy> ParameterCheck<K> {
    /// 全部参数合格
    pub fn is_zero_outlier(&self) -> bool {
        self.failing_count == 0
    }

    pub fn failing(&self) -> Vec<K> {
        self.outcomes
            .iter()
            .filter(|o| !o.band.is_within())
            .map(|o| o.parameter)
            .collect()
    }
}

// ==========================================
// DeviationClassifier - 偏差判定引擎
// ==========================================
pub struct DeviationClassifier {
    stats: StatisticsEngine,
}

impl DeviationClassifier {
    pub fn new() -> Self {
        Self {
            stats: StatisticsEngine::new(),
        }
    }

    // ==========================================
    // 模式 (a): 设定值偏差
    // ==========================================

    /// 偏差% = (value - target) / target * 100，target 为 0 时取 0
    pub fn deviation_pct(&self, value: f64, target: f64) -> f64 {
        safe_pct(value - target, target)
    }

    /// 按批次均值/标准差分级
    pub fn classify_sigma(&self, value: f64, summary: &StatSummary) -> SigmaBand {
        ControlChart::from_summary(summary).classify(value)
    }

    /// 异常值: |偏差%| > 容差%
    pub fn is_outlier(&self, deviation_pct: f64, tolerance_pct: f64) -> bool {
        deviation_pct.abs() > tolerance_pct
    }

    // ==========================================
    // 模式 (b): 规格限
    // ==========================================

    pub fn classify_spec(&self, value: f64, limits: &SpecLimits) -> SpecBand {
        limits.classify(value)
    }

    /// 合格率 (%)，空样本取 0
    pub fn pct_within_spec(&self, values: &[f64], limits: &SpecLimits) -> f64 {
        let within = values.iter().filter(|v| limits.contains(**v)).count();
        safe_pct(within as f64, values.len() as f64)
    }

    /// 多参数判定
    pub fn check_parameters<K, I>(&self, parameters: I) -> ParameterCheck<K>
    where
        K: Copy,
        I: IntoIterator<Item = (K, f64, SpecLimits)>,
    {
        let outcomes: Vec<ParameterOutcome<K>> = parameters
            .into_iter()
            .map(|(parameter, value, limits)| ParameterOutcome {
                parameter,
                value,
                limits,
                band: limits.classify(value),
            })
            .collect();
        let failing_count = outcomes.iter().filter(|o| !o.band.is_within()).count();

        ParameterCheck {
            outcomes,
            failing_count,
        }
    }

    // ==========================================
    // 综合判定
    // ==========================================

    /// 单读数判定，(value, spec, summary) 的纯函数
    ///
    /// - 配置了规格限: band 取规格区间判定
    /// - 否则: band 取以批次均值为中心的西格玛分级
    /// - 配置了设定值: 计算偏差% 与异常值标记
    pub fn evaluate(
        &self,
        value: f64,
        spec: &ReferenceSpec,
        summary: &StatSummary,
    ) -> DeviationResult {
        let (deviation_pct, outlier) = match spec.set_point {
            Some(sp) => {
                let dev = self.deviation_pct(value, sp.target);
                (dev, self.is_outlier(dev, sp.tolerance_pct))
            }
            None => (0.0, false),
        };

        let band = match spec.limits {
            Some(limits) => Band::Spec(self.classify_spec(value, &limits)),
            None => Band::Sigma(self.classify_sigma(value, summary)),
        };

        DeviationResult {
            value,
            deviation_pct,
            band,
            outlier,
        }
    }

    /// 整批判定（统计摘要只算一次）
    pub fn evaluate_all(
        &self,
        values: &[f64],
        spec: &ReferenceSpec,
    ) -> (StatSummary, Vec<DeviationResult>) {
        let summary = self.stats.summarize(values);
        let results = values
            .iter()
            .map(|v| self.evaluate(*v, spec, &summary))
            .collect();
        (summary, results)
    }
}

impl Default for DeviationClassifier {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::statistics::summarize;

    #[test]
    fn test_band_edges_belong_to_lower_band() {
        let chart = ControlChart::new(10.0, 2.0);
        assert_eq!(chart.classify(10.0), SigmaBand::Normal);
        assert_eq!(chart.classify(12.0), SigmaBand::Normal); // 恰好 1σ
        assert_eq!(chart.classify(12.5), SigmaBand::Warning);
        assert_eq!(chart.classify(14.0), SigmaBand::Warning); // 恰好 2σ
        assert_eq!(chart.classify(6.0), SigmaBand::Warning);
        assert_eq!(chart.classify(16.0), SigmaBand::Action); // 恰好 3σ
        assert_eq!(chart.classify(16.5), SigmaBand::OutOfControl);
        assert_eq!(chart.classify(3.5), SigmaBand::OutOfControl);
    }

    #[test]
    fn test_zero_sigma_only_centre_is_normal() {
        let chart = ControlChart::new(430.0, 0.0);
        assert_eq!(chart.classify(430.0), SigmaBand::Normal);
        assert_eq!(chart.classify(430.1), SigmaBand::OutOfControl);
    }

    #[test]
    fn test_zone_limits() {
        let chart = ControlChart::new(100.0, 5.0);
        assert_eq!(chart.zone_limits(2.0), SpecLimits::new(90.0, 110.0));
    }

    #[test]
    fn test_deviation_pct_zero_target_short_circuits() {
        let classifier = DeviationClassifier::new();
        assert_eq!(classifier.deviation_pct(12.0, 0.0), 0.0);
        assert_eq!(classifier.deviation_pct(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_outlier_is_strictly_greater_than_tolerance() {
        let classifier = DeviationClassifier::new();
        assert!(!classifier.is_outlier(3.0, 3.0));
        assert!(!classifier.is_outlier(-3.0, 3.0));
        assert!(classifier.is_outlier(3.01, 3.0));
        assert!(classifier.is_outlier(-3.01, 3.0));
    }

    #[test]
    fn test_outlier_independent_of_sigma_band() {
        let classifier = DeviationClassifier::new();
        // 全批整体偏离设定值 10%，但批内离散度很小
        let values = [473.0, 473.0, 473.0];
        let spec = ReferenceSpec::set_point(430.0, 3.0);
        let (summary, results) = classifier.evaluate_all(&values, &spec);
        assert_eq!(summary.std_dev, 0.0);
        for r in results {
            assert_eq!(r.band, Band::Sigma(SigmaBand::Normal));
            assert!(r.outlier);
        }
    }

    #[test]
    fn test_pct_within_spec_empty_is_zero() {
        let classifier = DeviationClassifier::new();
        assert_eq!(classifier.pct_within_spec(&[], &SpecLimits::new(0.0, 1.0)), 0.0);
    }

    #[test]
    fn test_evaluate_spec_mode() {
        let classifier = DeviationClassifier::new();
        let spec = ReferenceSpec::limits(8640.0, 9360.0);
        let summary = summarize(&[9400.0]);
        let r = classifier.evaluate(9400.0, &spec, &summary);
        assert_eq!(r.band, Band::Spec(SpecBand::AboveUsl));
        assert_eq!(r.deviation_pct, 0.0);
        assert!(!r.outlier);
    }

    #[test]
    fn test_check_parameters_counts_failures() {
        let classifier = DeviationClassifier::new();
        let check = classifier.check_parameters(vec![
            ("a", 1.0, SpecLimits::new(0.0, 2.0)),
            ("b", 3.0, SpecLimits::new(0.0, 2.0)),
            ("c", -1.0, SpecLimits::new(0.0, 2.0)),
        ]);
        assert_eq!(check.failing_count, 2);
        assert!(!check.is_zero_outlier());
        assert_eq!(check.failing(), vec!["b", "c"]);
    }
}

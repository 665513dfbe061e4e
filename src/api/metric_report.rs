// ==========================================
// 预制混凝土质量控制 - 指标报表
// ==========================================
// 职责: 筛选读数 -> 统计摘要 -> 逐读数判定 -> 汇总
// 各模块门面共用
// ==========================================
// 红线: 报表为派生值，每次按当前读数重算，不做缓存
// ==========================================

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::quality::{Band, DeviationResult, StatSummary};
use crate::domain::reading::{Reading, ReadingFilter};
use crate::domain::reference::ReferenceSpec;
use crate::engine::classifier::DeviationClassifier;
use crate::engine::statistics::StatisticsEngine;

// ==========================================
// MetricReport - 单指标报表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    pub metric: String,
    pub summary: StatSummary,
    pub results: Vec<DeviationResult>,
    /// 偏差% 的算术平均（带符号）
    pub mean_deviation_pct: f64,
    pub outlier_count: usize,
    /// 仅在配置规格限时给出
    pub pct_within_spec: Option<f64>,
    /// 等级 -> 读数数量
    pub band_counts: BTreeMap<String, usize>,
    /// NaN / Infinity 读数，不参与统计与判定
    pub invalid_count: usize,
}

impl MetricReport {
    /// 按统一参考基准构建
    pub fn from_values(metric: &str, values: &[f64], spec: &ReferenceSpec) -> Self {
        let invalid_count = values.len();
        let values = finite(values.iter().copied());
        let invalid_count = invalid_count - values.len();
        let classifier = DeviationClassifier::new();
        let (summary, results) = classifier.evaluate_all(&values, spec);
        let pct_within_spec = spec
            .limits
            .map(|limits| classifier.pct_within_spec(&values, &limits));

        Self::assemble(metric, summary, results, pct_within_spec, invalid_count)
    }

    /// 每个读数各带设定值（如不同批次的配料目标重量）
    ///
    /// 西格玛分级仍以整批统计为准
    pub fn from_targeted(metric: &str, pairs: &[(f64, f64)], tolerance_pct: f64) -> Self {
        let total = pairs.len();
        let pairs: Vec<(f64, f64)> = pairs
            .iter()
            .copied()
            .filter(|(value, target)| value.is_finite() && target.is_finite())
            .collect();
        let values: Vec<f64> = pairs.iter().map(|(value, _)| *value).collect();
        let invalid_count = total - pairs.len();

        let classifier = DeviationClassifier::new();
        let summary = StatisticsEngine::new().summarize(&values);
        let results = pairs
            .iter()
            .map(|(value, target)| {
                let spec = ReferenceSpec::set_point(*target, tolerance_pct);
                classifier.evaluate(*value, &spec, &summary)
            })
            .collect();

        Self::assemble(metric, summary, results, None, invalid_count)
    }

    fn assemble(
        metric: &str,
        summary: StatSummary,
        results: Vec<DeviationResult>,
        pct_within_spec: Option<f64>,
        invalid_count: usize,
    ) -> Self {
        let mean_deviation_pct = if results.is_empty() {
            0.0
        } else {
            results.iter().map(|r| r.deviation_pct).sum::<f64>() / results.len() as f64
        };
        let outlier_count = results.iter().filter(|r| r.outlier).count();

        let mut band_counts = BTreeMap::new();
        for r in &results {
            *band_counts.entry(band_label(&r.band)).or_insert(0) += 1;
        }

        tracing::debug!(
            metric,
            count = summary.count,
            outlier_count,
            invalid_count,
            "指标报表已生成"
        );

        Self {
            metric: metric.to_string(),
            summary,
            results,
            mean_deviation_pct,
            outlier_count,
            pct_within_spec,
            band_counts,
            invalid_count,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }

    pub fn band_count(&self, band: &Band) -> usize {
        self.band_counts.get(&band_label(band)).copied().unwrap_or(0)
    }
}

/// 报表入口: 先按分组键筛选，再统计判定
pub fn build_metric_report(
    metric: &str,
    readings: &[Reading],
    filter: &ReadingFilter,
    spec: &ReferenceSpec,
) -> MetricReport {
    let values: Vec<f64> = filter.apply(readings).into_iter().map(|r| r.value).collect();
    MetricReport::from_values(metric, &values, spec)
}

fn band_label(band: &Band) -> String {
    match band {
        Band::Sigma(b) => b.to_string(),
        Band::Spec(b) => b.to_string(),
    }
}

fn finite<I: IntoIterator<Item = f64>>(values: I) -> Vec<f64> {
    values.into_iter().filter(|v| v.is_finite()).collect()
}

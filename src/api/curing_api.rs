// ==========================================
// 预制混凝土质量控制 - 蒸汽养护 API
// ==========================================
// 每个养护周期七项参数独立判定
// 汇总: 不合格周期数、零异常周期数、各参数不合格次数、恒温温度统计
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::curing::{CuringCycle, CuringParameter};
use crate::domain::quality::StatSummary;
use crate::domain::reading::{GroupKeys, ReadingFilter};
use crate::engine::classifier::{DeviationClassifier, ParameterCheck};
use crate::engine::statistics::StatisticsEngine;

// ==========================================
// DTO
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleCheck {
    pub cycle_no: String,
    #[serde(flatten)]
    pub keys: GroupKeys,
    pub check: ParameterCheck<CuringParameter>,
}

impl CycleCheck {
    pub fn failing_parameters(&self) -> Vec<CuringParameter> {
        self.check.failing()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuringReport {
    pub cycles: Vec<CycleCheck>,
    /// 至少一项不合格的周期数
    pub failing_cycle_count: usize,
    pub zero_outlier_cycle_count: usize,
    pub per_parameter_fail_counts: BTreeMap<CuringParameter, usize>,
    /// 恒温温度
    pub temperature_summary: StatSummary,
}

// ==========================================
// CuringApi
// ==========================================
pub struct CuringApi {
    config: Arc<dyn QcConfigReader>,
    classifier: DeviationClassifier,
}

impl CuringApi {
    pub fn new(config: Arc<dyn QcConfigReader>) -> Self {
        Self {
            config,
            classifier: DeviationClassifier::new(),
        }
    }

    /// 逐周期判定
    pub fn cycle_checks(&self, cycles: &[CuringCycle], filter: &ReadingFilter) -> Vec<CycleCheck> {
        let bands = self.config.curing_bands();
        filter
            .apply(cycles)
            .into_iter()
            .map(|cycle| {
                let check = self.classifier.check_parameters(
                    CuringParameter::ALL
                        .iter()
                        .map(|p| (*p, cycle.value_of(*p), bands.limits_of(*p))),
                );
                CycleCheck {
                    cycle_no: cycle.cycle_no.clone(),
                    keys: cycle.keys.clone(),
                    check,
                }
            })
            .collect()
    }

    #[instrument(skip(self, cycles), fields(total = cycles.len()))]
    pub fn curing_report(&self, cycles: &[CuringCycle], filter: &ReadingFilter) -> CuringReport {
        let checks = self.cycle_checks(cycles, filter);

        let mut per_parameter_fail_counts: BTreeMap<CuringParameter, usize> =
            CuringParameter::ALL.iter().map(|p| (*p, 0)).collect();
        for check in &checks {
            for parameter in check.failing_parameters() {
                *per_parameter_fail_counts.entry(parameter).or_insert(0) += 1;
            }
        }

        let failing_cycle_count = checks.iter().filter(|c| !c.check.is_zero_outlier()).count();
        let zero_outlier_cycle_count = checks.len() - failing_cycle_count;

        let temperatures: Vec<f64> = filter
            .apply(cycles)
            .into_iter()
            .map(|c| c.constant_temp_c)
            .collect();
        let temperature_summary = StatisticsEngine::new().summarize(&temperatures);

        if failing_cycle_count > 0 {
            tracing::warn!(failing_cycle_count, "存在养护参数超限的周期");
        }

        CuringReport {
            cycles: checks,
            failing_cycle_count,
            zero_outlier_cycle_count,
            per_parameter_fail_counts,
            temperature_summary,
        }
    }
}

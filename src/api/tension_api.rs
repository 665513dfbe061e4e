// ==========================================
// 预制混凝土质量控制 - 钢丝张拉 API
// ==========================================

use std::sync::Arc;

use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::metric_report::{build_metric_report, MetricReport};
use crate::config::config_manager::metrics;
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::reading::{Reading, ReadingFilter};
use crate::domain::reference::{ReferenceSpec, SetPoint};
use crate::domain::wire::TensionReading;

pub struct TensionApi {
    config: Arc<dyn QcConfigReader>,
}

impl TensionApi {
    pub fn new(config: Arc<dyn QcConfigReader>) -> Self {
        Self { config }
    }

    /// 张拉力报表（对照设计张拉力）
    #[instrument(skip(self, readings), fields(total = readings.len()))]
    pub fn tension_report(
        &self,
        readings: &[TensionReading],
        filter: &ReadingFilter,
        target_kn: f64,
    ) -> ApiResult<MetricReport> {
        if !target_kn.is_finite() || target_kn <= 0.0 {
            return Err(ApiError::InvalidInput(format!("设计张拉力无效: {}", target_kn)));
        }

        let loads: Vec<Reading> = readings.iter().map(TensionReading::to_reading).collect();
        let spec = ReferenceSpec {
            set_point: Some(SetPoint::new(
                target_kn,
                self.config.tolerance_pct(metrics::TENSION_LOAD_KN),
            )),
            limits: self.config.spec_limits(metrics::TENSION_LOAD_KN),
        };

        Ok(build_metric_report(metrics::TENSION_LOAD_KN, &loads, filter, &spec))
    }
}

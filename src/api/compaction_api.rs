// ==========================================
// 预制混凝土质量控制 - 振捣密实 API
// ==========================================
// 振动频率 (RPM) 对照规格限，输出合格率
// ==========================================

use std::sync::Arc;

use tracing::instrument;

use crate::api::metric_report::{build_metric_report, MetricReport};
use crate::config::config_manager::metrics;
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::reading::{Reading, ReadingFilter};
use crate::domain::reference::ReferenceSpec;

pub struct CompactionApi {
    config: Arc<dyn QcConfigReader>,
}

impl CompactionApi {
    pub fn new(config: Arc<dyn QcConfigReader>) -> Self {
        Self { config }
    }

    /// 振动频率报表
    #[instrument(skip(self, readings), fields(total = readings.len()))]
    pub fn frequency_report(&self, readings: &[Reading], filter: &ReadingFilter) -> MetricReport {
        let spec = ReferenceSpec {
            set_point: None,
            limits: self.config.spec_limits(metrics::VIBRATION_RPM),
        };
        build_metric_report(metrics::VIBRATION_RPM, readings, filter, &spec)
    }
}

// ==========================================
// 预制混凝土质量控制 - 原材料检验 API
// ==========================================
// 高强钢丝: 直径、捻距对照规格限
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::metric_report::MetricReport;
use crate::config::config_manager::metrics;
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::reading::ReadingFilter;
use crate::domain::reference::{ReferenceSpec, SpecLimits};
use crate::domain::wire::WireCoil;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireVerification {
    pub diameter: MetricReport,
    pub lay_length: MetricReport,
    /// 任一项超出规格的盘条编号
    pub nonconforming_coils: Vec<String>,
}

pub struct RawMaterialApi {
    config: Arc<dyn QcConfigReader>,
}

impl RawMaterialApi {
    pub fn new(config: Arc<dyn QcConfigReader>) -> Self {
        Self { config }
    }

    #[instrument(skip(self, coils), fields(total = coils.len()))]
    pub fn verify_wire(&self, coils: &[WireCoil], filter: &ReadingFilter) -> WireVerification {
        let selected = filter.apply(coils);
        let diameter_limits = self.config.spec_limits(metrics::HTS_WIRE_DIAMETER_MM);
        let lay_limits = self.config.spec_limits(metrics::HTS_LAY_LENGTH_MM);

        let diameters: Vec<f64> = selected.iter().map(|c| c.diameter_mm).collect();
        let lay_lengths: Vec<f64> = selected.iter().map(|c| c.lay_length_mm).collect();

        let nonconforming_coils: Vec<String> = selected
            .iter()
            .filter(|c| {
                outside(diameter_limits, c.diameter_mm) || outside(lay_limits, c.lay_length_mm)
            })
            .map(|c| c.coil_no.clone())
            .collect();

        if !nonconforming_coils.is_empty() {
            tracing::warn!(count = nonconforming_coils.len(), "钢丝抽检存在不合格盘条");
        }

        WireVerification {
            diameter: MetricReport::from_values(
                metrics::HTS_WIRE_DIAMETER_MM,
                &diameters,
                &ReferenceSpec {
                    set_point: None,
                    limits: diameter_limits,
                },
            ),
            lay_length: MetricReport::from_values(
                metrics::HTS_LAY_LENGTH_MM,
                &lay_lengths,
                &ReferenceSpec {
                    set_point: None,
                    limits: lay_limits,
                },
            ),
            nonconforming_coils,
        }
    }
}

/// 非有限读数无论是否配置规格限都判为不合格
fn outside(limits: Option<SpecLimits>, value: f64) -> bool {
    match limits {
        Some(l) => !l.contains(value),
        None => !value.is_finite(),
    }
}

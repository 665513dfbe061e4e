// ==========================================
// 预制混凝土质量控制 - 立方体/抗折试件 API
// ==========================================
// 生命周期: 申报 (DECLARED) -> 破型 (TESTED)
// 强度报表: 仅统计已破型试件，下限为设计强度
// ==========================================

use std::sync::Arc;

use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::metric_report::MetricReport;
use crate::config::config_manager::metrics;
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::cube::{CubeResult, CubeSample};
use crate::domain::reading::ReadingFilter;
use crate::domain::record::{Record, RecordView};
use crate::domain::reference::{ReferenceSpec, SpecLimits};
use crate::engine::clock::Clock;
use crate::engine::lifecycle::{Ledger, SharedLedger};

pub struct CubeTestApi {
    ledger: SharedLedger<CubeSample>,
}

impl CubeTestApi {
    pub fn new(config: Arc<dyn QcConfigReader>, clock: Arc<dyn Clock>) -> Self {
        Self {
            ledger: SharedLedger::new(Ledger::new(clock, config.edit_window())),
        }
    }

    /// 申报试件
    #[instrument(skip(self, sample), fields(sample_no = %sample.sample_no))]
    pub fn declare_sample(&self, sample: CubeSample) -> ApiResult<Record<CubeSample>> {
        if sample.sample_no.trim().is_empty() {
            return Err(ApiError::InvalidInput("试件编号不能为空".to_string()));
        }
        Ok(self.ledger.declare(sample)?)
    }

    /// 录入破型结果
    #[instrument(skip(self, result))]
    pub fn record_result(&self, id: &str, result: CubeResult) -> ApiResult<Record<CubeSample>> {
        if !result.strength_mpa.is_finite() || result.strength_mpa < 0.0 {
            return Err(ApiError::InvalidInput(format!("强度值无效: {}", result.strength_mpa)));
        }
        if !result.failure_load_kn.is_finite() || result.failure_load_kn < 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "破坏荷载无效: {}",
                result.failure_load_kn
            )));
        }
        Ok(self.ledger.transition(id, result)?)
    }

    #[instrument(skip(self, patch))]
    pub fn modify_sample<F>(&self, id: &str, patch: F) -> ApiResult<Record<CubeSample>>
    where
        F: FnOnce(&mut CubeSample),
    {
        Ok(self.ledger.modify(id, patch)?)
    }

    #[instrument(skip(self))]
    pub fn delete_sample(&self, id: &str) -> ApiResult<Record<CubeSample>> {
        Ok(self.ledger.delete(id)?)
    }

    /// 待破型试件
    pub fn pending(&self, filter: &ReadingFilter) -> ApiResult<Vec<RecordView<CubeSample>>> {
        Ok(self
            .ledger
            .views(filter)?
            .into_iter()
            .filter(|v| !v.record.is_terminal())
            .collect())
    }

    /// 已破型试件
    pub fn completed(&self, filter: &ReadingFilter) -> ApiResult<Vec<RecordView<CubeSample>>> {
        Ok(self
            .ledger
            .views(filter)?
            .into_iter()
            .filter(|v| v.record.is_terminal())
            .collect())
    }

    /// 强度报表，合格率以设计强度为下限
    #[instrument(skip(self))]
    pub fn strength_report(
        &self,
        filter: &ReadingFilter,
        required_strength_mpa: f64,
    ) -> ApiResult<MetricReport> {
        if !required_strength_mpa.is_finite() {
            return Err(ApiError::InvalidInput(format!(
                "设计强度无效: {}",
                required_strength_mpa
            )));
        }

        let strengths: Vec<f64> = self
            .ledger
            .completed(filter)?
            .iter()
            .filter_map(|r| r.payload.strength_mpa)
            .collect();
        let spec =
            ReferenceSpec::default().with_limits(SpecLimits::at_least(required_strength_mpa));

        Ok(MetricReport::from_values(metrics::CUBE_STRENGTH_MPA, &strengths, &spec))
    }
}

// ==========================================
// 预制混凝土质量控制 - 含水率 / 配合比调整 API
// ==========================================
// 同一批次有多次检测时取最后一次
// ==========================================

use std::sync::Arc;

use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::mix::BatchMixSummary;
use crate::domain::moisture::MoistureTest;
use crate::domain::reading::ReadingFilter;
use crate::engine::mix_calculator::MixCalculator;

pub struct MoistureApi {
    config: Arc<dyn QcConfigReader>,
}

impl MoistureApi {
    pub fn new(config: Arc<dyn QcConfigReader>) -> Self {
        Self { config }
    }

    #[instrument(skip(self, tests), fields(total = tests.len()))]
    pub fn compute_for_batch(
        &self,
        tests: &[MoistureTest],
        batch_no: &str,
    ) -> ApiResult<BatchMixSummary> {
        let latest = ReadingFilter::batch(batch_no)
            .apply(tests)
            .into_iter()
            .last()
            .ok_or_else(|| ApiError::NotFound(format!("批次无含水率检测: batch_no={}", batch_no)))?;

        let calculator = MixCalculator::new(self.config.wc_ratio_limit());
        Ok(calculator.compute(&latest.mix))
    }
}

// ==========================================
// 预制混凝土质量控制 - 配料称量 API
// ==========================================
// 职责: 称量记录的录入/见证/修改/删除，配料偏差报表
// 记录状态: MANUAL（人工录入）或 WITNESSED（SCADA 见证），创建即终态
// ==========================================

use std::collections::BTreeMap;
use std::sync::Arc;

use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::metric_report::MetricReport;
use crate::config::config_manager::metrics;
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::reading::ReadingFilter;
use crate::domain::record::{Record, RecordView};
use crate::domain::weighment::{BatchWeighment, ScadaReading};
use crate::engine::clock::Clock;
use crate::engine::lifecycle::{Ledger, SharedLedger};

// ==========================================
// WeighmentApi - 配料称量 API
// ==========================================
pub struct WeighmentApi {
    config: Arc<dyn QcConfigReader>,
    ledger: SharedLedger<BatchWeighment>,
}

impl WeighmentApi {
    pub fn new(config: Arc<dyn QcConfigReader>, clock: Arc<dyn Clock>) -> Self {
        let ledger = Ledger::new(clock, config.edit_window());
        Self {
            config,
            ledger: SharedLedger::new(ledger),
        }
    }

    // ==========================================
    // 写入
    // ==========================================

    /// 人工录入
    #[instrument(skip(self, entry), fields(ingredient = %entry.ingredient))]
    pub fn record_manual(&self, entry: BatchWeighment) -> ApiResult<Record<BatchWeighment>> {
        validate_entry(&entry)?;
        Ok(self.ledger.record_manual(entry)?)
    }

    /// SCADA 读数见证，同一读数只能见证一次
    #[instrument(skip(self, reading), fields(reading_id = %reading.reading_id))]
    pub fn witness_scada(&self, reading: &ScadaReading) -> ApiResult<Record<BatchWeighment>> {
        validate_entry(&reading.weighment)?;
        Ok(self.ledger.witness(&reading.reading_id, reading.weighment.clone())?)
    }

    /// 修正实际重量（编辑窗口内）
    #[instrument(skip(self))]
    pub fn modify_entry(&self, id: &str, actual_kg: f64) -> ApiResult<Record<BatchWeighment>> {
        if !actual_kg.is_finite() || actual_kg < 0.0 {
            return Err(ApiError::InvalidInput(format!("实际重量无效: {}", actual_kg)));
        }
        Ok(self.ledger.modify(id, |w| w.actual_kg = actual_kg)?)
    }

    #[instrument(skip(self))]
    pub fn delete_entry(&self, id: &str) -> ApiResult<Record<BatchWeighment>> {
        Ok(self.ledger.delete(id)?)
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 批次内全部称量记录，带可编辑标记
    pub fn entries(&self, batch_no: &str) -> ApiResult<Vec<RecordView<BatchWeighment>>> {
        self.entries_matching(&ReadingFilter::batch(batch_no))
    }

    pub fn entries_matching(
        &self,
        filter: &ReadingFilter,
    ) -> ApiResult<Vec<RecordView<BatchWeighment>>> {
        Ok(self.ledger.views(filter)?)
    }

    /// 单配料偏差报表
    #[instrument(skip(self))]
    pub fn ingredient_report(&self, batch_no: &str, ingredient: &str) -> ApiResult<MetricReport> {
        let records = self.ledger.completed(&ReadingFilter::batch(batch_no))?;
        let pairs: Vec<(f64, f64)> = records
            .iter()
            .filter(|r| r.payload.ingredient == ingredient)
            .map(|r| (r.payload.actual_kg, r.payload.target_kg))
            .collect();

        Ok(MetricReport::from_targeted(
            ingredient,
            &pairs,
            self.config.tolerance_pct(metrics::INGREDIENT_WEIGHT),
        ))
    }

    /// 批次报表（每种配料一份，按配料名排序）
    #[instrument(skip(self))]
    pub fn batch_report(&self, batch_no: &str) -> ApiResult<Vec<MetricReport>> {
        let records = self.ledger.completed(&ReadingFilter::batch(batch_no))?;
        let tolerance_pct = self.config.tolerance_pct(metrics::INGREDIENT_WEIGHT);

        let mut by_ingredient: BTreeMap<&str, Vec<(f64, f64)>> = BTreeMap::new();
        for r in &records {
            by_ingredient
                .entry(r.payload.ingredient.as_str())
                .or_default()
                .push((r.payload.actual_kg, r.payload.target_kg));
        }

        Ok(by_ingredient
            .into_iter()
            .map(|(ingredient, pairs)| {
                MetricReport::from_targeted(ingredient, &pairs, tolerance_pct)
            })
            .collect())
    }
}

fn validate_entry(entry: &BatchWeighment) -> ApiResult<()> {
    if entry.ingredient.trim().is_empty() {
        return Err(ApiError::InvalidInput("配料名称不能为空".to_string()));
    }
    if !entry.target_kg.is_finite() || entry.target_kg < 0.0 {
        return Err(ApiError::InvalidInput(format!("设定重量无效: {}", entry.target_kg)));
    }
    if !entry.actual_kg.is_finite() || entry.actual_kg < 0.0 {
        return Err(ApiError::InvalidInput(format!("实际重量无效: {}", entry.actual_kg)));
    }
    Ok(())
}

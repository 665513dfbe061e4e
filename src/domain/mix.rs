// ==========================================
// 预制混凝土质量控制 - 含水率配合比调整模型
// ==========================================
// 单位: 样品重量 g, 配料重量 kg, 百分比 %
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::types::AggregateFraction;

// ==========================================
// MixComponent - 骨料组分输入
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MixComponent {
    /// 配合比干重 (kg)
    pub dry_weight: f64,
    /// 湿样重 (g)
    pub wet_sample_weight: f64,
    /// 烘干样重 (g)
    pub dried_sample_weight: f64,
    /// 吸水率 (%)
    pub absorption_pct: f64,
}

// ==========================================
// ComponentMoisture - 组分派生值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComponentMoisture {
    pub fraction: AggregateFraction,
    pub dry_weight: f64,
    /// 水分损失 (g)，不小于 0
    pub moisture_loss_g: f64,
    /// 含水率 (%)，烘干重为 0 时取 0
    pub moisture_pct: f64,
    /// 表面含水率 (%) = max(0, 含水率 - 吸水率)
    pub free_moisture_pct: f64,
    /// 表面水 (kg)
    pub free_moisture_kg: f64,
    /// 调整后重量 (kg)
    pub adjusted_weight: f64,
    /// 采用重量 (kg)，向上取整
    pub adopted_weight: f64,
}

// ==========================================
// MixInput - 单批次计算输入
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MixInput {
    pub ca1: MixComponent,
    pub ca2: MixComponent,
    pub fa: MixComponent,
    /// 申报用水量 (kg)
    pub declared_water: f64,
    /// 水泥用量 (kg)
    pub cement_weight: f64,
}

// ==========================================
// BatchMixSummary - 批次汇总
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchMixSummary {
    pub ca1: ComponentMoisture,
    pub ca2: ComponentMoisture,
    pub fa: ComponentMoisture,
    pub total_free_moisture_kg: f64,
    /// 调整后用水量 = 申报用水量 - 表面水合计
    pub adjusted_water: f64,
    /// 水灰比，水泥用量为 0 时无定义
    pub water_cement_ratio: Option<f64>,
    /// 骨灰比，水泥用量为 0 时无定义
    pub aggregate_cement_ratio: Option<f64>,
    /// 水灰比上限
    pub wc_ratio_limit: f64,
    /// 水灰比超限
    pub wc_ratio_exceeded: bool,
}

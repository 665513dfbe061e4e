// ==========================================
// 预制混凝土质量控制 - 配料称量记录
// ==========================================
// 人工录入 (MANUAL) 与 SCADA 见证 (WITNESSED) 均为创建即终态
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::reading::GroupKeys;
use crate::domain::record::LifecyclePayload;

// ==========================================
// BatchWeighment - 单配料称量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchWeighment {
    #[serde(flatten)]
    pub keys: GroupKeys,
    /// 配料名称 (cement / water / ca1 / ca2 / fa / admixture ...)
    pub ingredient: String,
    /// 设定重量 (kg)
    pub target_kg: f64,
    /// 实际重量 (kg)
    pub actual_kg: f64,
}

impl BatchWeighment {
    pub fn new(keys: GroupKeys, ingredient: &str, target_kg: f64, actual_kg: f64) -> Self {
        Self {
            keys,
            ingredient: ingredient.to_string(),
            target_kg,
            actual_kg,
        }
    }
}

impl LifecyclePayload for BatchWeighment {
    /// 复核后的实际重量
    type Outcome = f64;

    fn merge_outcome(&mut self, outcome: f64) {
        self.actual_kg = outcome;
    }

    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

// ==========================================
// ScadaReading - SCADA 称量读数（见证来源）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScadaReading {
    pub reading_id: String,
    #[serde(flatten)]
    pub weighment: BatchWeighment,
}

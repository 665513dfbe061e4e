// ==========================================
// 预制混凝土质量控制 - 骨料含水率检测
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::mix::MixInput;
use crate::domain::reading::{GroupKeys, Grouped};

/// 单批次含水率检测（三种骨料 + 申报用水 + 水泥）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoistureTest {
    #[serde(flatten)]
    pub keys: GroupKeys,
    pub mix: MixInput,
}

impl Grouped for MoistureTest {
    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

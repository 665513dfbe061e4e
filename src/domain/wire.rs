// ==========================================
// 预制混凝土质量控制 - 钢丝张拉 / 原材料检验
// ==========================================

use serde::{Deserialize, Serialize};

use crate::domain::reading::{GroupKeys, Grouped, Reading};

// ==========================================
// TensionReading - 张拉力读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensionReading {
    #[serde(flatten)]
    pub keys: GroupKeys,
    pub wire_no: u32,
    /// 张拉力 (kN)
    pub load_kn: f64,
}

impl TensionReading {
    pub fn to_reading(&self) -> Reading {
        Reading::new(self.load_kn, self.keys.clone())
    }
}

impl Grouped for TensionReading {
    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

// ==========================================
// WireCoil - 高强钢丝盘条抽检
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireCoil {
    #[serde(flatten)]
    pub keys: GroupKeys,
    pub coil_no: String,
    /// 直径 (mm)
    pub diameter_mm: f64,
    /// 捻距 (mm)
    pub lay_length_mm: f64,
}

impl Grouped for WireCoil {
    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

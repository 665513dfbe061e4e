// ==========================================
// 预制混凝土质量控制 - 蒸汽养护周期
// ==========================================
// 七项参数各自对应固定区间，全部合格才算零异常
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::reading::{GroupKeys, Grouped};
use crate::domain::reference::SpecLimits;

// ==========================================
// CuringParameter - 养护参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CuringParameter {
    PreSteamDuration,     // 静停时间 (h)
    RisePeriod,           // 升温时间 (h)
    RiseRate,             // 升温速率 (°C/h)
    ConstantTemperature,  // 恒温温度 (°C)
    ConstantDuration,     // 恒温时间 (h)
    CoolDuration,         // 降温时间 (h)
    CoolRate,             // 降温速率 (°C/h)
}

impl CuringParameter {
    pub const ALL: [CuringParameter; 7] = [
        CuringParameter::PreSteamDuration,
        CuringParameter::RisePeriod,
        CuringParameter::RiseRate,
        CuringParameter::ConstantTemperature,
        CuringParameter::ConstantDuration,
        CuringParameter::CoolDuration,
        CuringParameter::CoolRate,
    ];
}

impl fmt::Display for CuringParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CuringParameter::PreSteamDuration => "PRE_STEAM_DURATION",
            CuringParameter::RisePeriod => "RISE_PERIOD",
            CuringParameter::RiseRate => "RISE_RATE",
            CuringParameter::ConstantTemperature => "CONSTANT_TEMPERATURE",
            CuringParameter::ConstantDuration => "CONSTANT_DURATION",
            CuringParameter::CoolDuration => "COOL_DURATION",
            CuringParameter::CoolRate => "COOL_RATE",
        };
        write!(f, "{}", s)
    }
}

// ==========================================
// CuringCycle - 单次养护记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CuringCycle {
    #[serde(flatten)]
    pub keys: GroupKeys,
    pub cycle_no: String,
    pub pre_steam_hours: f64,
    pub rise_hours: f64,
    pub rise_rate_c_per_h: f64,
    pub constant_temp_c: f64,
    pub constant_hours: f64,
    pub cool_hours: f64,
    pub cool_rate_c_per_h: f64,
}

impl CuringCycle {
    pub fn value_of(&self, parameter: CuringParameter) -> f64 {
        match parameter {
            CuringParameter::PreSteamDuration => self.pre_steam_hours,
            CuringParameter::RisePeriod => self.rise_hours,
            CuringParameter::RiseRate => self.rise_rate_c_per_h,
            CuringParameter::ConstantTemperature => self.constant_temp_c,
            CuringParameter::ConstantDuration => self.constant_hours,
            CuringParameter::CoolDuration => self.cool_hours,
            CuringParameter::CoolRate => self.cool_rate_c_per_h,
        }
    }
}

impl Grouped for CuringCycle {
    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

// ==========================================
// CuringBands - 各参数允许区间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CuringBands {
    pub pre_steam_duration: SpecLimits,
    pub rise_period: SpecLimits,
    pub rise_rate: SpecLimits,
    pub constant_temperature: SpecLimits,
    pub constant_duration: SpecLimits,
    pub cool_duration: SpecLimits,
    pub cool_rate: SpecLimits,
}

impl CuringBands {
    pub fn limits_of(&self, parameter: CuringParameter) -> SpecLimits {
        match parameter {
            CuringParameter::PreSteamDuration => self.pre_steam_duration,
            CuringParameter::RisePeriod => self.rise_period,
            CuringParameter::RiseRate => self.rise_rate,
            CuringParameter::ConstantTemperature => self.constant_temperature,
            CuringParameter::ConstantDuration => self.constant_duration,
            CuringParameter::CoolDuration => self.cool_duration,
            CuringParameter::CoolRate => self.cool_rate,
        }
    }
}

impl Default for CuringBands {
    fn default() -> Self {
        Self {
            pre_steam_duration: SpecLimits::new(2.0, 4.0),
            rise_period: SpecLimits::new(2.0, 3.0),
            rise_rate: SpecLimits::new(0.0, 15.0),
            constant_temperature: SpecLimits::new(55.0, 60.0),
            constant_duration: SpecLimits::new(4.0, 6.0),
            cool_duration: SpecLimits::new(2.0, 3.0),
            cool_rate: SpecLimits::new(0.0, 15.0),
        }
    }
}

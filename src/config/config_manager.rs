// ==========================================
// 预制混凝土质量控制 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: 内存键值表 (key -> 原始字符串)，可由 JSON 文件加载
// ==========================================
// 红线: 格式错误的配置值回退默认值并告警，不中断报表
// 红线: 编辑窗口必须为正，由 validate() 拒绝
// ==========================================

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::qc_config_trait::QcConfigReader;
use crate::domain::curing::CuringBands;
use crate::domain::reference::SpecLimits;
use crate::engine::lifecycle::DEFAULT_EDIT_WINDOW_MINUTES;
use crate::engine::mix_calculator::DEFAULT_WC_RATIO_LIMIT;

/// 默认容差（百分比）
pub const DEFAULT_TOLERANCE_PCT: f64 = 3.0;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: BTreeMap<String, String>,
}

impl ConfigManager {
    /// 空配置（全部取默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 对象加载
    ///
    /// 字符串值原样保存，其它值（数字、对象）保存为其 JSON 文本
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let root: Value = serde_json::from_str(json)?;
        let object = match root {
            Value::Object(map) => map,
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "$".to_string(),
                    message: format!("配置根节点必须为对象, 实际为 {}", other),
                })
            }
        };

        let values = object
            .into_iter()
            .map(|(key, value)| {
                let raw = match value {
                    Value::String(s) => s,
                    other => other.to_string(),
                };
                (key, raw)
            })
            .collect();

        Ok(Self { values })
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let manager = Self::from_json_str(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            keys = manager.values.len(),
            "配置已加载"
        );
        Ok(manager)
    }

    /// 覆写单个配置项
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 获取所有配置的快照（JSON格式，按键排序）
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.values)?)
    }

    /// 从配置快照恢复配置，覆盖同名键
    ///
    /// # 返回
    /// - 恢复的配置项数量
    pub fn restore_config_from_snapshot(&mut self, snapshot_json: &str) -> ConfigResult<usize> {
        let config_map: BTreeMap<String, String> = serde_json::from_str(snapshot_json)?;
        let count = config_map.len();
        self.values.extend(config_map);
        Ok(count)
    }

    /// 校验硬约束
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(raw) = self.get_config_value(config_keys::EDIT_WINDOW_MINUTES) {
            let minutes = raw.trim().parse::<i64>().map_err(|e| ConfigError::InvalidValue {
                key: config_keys::EDIT_WINDOW_MINUTES.to_string(),
                message: format!("无法解析为整数: {}", e),
            })?;
            if minutes <= 0 {
                return Err(ConfigError::InvalidValue {
                    key: config_keys::EDIT_WINDOW_MINUTES.to_string(),
                    message: format!("编辑窗口必须为正, 实际为 {}", minutes),
                });
            }
        }

        if let Some(raw) = self.get_config_value(config_keys::WC_RATIO_LIMIT) {
            let limit = raw.trim().parse::<f64>().map_err(|e| ConfigError::InvalidValue {
                key: config_keys::WC_RATIO_LIMIT.to_string(),
                message: format!("无法解析为数值: {}", e),
            })?;
            if !limit.is_finite() || limit <= 0.0 {
                return Err(ConfigError::InvalidValue {
                    key: config_keys::WC_RATIO_LIMIT.to_string(),
                    message: format!("水灰比上限必须为正数, 实际为 {}", limit),
                });
            }
        }

        for (key, raw) in self.values.iter() {
            if key.starts_with(config_keys::SPEC_LIMITS_PREFIX) {
                let limits: SpecLimits = serde_json::from_str(raw)?;
                if limits.lower > limits.upper {
                    return Err(ConfigError::InvalidValue {
                        key: key.clone(),
                        message: format!("下限 {} 大于上限 {}", limits.lower, limits.upper),
                    });
                }
            }
        }

        Ok(())
    }

    // ==========================================
    // 内部解析
    // ==========================================

    fn parse_or_default<T>(&self, key: &str, default: T) -> T
    where
        T: FromStr + Copy,
    {
        match self.get_config_value(key) {
            None => default,
            Some(raw) => raw.trim().parse::<T>().unwrap_or_else(|_| {
                tracing::warn!(config_key = key, raw_value = %raw, "配置格式错误，使用默认值");
                default
            }),
        }
    }

    fn parse_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.get_config_value(key)?;
        match serde_json::from_str(raw) {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    error = %e,
                    "配置格式错误，使用默认值"
                );
                None
            }
        }
    }
}

/// 内置规格限
pub fn default_spec_limits(metric: &str) -> Option<SpecLimits> {
    match metric {
        metrics::VIBRATION_RPM => Some(SpecLimits::new(8640.0, 9360.0)),
        metrics::HTS_WIRE_DIAMETER_MM => Some(SpecLimits::new(2.97, 3.03)),
        metrics::HTS_LAY_LENGTH_MM => Some(SpecLimits::new(72.0, 108.0)),
        _ => None,
    }
}

// ==========================================
// QcConfigReader Trait 实现
// ==========================================
impl QcConfigReader for ConfigManager {
    fn edit_window_minutes(&self) -> i64 {
        let minutes =
            self.parse_or_default(config_keys::EDIT_WINDOW_MINUTES, DEFAULT_EDIT_WINDOW_MINUTES);
        if minutes <= 0 {
            tracing::warn!(minutes, "编辑窗口非正，使用默认值");
            return DEFAULT_EDIT_WINDOW_MINUTES;
        }
        minutes
    }

    fn tolerance_pct(&self, metric: &str) -> f64 {
        let pct_key = format!("{}{}", config_keys::TOLERANCE_PCT_PREFIX, metric);
        let fraction_key = format!("{}{}", config_keys::TOLERANCE_FRACTION_PREFIX, metric);

        let pct = if self.get_config_value(&pct_key).is_some() {
            self.parse_or_default(&pct_key, DEFAULT_TOLERANCE_PCT)
        } else if self.get_config_value(&fraction_key).is_some() {
            self.parse_or_default(&fraction_key, DEFAULT_TOLERANCE_PCT / 100.0) * 100.0
        } else {
            DEFAULT_TOLERANCE_PCT
        };

        if !pct.is_finite() || pct < 0.0 {
            tracing::warn!(metric, pct, "容差无效，使用默认值");
            return DEFAULT_TOLERANCE_PCT;
        }
        pct
    }

    fn spec_limits(&self, metric: &str) -> Option<SpecLimits> {
        let key = format!("{}{}", config_keys::SPEC_LIMITS_PREFIX, metric);
        match self.parse_json::<SpecLimits>(&key) {
            Some(limits) if limits.lower <= limits.upper => Some(limits),
            Some(limits) => {
                tracing::warn!(
                    metric,
                    lower = limits.lower,
                    upper = limits.upper,
                    "规格限上下颠倒，使用默认值"
                );
                default_spec_limits(metric)
            }
            None => default_spec_limits(metric),
        }
    }

    fn wc_ratio_limit(&self) -> f64 {
        let limit = self.parse_or_default(config_keys::WC_RATIO_LIMIT, DEFAULT_WC_RATIO_LIMIT);
        if !limit.is_finite() || limit <= 0.0 {
            tracing::warn!(limit, "水灰比上限无效，使用默认值");
            return DEFAULT_WC_RATIO_LIMIT;
        }
        limit
    }

    fn curing_bands(&self) -> CuringBands {
        self.parse_json(config_keys::CURING_BANDS).unwrap_or_default()
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 生命周期
    pub const EDIT_WINDOW_MINUTES: &str = "edit_window_minutes";

    // 设定值容差（按指标，后接指标名）
    pub const TOLERANCE_PCT_PREFIX: &str = "tolerance_pct/";
    pub const TOLERANCE_FRACTION_PREFIX: &str = "tolerance_fraction/";

    // 规格限（按指标，JSON {"lower":..,"upper":..}）
    pub const SPEC_LIMITS_PREFIX: &str = "spec_limits/";

    // 配合比
    pub const WC_RATIO_LIMIT: &str = "wc_ratio_limit";

    // 蒸汽养护（JSON）
    pub const CURING_BANDS: &str = "curing_bands";
}

// ==========================================
// 指标名常量
// ==========================================
pub mod metrics {
    pub const INGREDIENT_WEIGHT: &str = "ingredient_weight";
    pub const VIBRATION_RPM: &str = "vibration_rpm";
    pub const TENSION_LOAD_KN: &str = "tension_load_kn";
    pub const CUBE_STRENGTH_MPA: &str = "cube_strength_mpa";
    pub const HTS_WIRE_DIAMETER_MM: &str = "hts_wire_diameter_mm";
    pub const HTS_LAY_LENGTH_MM: &str = "hts_lay_length_mm";
}

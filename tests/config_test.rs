// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 从 JSON 文件加载配置、默认值回退、校验
// ==========================================


use precast_qc::config::{config_keys, metrics, ConfigError, ConfigManager, QcConfigReader};
use precast_qc::domain::reference::SpecLimits;
use test_helpers::write_temp_config;

#[test]
fn test_load_from_file() {
    let file = write_temp_config(
        r#"{
            "edit_window_minutes": 90,
            "tolerance_fraction/ingredient_weight": 0.02,
            "spec_limits/hts_wire_diameter_mm": {"lower": 4.95, "upper": 5.05},
            "wc_ratio_limit": "0.38",
            "curing_bands": {
                "pre_steam_duration": {"lower": 3.0, "upper": 5.0},
                "rise_period": {"lower": 2.0, "upper": 3.0},
                "rise_rate": {"lower": 0.0, "upper": 20.0},
                "constant_temperature": {"lower": 60.0, "upper": 70.0},
                "constant_duration": {"lower": 4.0, "upper": 6.0},
                "cool_duration": {"lower": 2.0, "upper": 3.0},
                "cool_rate": {"lower": 0.0, "upper": 15.0}
            }
        }"#,
    );

    let config = ConfigManager::from_file(file.path()).unwrap();
    config.validate().unwrap();

    assert_eq!(config.edit_window_minutes(), 90);
    assert!((config.tolerance_pct(metrics::INGREDIENT_WEIGHT) - 2.0).abs() < 1e-12);
    assert_eq!(
        config.spec_limits(metrics::HTS_WIRE_DIAMETER_MM),
        Some(SpecLimits::new(4.95, 5.05))
    );
    // 未覆写的指标仍取内置默认值
    assert_eq!(
        config.spec_limits(metrics::HTS_LAY_LENGTH_MM),
        Some(SpecLimits::new(72.0, 108.0))
    );
    assert_eq!(config.wc_ratio_limit(), 0.38);
    assert_eq!(config.curing_bands().constant_temperature, SpecLimits::new(60.0, 70.0));
    assert_eq!(config.edit_window(), chrono::Duration::minutes(90));
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = ConfigManager::from_file(dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}

#[test]
fn test_invalid_json_is_parse_error() {
    let file = write_temp_config("{ not json");
    let err = ConfigManager::from_file(file.path()).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn test_non_object_root_rejected() {
    let err = ConfigManager::from_json_str("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidValue { .. }));
}

#[test]
fn test_validate_rejects_inverted_limits() {
    let mut config = ConfigManager::new();
    config.set("spec_limits/vibration_rpm", r#"{"lower": 9360, "upper": 8640}"#);
    assert!(matches!(config.validate(), Err(ConfigError::InvalidValue { .. })));
    // 读取时回退默认值
    assert_eq!(
        config.spec_limits(metrics::VIBRATION_RPM),
        Some(SpecLimits::new(8640.0, 9360.0))
    );
}

#[test]
fn test_validate_rejects_zero_window() {
    let config = ConfigManager::from_json_str(r#"{"edit_window_minutes": 0}"#).unwrap();
    let err = config.validate().unwrap_err();
    match err {
        ConfigError::InvalidValue { key, .. } => assert_eq!(key, config_keys::EDIT_WINDOW_MINUTES),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn test_invalid_wc_ratio_limit_in_file() {
    let file = write_temp_config(r#"{"wc_ratio_limit": -0.38}"#);
    let config = ConfigManager::from_file(file.path()).unwrap();

    match config.validate().unwrap_err() {
        ConfigError::InvalidValue { key, .. } => assert_eq!(key, config_keys::WC_RATIO_LIMIT),
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(config.wc_ratio_limit(), 0.40);
}

#[test]
fn test_snapshot_round_trip_through_file() {
    let mut config = ConfigManager::new();
    config.set(config_keys::EDIT_WINDOW_MINUTES, "30");
    config.set("tolerance_pct/tension_load_kn", "5");
    let snapshot = config.get_config_snapshot().unwrap();

    let file = write_temp_config(&snapshot);
    let restored = ConfigManager::from_file(file.path()).unwrap();
    assert_eq!(restored.edit_window_minutes(), 30);
    assert_eq!(restored.tolerance_pct(metrics::TENSION_LOAD_KN), 5.0);
}

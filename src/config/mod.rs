// ==========================================
// 预制混凝土质量控制 - 配置层
// ==========================================
// 职责: 质控参数管理（容差、规格限、编辑窗口、养护区间）
// 存储: 键值表，可由 JSON 文件加载
// ==========================================

pub mod config_manager;
pub mod error;
pub mod qc_config_trait;

// 重导出核心配置管理器
pub use config_manager::{
    config_keys, default_spec_limits, metrics, ConfigManager, DEFAULT_TOLERANCE_PCT,
};
pub use error::{ConfigError, ConfigResult};
pub use qc_config_trait::QcConfigReader;

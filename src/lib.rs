// ==========================================
// 预制混凝土质量控制 - 核心库
// ==========================================
// 统计评估 + 偏差判定 + 配合比调整 + 记录生命周期
// 系统定位: 质检数据录入与监控的计算内核（不含界面与存储）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 统计与业务规则
pub mod engine;

// 配置层 - 质控参数
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 报表门面
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{RecordState, SigmaBand, SpecBand};

// 领域实体
pub use domain::{
    ActionLog, ActionType, BatchMixSummary, DeviationResult, GroupKeys, Reading, ReadingFilter,
    Record, RecordView, ReferenceSpec, SpecLimits, StatSummary,
};

// 引擎
pub use engine::{
    ControlChart, DeviationClassifier, Ledger, LifecycleError, MixCalculator, SharedLedger,
    StatisticsEngine,
};

// 配置
pub use config::{ConfigManager, QcConfigReader};

// API
pub use api::{
    ApiError, CompactionApi, CubeTestApi, CuringApi, MetricReport, MoistureApi, RawMaterialApi,
    TensionApi, WeighmentApi,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "预制混凝土质量控制系统";

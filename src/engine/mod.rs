// ==========================================
// 预制混凝土质量控制 - 引擎层
// ==========================================
// 职责: 统计、判定、配合比计算、记录生命周期
// 红线: 引擎不做存储与展示，纯计算或内存状态
// ==========================================

pub mod classifier;
pub mod clock;
pub mod error;
pub mod lifecycle;
pub mod mix_calculator;
pub mod statistics;

// 重导出核心引擎
pub use classifier::{
    classify_distance, ControlChart, DeviationClassifier, ParameterCheck, ParameterOutcome,
};
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{LifecycleError, LifecycleResult};
pub use lifecycle::{Ledger, SharedLedger, DEFAULT_EDIT_WINDOW_MINUTES};
pub use mix_calculator::{compute_mix, MixCalculator, DEFAULT_WC_RATIO_LIMIT};
pub use statistics::{checked_ratio, safe_pct, summarize, StatisticsEngine};

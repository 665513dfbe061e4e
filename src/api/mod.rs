// ==========================================
// 预制混凝土质量控制 - API 层
// ==========================================
// 职责: 各检验模块的报表门面，按分组键筛选后委托引擎计算
// ==========================================

pub mod compaction_api;
pub mod cube_test_api;
pub mod curing_api;
pub mod error;
pub mod metric_report;
pub mod moisture_api;
pub mod raw_material_api;
pub mod tension_api;
pub mod weighment_api;

// 重导出核心类型
pub use compaction_api::CompactionApi;
pub use cube_test_api::CubeTestApi;
pub use curing_api::{CuringApi, CuringReport, CycleCheck};
pub use error::{ApiError, ApiResult};
pub use metric_report::{build_metric_report, MetricReport};
pub use moisture_api::MoistureApi;
pub use raw_material_api::{RawMaterialApi, WireVerification};
pub use tension_api::TensionApi;
pub use weighment_api::WeighmentApi;

// ==========================================
// 预制混凝土质量控制 - 领域模型层
// ==========================================
// 职责: 定义读数、参考基准、派生结果、生命周期记录
// 红线: 不含统计/判定逻辑，不含 I/O
// ==========================================

pub mod action_log;
pub mod cube;
pub mod curing;
pub mod mix;
pub mod moisture;
pub mod quality;
pub mod reading;
pub mod record;
pub mod reference;
pub mod types;
pub mod weighment;
pub mod wire;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use cube::{CubeResult, CubeSample, SpecimenKind};
pub use curing::{CuringBands, CuringCycle, CuringParameter};
pub use mix::{BatchMixSummary, ComponentMoisture, MixComponent, MixInput};
pub use moisture::MoistureTest;
pub use quality::{Band, DeviationResult, StatSummary};
pub use reading::{GroupKeys, Grouped, Reading, ReadingFilter};
pub use record::{LifecyclePayload, Record, RecordView};
pub use reference::{ReferenceSpec, SetPoint, SpecLimits};
pub use types::{AggregateFraction, RecordState, SigmaBand, SpecBand};
pub use weighment::{BatchWeighment, ScadaReading};
pub use wire::{TensionReading, WireCoil};

// ==========================================
// 预制混凝土质量控制 - 立方体 / 抗折试件
// ==========================================
// 生命周期: DECLARED (成型申报) -> TESTED (破型检测)
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::reading::GroupKeys;
use crate::domain::record::LifecyclePayload;

/// 试件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpecimenKind {
    Cube,           // 立方体抗压
    FlexuralBeam,   // 抗折 (MF)
}

// ==========================================
// CubeSample - 试件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeSample {
    #[serde(flatten)]
    pub keys: GroupKeys,
    pub sample_no: String,
    pub kind: SpecimenKind,
    pub cast_date: NaiveDate,
    /// 龄期 (天)
    pub age_days: u32,
    /// 破型荷载 (kN)
    #[serde(default)]
    pub failure_load_kn: Option<f64>,
    /// 强度 (MPa)
    #[serde(default)]
    pub strength_mpa: Option<f64>,
    #[serde(default)]
    pub tested_by: Option<String>,
}

impl CubeSample {
    pub fn new(
        keys: GroupKeys,
        sample_no: &str,
        kind: SpecimenKind,
        cast_date: NaiveDate,
        age_days: u32,
    ) -> Self {
        Self {
            keys,
            sample_no: sample_no.to_string(),
            kind,
            cast_date,
            age_days,
            failure_load_kn: None,
            strength_mpa: None,
            tested_by: None,
        }
    }
}

/// 破型结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CubeResult {
    pub failure_load_kn: f64,
    pub strength_mpa: f64,
    pub tested_by: String,
}

impl LifecyclePayload for CubeSample {
    type Outcome = CubeResult;

    fn merge_outcome(&mut self, outcome: CubeResult) {
        self.failure_load_kn = Some(outcome.failure_load_kn);
        self.strength_mpa = Some(outcome.strength_mpa);
        self.tested_by = Some(outcome.tested_by);
    }

    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

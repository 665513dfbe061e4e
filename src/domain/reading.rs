// ==========================================
// 预制混凝土质量控制 - 过程读数
// ==========================================
// 读数创建后不可变; 更正 = 新建读数 + 删除旧记录
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// GroupKeys - 分组键
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GroupKeys {
    #[serde(default)]
    pub batch_no: Option<String>, // 批次号
    #[serde(default)]
    pub grade: Option<String>, // 混凝土等级 (如 M55)
    #[serde(default)]
    pub chamber: Option<String>, // 养护室
    #[serde(default)]
    pub bench: Option<String>, // 台座 / 张拉线
}

impl GroupKeys {
    pub fn batch(batch_no: &str) -> Self {
        Self {
            batch_no: Some(batch_no.to_string()),
            ..Self::default()
        }
    }

    pub fn with_grade(mut self, grade: &str) -> Self {
        self.grade = Some(grade.to_string());
        self
    }

    pub fn with_chamber(mut self, chamber: &str) -> Self {
        self.chamber = Some(chamber.to_string());
        self
    }

    pub fn with_bench(mut self, bench: &str) -> Self {
        self.bench = Some(bench.to_string());
        self
    }
}

// ==========================================
// Reading - 过程读数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub value: f64,
    #[serde(default)]
    pub timestamp: Option<NaiveDateTime>,
    #[serde(default, flatten)]
    pub keys: GroupKeys,
}

impl Reading {
    pub fn new(value: f64, keys: GroupKeys) -> Self {
        Self {
            value,
            timestamp: None,
            keys,
        }
    }
}

/// 按读数提供分组键的实体（读数、申报记录等）
pub trait Grouped {
    fn group_keys(&self) -> &GroupKeys;
}

impl Grouped for Reading {
    fn group_keys(&self) -> &GroupKeys {
        &self.keys
    }
}

// ==========================================
// ReadingFilter - 筛选条件
// ==========================================
// None 表示通配
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingFilter {
    #[serde(default)]
    pub batch_no: Option<String>,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub chamber: Option<String>,
    #[serde(default)]
    pub bench: Option<String>,
}

impl ReadingFilter {
    /// 不做筛选
    pub fn all() -> Self {
        Self::default()
    }

    pub fn batch(batch_no: &str) -> Self {
        Self {
            batch_no: Some(batch_no.to_string()),
            ..Self::default()
        }
    }

    pub fn grade(grade: &str) -> Self {
        Self {
            grade: Some(grade.to_string()),
            ..Self::default()
        }
    }

    pub fn chamber(chamber: &str) -> Self {
        Self {
            chamber: Some(chamber.to_string()),
            ..Self::default()
        }
    }

    pub fn bench(bench: &str) -> Self {
        Self {
            bench: Some(bench.to_string()),
            ..Self::default()
        }
    }

    /// 判断分组键是否命中
    pub fn matches(&self, keys: &GroupKeys) -> bool {
        fn hit(want: &Option<String>, have: &Option<String>) -> bool {
            match want {
                None => true,
                Some(w) => have.as_deref() == Some(w.as_str()),
            }
        }

        hit(&self.batch_no, &keys.batch_no)
            && hit(&self.grade, &keys.grade)
            && hit(&self.chamber, &keys.chamber)
            && hit(&self.bench, &keys.bench)
    }

    /// 筛选并返回引用
    pub fn apply<'a, T: Grouped>(&self, items: &'a [T]) -> Vec<&'a T> {
        items
            .iter()
            .filter(|item| self.matches(item.group_keys()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wildcard_filter_matches_everything() {
        let keys = GroupKeys::batch("B001").with_grade("M55");
        assert!(ReadingFilter::all().matches(&keys));
        assert!(ReadingFilter::all().matches(&GroupKeys::default()));
    }

    #[test]
    fn test_filter_requires_every_populated_key() {
        let keys = GroupKeys::batch("B001").with_grade("M55");

        let mut filter = ReadingFilter::batch("B001");
        assert!(filter.matches(&keys));

        filter.grade = Some("M60".to_string());
        assert!(!filter.matches(&keys));

        // 读数缺少该键时不命中
        assert!(!ReadingFilter::chamber("C1").matches(&keys));
    }

    #[test]
    fn test_apply_keeps_order() {
        let readings = vec![
            Reading::new(1.0, GroupKeys::batch("B1")),
            Reading::new(2.0, GroupKeys::batch("B2")),
            Reading::new(3.0, GroupKeys::batch("B1")),
        ];
        let hits = ReadingFilter::batch("B1").apply(&readings);
        let values: Vec<f64> = hits.iter().map(|r| r.value).collect();
        assert_eq!(values, vec![1.0, 3.0]);
    }

    #[test]
    fn test_reading_deserializes_flattened_keys() {
        let reading: Reading =
            serde_json::from_str(r#"{"value": 8900.0, "batch_no": "B7", "bench": "L2"}"#).unwrap();
        assert_eq!(reading.value, 8900.0);
        assert_eq!(reading.keys.batch_no.as_deref(), Some("B7"));
        assert_eq!(reading.keys.bench.as_deref(), Some("L2"));
        assert!(reading.timestamp.is_none());
    }
}

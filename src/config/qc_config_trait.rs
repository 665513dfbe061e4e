// ==========================================
// 预制混凝土质量控制 - 质控配置读取 Trait
// ==========================================
// 职责: 定义报表门面所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================
// 实现者: ConfigManager（键值存储）；测试中为 MockConfig
// ==========================================

use chrono::Duration;

use crate::domain::curing::CuringBands;
use crate::domain::reference::SpecLimits;

pub trait QcConfigReader: Send + Sync {
    /// 编辑窗口（分钟）
    ///
    /// # 默认值
    /// - 60
    fn edit_window_minutes(&self) -> i64;

    /// 指定指标的容差（百分比）
    ///
    /// # 默认值
    /// - 3.0
    fn tolerance_pct(&self, metric: &str) -> f64;

    /// 指定指标的规格上下限，未配置且无内置默认值时为 None
    fn spec_limits(&self, metric: &str) -> Option<SpecLimits>;

    /// 水灰比上限
    ///
    /// # 默认值
    /// - 0.40
    fn wc_ratio_limit(&self) -> f64;

    /// 蒸汽养护七项参数区间
    fn curing_bands(&self) -> CuringBands;

    fn edit_window(&self) -> Duration {
        Duration::minutes(self.edit_window_minutes())
    }
}

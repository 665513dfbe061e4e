// ==========================================
// 预制混凝土质量控制 - 描述统计引擎
// ==========================================
// 输入: 数值样本
// 输出: StatSummary (count/min/max/mean/std_dev/median/cv)
// 红线: 标准差采用总体公式 (除以 n)，与西格玛分级保持一致
// 红线: 零分母一律取 0，不产生 NaN / Infinity
// ==========================================

use crate::domain::quality::StatSummary;

// ==========================================
// 零分母安全运算
// ==========================================

/// 百分比: numerator / denominator * 100，分母为 0 时返回 0
pub fn safe_pct(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let pct = numerator / denominator * 100.0;
    if pct.is_finite() {
        pct
    } else {
        0.0
    }
}

/// 比值: numerator / denominator，分母为 0 时无定义
pub fn checked_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

// ==========================================
// StatisticsEngine - 描述统计引擎
// ==========================================
pub struct StatisticsEngine {
    // 无状态引擎
}

impl StatisticsEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算描述统计
    ///
    /// - 空样本返回全 0 摘要，不报错
    /// - 中位数在排序副本上计算，不修改输入
    /// - cv = std_dev / mean * 100，均值为 0 时取 0
    /// - NaN / Infinity 读数不参与统计
    pub fn summarize(&self, values: &[f64]) -> StatSummary {
        let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if finite.len() != values.len() {
            tracing::warn!(
                dropped = values.len() - finite.len(),
                "样本含非有限值，已剔除"
            );
        }
        let values = finite.as_slice();

        let count = values.len();
        if count == 0 {
            return StatSummary::default();
        }

        let n = count as f64;
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        // 全部相等时直接取该值，避免累加误差产生非零标准差
        let (mean, std_dev) = if min == max {
            (min, 0.0)
        } else {
            let mean = values.iter().sum::<f64>() / n;
            let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
            (mean, variance.sqrt())
        };

        // 浮点累加误差可能让均值略微越出 [min, max]
        let mean = mean.clamp(min, max);

        StatSummary {
            count,
            min,
            max,
            mean,
            std_dev,
            median: self.median(values),
            cv: safe_pct(std_dev, mean),
        }
    }

    /// 中位数: 偶数个取中间两值均值，奇数个取中间值
    pub fn median(&self, values: &[f64]) -> f64 {
        if values.is_empty() {
            return 0.0;
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        }
    }
}

impl Default for StatisticsEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 便捷函数，等价于 `StatisticsEngine::new().summarize(values)`
pub fn summarize(values: &[f64]) -> StatSummary {
    StatisticsEngine::new().summarize(values)
}

// ==========================================
// StatisticsEngine 引擎集成测试
// ==========================================
// 测试目标: 描述统计的数值口径（总体方差、中位数、变异系数）
// ==========================================

use precast_qc::domain::quality::StatSummary;
use precast_qc::engine::statistics::{checked_ratio, safe_pct, summarize, StatisticsEngine};

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn test_six_cement_weights_summary() {
    let summary = summarize(&[432.0, 434.0, 430.0, 436.0, 431.0, 433.0]);

    assert_eq!(summary.count, 6);
    assert_eq!(summary.min, 430.0);
    assert_eq!(summary.max, 436.0);
    assert!(approx(summary.mean, 2596.0 / 6.0));
    assert_eq!(summary.median, 432.5);
    assert!(summary.std_dev > 0.0);
    assert!(approx(summary.cv, summary.std_dev / summary.mean * 100.0));
}

#[test]
fn test_population_not_sample_variance() {
    // 总体标准差 = 2，样本标准差约为 2.138
    let summary = summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]);
    assert!(approx(summary.std_dev, 2.0));
}

#[test]
fn test_single_value() {
    let summary = summarize(&[58.3]);
    assert_eq!(summary.count, 1);
    assert_eq!(summary.mean, 58.3);
    assert_eq!(summary.median, 58.3);
    assert_eq!(summary.std_dev, 0.0);
    assert_eq!(summary.cv, 0.0);
}

#[test]
fn test_empty_is_zero_summary() {
    assert_eq!(summarize(&[]), StatSummary::default());
}

#[test]
fn test_zero_mean_cv_is_zero() {
    let summary = summarize(&[-1.0, 1.0]);
    assert_eq!(summary.mean, 0.0);
    assert_eq!(summary.std_dev, 1.0);
    assert_eq!(summary.cv, 0.0);
}

#[test]
fn test_median_does_not_reorder_input() {
    let engine = StatisticsEngine::new();
    let values = vec![5.0, 1.0, 3.0];
    assert_eq!(engine.median(&values), 3.0);
    assert_eq!(values, vec![5.0, 1.0, 3.0]);
}

#[test]
fn test_non_finite_readings_are_ignored() {
    let summary = summarize(&[f64::NAN, 10.0, f64::INFINITY, 12.0]);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.mean, 11.0);

    let all_bad = summarize(&[f64::NAN, f64::NEG_INFINITY]);
    assert_eq!(all_bad, StatSummary::default());
}

#[test]
fn test_zero_denominator_helpers() {
    assert_eq!(safe_pct(5.0, 0.0), 0.0);
    assert_eq!(checked_ratio(5.0, 0.0), None);
    assert_eq!(checked_ratio(170.0, 400.0), Some(0.425));
}

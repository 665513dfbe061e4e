// ==========================================
// DeviationClassifier 引擎集成测试
// ==========================================
// 测试目标: 设定值偏差、西格玛分级、异常值、规格限合格率
// ==========================================

use precast_qc::domain::curing::{CuringBands, CuringParameter};
use precast_qc::domain::quality::Band;
use precast_qc::domain::reference::{ReferenceSpec, SpecLimits};
use precast_qc::domain::types::{SigmaBand, SpecBand};
use precast_qc::engine::classifier::{ControlChart, DeviationClassifier};
use precast_qc::engine::statistics::summarize;

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[test]
fn test_cement_deviation_scenario() {
    let classifier = DeviationClassifier::new();
    let values = [432.0, 434.0, 430.0, 436.0, 431.0, 433.0];
    let (_, results) = classifier.evaluate_all(&values, &ReferenceSpec::set_point(430.0, 3.0));

    let deviations: Vec<f64> = results.iter().map(|r| round2(r.deviation_pct)).collect();
    assert_eq!(deviations, vec![0.47, 0.93, 0.0, 1.40, 0.23, 0.70]);

    let mean_dev = results.iter().map(|r| r.deviation_pct).sum::<f64>() / results.len() as f64;
    assert_eq!(round2(mean_dev), 0.62);
    assert!(results.iter().all(|r| !r.outlier));
}

#[test]
fn test_on_target_value_is_always_normal() {
    let summary = summarize(&[420.0, 430.0, 445.0]);
    let chart = ControlChart::on_target(430.0, &summary);
    assert_eq!(chart.classify(430.0), SigmaBand::Normal);

    let flat = summarize(&[500.0, 500.0]);
    assert_eq!(ControlChart::on_target(430.0, &flat).classify(430.0), SigmaBand::Normal);
}

#[test]
fn test_sigma_band_monotonic_in_distance() {
    let chart = ControlChart::new(100.0, 4.0);
    let mut previous = SigmaBand::Normal;
    for step in 0..=200 {
        let value = 100.0 + step as f64 * 0.1;
        let band = chart.classify(value);
        assert!(band >= previous, "value={} band={} previous={}", value, band, previous);
        previous = band;
    }
    assert_eq!(previous, SigmaBand::OutOfControl);
}

#[test]
fn test_sigma_band_uses_batch_mean() {
    let classifier = DeviationClassifier::new();
    let summary = summarize(&[10.0, 10.0, 10.0, 10.0, 20.0]);
    // mean = 12, sd = 4
    assert_eq!(classifier.classify_sigma(12.0, &summary), SigmaBand::Normal);
    assert_eq!(classifier.classify_sigma(20.0, &summary), SigmaBand::Warning);
    assert_eq!(classifier.classify_sigma(24.5, &summary), SigmaBand::OutOfControl);
}

#[test]
fn test_vibration_pct_within_spec() {
    let classifier = DeviationClassifier::new();
    let limits = SpecLimits::new(8640.0, 9360.0);
    let values = [8900.0, 9050.0, 9400.0, 8600.0];

    assert_eq!(classifier.pct_within_spec(&values, &limits), 50.0);
    assert_eq!(classifier.classify_spec(9400.0, &limits), SpecBand::AboveUsl);
    assert_eq!(classifier.classify_spec(8600.0, &limits), SpecBand::BelowLsl);
}

#[test]
fn test_spec_limits_take_precedence_for_band() {
    let classifier = DeviationClassifier::new();
    let spec = ReferenceSpec::set_point(9000.0, 3.0).with_limits(SpecLimits::new(8640.0, 9360.0));
    let (_, results) = classifier.evaluate_all(&[9000.0, 9400.0], &spec);

    assert_eq!(results[0].band, Band::Spec(SpecBand::WithinSpec));
    assert_eq!(results[1].band, Band::Spec(SpecBand::AboveUsl));
    // 9400 偏差 4.44% > 3%
    assert!(results[1].outlier);
}

#[test]
fn test_curing_cycle_seven_checks() {
    let classifier = DeviationClassifier::new();
    let bands = CuringBands::default();
    let values = [3.0, 2.5, 16.0, 58.0, 5.0, 2.0, 12.0];

    let check = classifier.check_parameters(
        CuringParameter::ALL
            .iter()
            .zip(values.iter())
            .map(|(p, v)| (*p, *v, bands.limits_of(*p))),
    );

    assert_eq!(check.outcomes.len(), 7);
    assert_eq!(check.failing_count, 1);
    assert_eq!(check.failing(), vec![CuringParameter::RiseRate]);
}

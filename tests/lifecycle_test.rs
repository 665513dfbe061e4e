// ==========================================
// 记录生命周期集成测试
// ==========================================
// 测试目标: 申报/检测/见证、编辑窗口、终态不可回退
// 时钟: ManualClock 模拟时间流逝
// ==========================================


use chrono::{Duration, NaiveDate};
use precast_qc::domain::cube::{CubeResult, CubeSample, SpecimenKind};
use precast_qc::domain::reading::{GroupKeys, ReadingFilter};
use precast_qc::domain::types::RecordState;
use precast_qc::engine::clock::Clock;
use precast_qc::engine::error::LifecycleError;
use precast_qc::engine::lifecycle::{Ledger, SharedLedger};
use test_helpers::{cement, manual_clock};

fn sample(no: &str) -> CubeSample {
    CubeSample::new(
        GroupKeys::batch("B7").with_grade("M55"),
        no,
        SpecimenKind::Cube,
        NaiveDate::from_ymd_opt(2026, 2, 22).unwrap(),
        7,
    )
}

fn result(strength: f64) -> CubeResult {
    CubeResult {
        failure_load_kn: strength * 22.5,
        strength_mpa: strength,
        tested_by: "QC-01".to_string(),
    }
}

#[test]
fn test_declare_then_window_elapses() {
    let clock = manual_clock();
    let mut ledger: Ledger<CubeSample> = Ledger::with_window_minutes(clock.clone(), 60);

    let rec = ledger.declare(sample("S1"));
    assert!(ledger.can_modify(&rec));

    clock.advance(Duration::minutes(59));
    assert!(ledger.can_modify(&rec));

    clock.advance(Duration::minutes(1));
    assert!(!ledger.can_modify(&rec));
}

#[test]
fn test_declared_record_locks_before_testing() {
    let clock = manual_clock();
    let mut ledger: Ledger<CubeSample> = Ledger::with_window_minutes(clock.clone(), 60);
    let rec = ledger.declare(sample("S1"));

    clock.advance(Duration::hours(2));
    let err = ledger.modify(&rec.id, |s| s.age_days = 28).unwrap_err();
    assert!(err.is_locked());

    // 锁定不影响检测流转，流转后开启新窗口
    let tested = ledger.transition(&rec.id, result(58.0)).unwrap();
    assert_eq!(tested.state, RecordState::Tested);
    assert_eq!(tested.payload.strength_mpa, Some(58.0));
    assert!(ledger.can_modify(&tested));
}

#[test]
fn test_transition_on_terminal_record_is_rejected() {
    let clock = manual_clock();
    let mut ledger: Ledger<CubeSample> = Ledger::with_window_minutes(clock, 60);
    let rec = ledger.declare(sample("S1"));
    ledger.transition(&rec.id, result(58.0)).unwrap();

    let err = ledger.transition(&rec.id, result(40.0)).unwrap_err();
    assert!(matches!(err, LifecycleError::InvalidState { .. }));
    assert_eq!(ledger.completed().len(), 1);
    assert_eq!(ledger.completed()[0].payload.strength_mpa, Some(58.0));
}

#[test]
fn test_record_never_in_both_collections() {
    let clock = manual_clock();
    let mut ledger: Ledger<CubeSample> = Ledger::with_window_minutes(clock, 60);
    let ids: Vec<String> = (0..5).map(|i| ledger.declare(sample(&format!("S{}", i))).id).collect();

    ledger.transition(&ids[1], result(50.0)).unwrap();
    ledger.transition(&ids[3], result(52.0)).unwrap();

    for id in &ids {
        let in_pending = ledger.pending().iter().any(|r| &r.id == id);
        let in_completed = ledger.completed().iter().any(|r| &r.id == id);
        assert!(in_pending ^ in_completed, "id={}", id);
    }
    assert_eq!(ledger.pending().len(), 3);
    assert_eq!(ledger.completed().len(), 2);
}

#[test]
fn test_manual_weighment_locks_after_window() {
    let clock = manual_clock();
    let mut ledger = Ledger::with_window_minutes(clock.clone(), 60);
    let rec = ledger.record_manual(cement("B1", 432.0));
    assert_eq!(rec.state, RecordState::Manual);
    assert_eq!(rec.terminal_at, Some(clock.now()));

    clock.advance(Duration::minutes(61));
    let err = ledger.delete(&rec.id).unwrap_err();
    assert!(matches!(err, LifecycleError::PermissionDenied { window_minutes: 60, .. }));
    assert_eq!(ledger.len(), 1);
}

#[test]
fn test_views_share_one_clock_reading() {
    let clock = manual_clock();
    let mut ledger = Ledger::with_window_minutes(clock.clone(), 60);
    ledger.record_manual(cement("B1", 432.0));
    clock.advance(Duration::minutes(30));
    ledger.record_manual(cement("B1", 431.0));
    clock.advance(Duration::minutes(30));

    let views = ledger.views(&ReadingFilter::batch("B1"));
    assert_eq!(views.len(), 2);
    assert!(!views[0].can_modify);
    assert!(views[1].can_modify);
}

#[test]
fn test_shared_ledger_single_transition_wins() {
    let clock = manual_clock();
    let shared = SharedLedger::new(Ledger::with_window_minutes(clock, 60));
    let rec = shared.declare(sample("S1")).unwrap();

    let handles: Vec<_> = (0..6)
        .map(|i| {
            let shared = shared.clone();
            let id = rec.id.clone();
            std::thread::spawn(move || shared.transition(&id, result(50.0 + i as f64)).is_ok())
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(shared.counts().unwrap(), (0, 1));
}

#[test]
fn test_shared_ledger_witnesses_source_once_across_threads() {
    let clock = manual_clock();
    let shared = SharedLedger::new(Ledger::with_window_minutes(clock, 60));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let shared = shared.clone();
            std::thread::spawn(move || shared.witness("SCADA-0001", cement("B1", 430.0)).is_ok())
        })
        .collect();
    let successes = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|ok| *ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(shared.counts().unwrap(), (0, 1));

    let err = shared.witness("SCADA-0001", cement("B1", 430.0)).unwrap_err();
    assert!(matches!(err, LifecycleError::DuplicateSource { .. }));
}

#[test]
fn test_shared_ledger_history_tracks_actions() {
    let clock = manual_clock();
    let ledger = Ledger::new(clock.clone(), Duration::minutes(60));
    let shared: SharedLedger<CubeSample> = SharedLedger::new(ledger);
    let rec = shared.declare(sample("S1")).unwrap();
    shared.transition(&rec.id, result(55.0)).unwrap();

    let history = shared.history().unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].state_before, Some(RecordState::Declared));
    assert_eq!(history[1].state_after, Some(RecordState::Tested));
    assert_eq!(shared.edit_window().unwrap(), Duration::minutes(60));
}

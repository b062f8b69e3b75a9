use std::path::PathBuf;

use chrono::Utc;
use shiftwatch_common::config::AnalysisConfig;
use shiftwatch_processing_core::pipeline::ShiftAnalyzer;
use shiftwatch_processing_core::velocity::{VelocityConfig, VelocityEstimator};
use shiftwatch_trajectory_model::activity::{ActivityInterval, ActivityStatus};
use shiftwatch_trajectory_model::pose::{parse_poses, PoseSample};
use shiftwatch_trajectory_model::shift::{ShiftKind, ShiftWindow};
use shiftwatch_trajectory_model::stop::StopClass;

const SEC: i64 = 1_000_000_000;

// 2024-11-25T06:00:00Z
const SHIFT_START: i64 = 1_732_514_400 * SEC;

fn load_fixture_poses() -> Vec<PoseSample> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-shift")
        .join("poses.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture poses should be readable");
    parse_poses(&content).expect("fixture poses should parse")
}

fn fixture_config() -> AnalysisConfig {
    AnalysisConfig {
        subsampling_stride: 1,
        min_activity_gap_ns: 120 * SEC,
        long_stop_ns: 300 * SEC,
        ..Default::default()
    }
}

fn at(secs: i64) -> i64 {
    SHIFT_START + secs * SEC
}

#[test]
fn fixture_shift_window_is_day_shift() {
    let poses = load_fixture_poses();
    assert_eq!(poses.len(), 1195);

    let window = ShiftWindow::for_session(poses[0].timestamp_ns, ShiftKind::Day, &Utc).unwrap();
    assert_eq!(window, ShiftWindow::new(at(0), at(12 * 3600)));
}

#[test]
fn fixture_velocity_rejects_dropout_and_relocalization() {
    let poses = load_fixture_poses();
    let estimator = VelocityEstimator::new(VelocityConfig {
        subsampling_stride: 1,
        ..Default::default()
    });
    let profile = estimator.estimate(&poses).unwrap();

    assert_eq!(profile.samples.len(), 1192);
    assert_eq!(profile.rejected_count(), 2);
    assert_eq!(profile.motion_timestamps(0.05).len(), 352);
    assert_eq!(
        profile.data_mask.iter().filter(|&&m| m).count(),
        profile.samples.len()
    );
}

#[test]
fn fixture_activity_intervals_are_stable() {
    let poses = load_fixture_poses();
    let window = ShiftWindow::for_session(poses[0].timestamp_ns, ShiftKind::Day, &Utc).unwrap();
    let report = ShiftAnalyzer::new(fixture_config())
        .unwrap()
        .analyze(&poses, window)
        .unwrap();

    assert_eq!(
        report.activity,
        vec![
            ActivityInterval::inactive(at(0), at(1800)),
            ActivityInterval::active(at(1800), at(1918)),
            ActivityInterval::inactive(at(1918), at(2105)),
            ActivityInterval::active(at(2105), at(2278)),
            ActivityInterval::inactive(at(2278), at(2939)),
            ActivityInterval::active(at(2939), at(2998)),
            ActivityInterval::inactive(at(2998), at(12 * 3600)),
        ]
    );
    assert_eq!(report.summary.active_ns, (118 + 173 + 59) * SEC);
    assert_eq!(
        report.summary.active_ns + report.summary.inactive_ns,
        window.duration_ns()
    );
    assert!(report
        .activity
        .windows(2)
        .all(|w| w[0].status != w[1].status && w[0].end_ns == w[1].start_ns));
    assert_eq!(report.activity[0].status, ActivityStatus::Inactive);
}

#[test]
fn fixture_stops_are_stable() {
    let poses = load_fixture_poses();
    let window = ShiftWindow::for_session(poses[0].timestamp_ns, ShiftKind::Day, &Utc).unwrap();
    let report = ShiftAnalyzer::new(fixture_config())
        .unwrap()
        .analyze(&poses, window)
        .unwrap();

    assert_eq!(report.stops.len(), 2);

    let dock = report.stops[0];
    assert_eq!(dock.stop.start_ns, at(1920));
    assert_eq!(dock.stop.end_ns, at(2099));
    assert!((dock.stop.x - 95.9982).abs() < 1e-9);
    assert!((dock.stop.y + 0.0014).abs() < 1e-9);
    assert_eq!(dock.class, StopClass::Short);

    let idle = report.stops[1];
    assert_eq!(idle.stop.start_ns, at(2280));
    assert_eq!(idle.stop.end_ns, at(2939));
    assert!((idle.stop.x - 69.5118).abs() < 1e-9);
    assert!((idle.stop.y - 66.998).abs() < 1e-9);
    assert_eq!(idle.class, StopClass::Long);

    assert_eq!(report.summary.long_stop_count, 1);
}

#[test]
fn fixture_report_serializes_to_json() {
    let poses = load_fixture_poses();
    let window = ShiftWindow::for_session(poses[0].timestamp_ns, ShiftKind::Day, &Utc).unwrap();
    let report = ShiftAnalyzer::new(fixture_config())
        .unwrap()
        .analyze(&poses, window)
        .unwrap();

    let json = serde_json::to_string(&report).unwrap();
    assert!(json.contains("\"status\":\"active\""));
    assert!(json.contains("\"class\":\"long\""));
    assert!(!json.contains("\"trajectory\""));

    let parsed: shiftwatch_processing_core::ShiftReport = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.activity, report.activity);
    assert_eq!(parsed.summary, report.summary);
    assert_eq!(parsed.stops.len(), report.stops.len());
}

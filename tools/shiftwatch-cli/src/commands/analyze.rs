//! Analyze a vehicle pose log for one shift.

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use shiftwatch_common::clock::{format_duration_ns, format_timestamp_ns, secs_to_ns};
use shiftwatch_common::config::AppConfig;
use shiftwatch_processing_core::activity::active_only;
use shiftwatch_processing_core::pipeline::{ShiftAnalyzer, ShiftReport};
use shiftwatch_trajectory_model::activity::StoredActivity;
use shiftwatch_trajectory_model::shift::{ShiftKind, ShiftWindow};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Path to the JSONL pose log
    pub path: PathBuf,

    /// Vehicle identifier recorded in the report
    #[arg(long)]
    pub vehicle_id: u32,

    /// Shift the log belongs to: day (06-18) or night (18-06)
    #[arg(long)]
    pub shift: ShiftKind,

    /// Config file (defaults to $XDG_CONFIG_HOME/shiftwatch/config.json)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Keep every k-th pose before differencing
    #[arg(long)]
    pub stride: Option<usize>,

    /// Largest trusted time step between retained poses (seconds)
    #[arg(long)]
    pub max_gap_secs: Option<f64>,

    /// Per-step displacement (m) below which the vehicle is stationary
    #[arg(long)]
    pub static_threshold: Option<f64>,

    /// Breaks shorter than this (seconds) do not end an activity run
    #[arg(long)]
    pub min_gap_secs: Option<f64>,

    /// Stops at least this long (seconds) are long stops
    #[arg(long)]
    pub long_stop_secs: Option<f64>,

    /// Only analyze poses in this reference frame category (e.g. FiducialWorld)
    #[arg(long)]
    pub frame_category: Option<String>,

    /// Site UTC offset in minutes (defaults to the host time zone)
    #[arg(long, allow_hyphen_values = true)]
    pub utc_offset_minutes: Option<i32>,

    /// Keep only active intervals and emit them as activity table rows
    #[arg(long)]
    pub active_only: bool,

    /// Include per-sample velocities in the report
    #[arg(long)]
    pub trajectory: bool,

    /// Write the JSON report to this file
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the JSON report to stdout instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Report as handed to the persistence collaborator.
#[derive(Serialize)]
struct VehicleShiftReport {
    vehicle_id: u32,
    shift: ShiftKind,
    #[serde(flatten)]
    report: ShiftReport,
    /// Activity table rows; filled only with `--active-only`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    stored_activity: Vec<StoredActivity>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let mut config = match &args.config {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {e}", path.display()))?,
        None => AppConfig::load(),
    };
    apply_overrides(&mut config, &args);

    let poses = super::load_poses(&args.path)?;
    let Some(first) = poses.first() else {
        anyhow::bail!("Pose log {} is empty", args.path.display());
    };

    let window = match config.shift.fixed_offset()? {
        Some(offset) => ShiftWindow::for_session(first.timestamp_ns, args.shift, &offset),
        None => ShiftWindow::for_session(first.timestamp_ns, args.shift, &chrono::Local),
    }?;

    let analyzer = ShiftAnalyzer::new(config.analysis)?;
    let mut report = analyzer.analyze(&poses, window)?;
    let mut stored_activity = Vec::new();
    if args.active_only {
        report.activity = active_only(&report.activity);
        stored_activity = report.activity.iter().map(StoredActivity::from).collect();
    }

    let output = VehicleShiftReport {
        vehicle_id: args.vehicle_id,
        shift: args.shift,
        report,
        stored_activity,
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_summary(&output);
    }

    if let Some(path) = &args.output {
        std::fs::write(path, serde_json::to_string_pretty(&output)?)?;
        if !args.json {
            println!("\n  Report saved to: {}", path.display());
        }
    }

    Ok(())
}

fn apply_overrides(config: &mut AppConfig, args: &AnalyzeArgs) {
    let analysis = &mut config.analysis;
    if let Some(stride) = args.stride {
        analysis.subsampling_stride = stride;
    }
    if let Some(secs) = args.max_gap_secs {
        analysis.max_gap_ns = secs_to_ns(secs);
    }
    if let Some(threshold) = args.static_threshold {
        analysis.static_threshold = threshold;
    }
    if let Some(secs) = args.min_gap_secs {
        analysis.min_activity_gap_ns = secs_to_ns(secs);
    }
    if let Some(secs) = args.long_stop_secs {
        analysis.long_stop_ns = secs_to_ns(secs);
    }
    if let Some(category) = &args.frame_category {
        analysis.frame_category = Some(category.clone());
    }
    if args.trajectory {
        analysis.record_trajectory = true;
    }
    if let Some(minutes) = args.utc_offset_minutes {
        config.shift.utc_offset_minutes = Some(minutes);
    }
}

fn print_summary(output: &VehicleShiftReport) {
    let report = &output.report;
    let summary = &report.summary;

    println!("Vehicle {}: {} shift", output.vehicle_id, output.shift);
    println!(
        "  Window: {} → {}",
        format_timestamp_ns(report.window.start_ns),
        format_timestamp_ns(report.window.end_ns)
    );
    println!(
        "  Poses: {} ({} analyzed), velocity pairs: {} valid / {} rejected",
        summary.poses, summary.analyzed_poses, summary.valid_pairs, summary.rejected_pairs
    );
    println!(
        "  Active: {}   Inactive: {}",
        format_duration_ns(summary.active_ns),
        format_duration_ns(summary.inactive_ns)
    );

    println!("\nActivity:");
    for interval in &report.activity {
        println!(
            "  {} {} → {} ({})",
            interval.status,
            format_timestamp_ns(interval.start_ns),
            format_timestamp_ns(interval.end_ns),
            format_duration_ns(interval.duration_ns())
        );
    }

    println!(
        "\nStops: {} ({} long)",
        summary.stop_count, summary.long_stop_count
    );
    for stop in &report.stops {
        println!(
            "  {:?} at ({:.2}, {:.2}) {} for {}",
            stop.class,
            stop.stop.x,
            stop.stop.y,
            format_timestamp_ns(stop.stop.start_ns),
            format_duration_ns(stop.stop.duration_ns())
        );
    }
}

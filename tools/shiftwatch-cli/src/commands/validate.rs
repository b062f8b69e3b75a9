//! Validate a pose log.

use std::path::PathBuf;

use shiftwatch_common::clock::{format_timestamp_ns, secs_to_ns};
use shiftwatch_processing_core::validation::validate_poses;

pub fn run(path: PathBuf, max_gap_secs: f64) -> anyhow::Result<()> {
    println!("Validating pose log at: {}", path.display());

    let poses = super::load_poses(&path)?;
    println!("  Poses: {}", poses.len());

    if let Err(e) = validate_poses(&poses) {
        if let Some(pose) = e.offending_index().and_then(|i| poses.get(i)) {
            println!(
                "  Offending sample at {}: ({}, {}) in frame {}",
                format_timestamp_ns(pose.timestamp_ns),
                pose.x,
                pose.y,
                pose.frame
            );
        }
        anyhow::bail!("Pose log is malformed: {e}");
    }

    let max_gap_ns = secs_to_ns(max_gap_secs);
    let mut frame_changes = 0usize;
    let mut dropouts = 0usize;
    for pair in poses.windows(2) {
        if !pair[0].shares_frame_with(&pair[1]) {
            frame_changes += 1;
            println!(
                "  Frame change at {}: {} -> {}",
                format_timestamp_ns(pair[1].timestamp_ns),
                pair[0].frame,
                pair[1].frame
            );
        }
        if pair[1].timestamp_ns - pair[0].timestamp_ns >= max_gap_ns {
            dropouts += 1;
        }
    }

    println!("  Frame changes: {frame_changes}");
    println!("  Tracking gaps >= {max_gap_secs}s: {dropouts}");
    println!("\nPose log is valid.");

    Ok(())
}

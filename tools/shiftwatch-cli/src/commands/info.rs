//! Show pose log statistics.

use std::collections::HashMap;
use std::path::PathBuf;

use shiftwatch_common::clock::{format_duration_ns, format_timestamp_ns, median_interval_ns};
use shiftwatch_trajectory_model::pose::ReferenceFrame;

pub fn run(path: PathBuf) -> anyhow::Result<()> {
    let poses = super::load_poses(&path)?;

    println!("Pose log: {}", path.display());
    println!("  Samples: {}", poses.len());

    let (Some(first), Some(last)) = (poses.first(), poses.last()) else {
        println!("  (empty)");
        return Ok(());
    };

    println!("  First: {}", format_timestamp_ns(first.timestamp_ns));
    println!("  Last: {}", format_timestamp_ns(last.timestamp_ns));
    println!(
        "  Span: {}",
        format_duration_ns(last.timestamp_ns - first.timestamp_ns)
    );

    let timestamps: Vec<i64> = poses.iter().map(|p| p.timestamp_ns).collect();
    if let Some(median) = median_interval_ns(&timestamps) {
        println!("  Median sampling interval: {:.3}s", median as f64 / 1e9);
    }
    println!();

    let mut per_frame: HashMap<ReferenceFrame, usize> = HashMap::new();
    for pose in &poses {
        *per_frame.entry(pose.frame).or_default() += 1;
    }
    let mut frames: Vec<(ReferenceFrame, usize)> = per_frame.into_iter().collect();
    frames.sort_by_key(|(frame, _)| (frame.category.as_str(), frame.index));

    println!("Reference frames:");
    for (frame, count) in frames {
        println!("  {frame}: {count} poses");
    }

    Ok(())
}

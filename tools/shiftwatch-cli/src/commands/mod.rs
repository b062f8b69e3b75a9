pub mod analyze;
pub mod info;
pub mod validate;

use std::path::Path;

use anyhow::Context;
use shiftwatch_trajectory_model::pose::{parse_poses, PoseSample};

/// Read and parse a JSONL pose log.
pub fn load_poses(path: &Path) -> anyhow::Result<Vec<PoseSample>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Pose log not readable: {}", path.display()))?;
    let poses = parse_poses(&content)
        .with_context(|| format!("Failed to parse pose log {}", path.display()))?;
    tracing::debug!(poses = poses.len(), path = %path.display(), "Loaded pose log");
    Ok(poses)
}

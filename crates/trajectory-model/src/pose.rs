//! Pose samples recorded by the vehicle tracking system.
//!
//! Pose logs are stored as JSONL, one sample per line. Positions are only
//! comparable within a single reference frame: the tracker relocalizes from
//! time to time, and every relocalization starts a new frame epoch.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Nanoseconds since the Unix epoch.
pub type TimestampNs = i64;

/// Kind of coordinate frame a pose is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ReferenceFrameCategory {
    /// Odometry frame anchored at session start.
    Session,
    /// Frame anchored to fiducial markers placed in the building.
    FiducialWorld,
    /// Frame of a previously recorded map.
    Map,
}

/// A reference frame epoch: category plus relocalization index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceFrame {
    #[serde(rename = "frame_category")]
    pub category: ReferenceFrameCategory,
    #[serde(rename = "frame_index")]
    pub index: i32,
}

/// A single tracked position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoseSample {
    /// Acquisition time.
    #[serde(rename = "t")]
    pub timestamp_ns: TimestampNs,

    /// X position in meters.
    pub x: f64,

    /// Y position in meters.
    pub y: f64,

    #[serde(flatten)]
    pub frame: ReferenceFrame,
}

/// Unknown reference frame category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown reference frame category: {0:?}")]
pub struct UnknownFrameCategory(pub String);

impl ReferenceFrameCategory {
    pub const ALL: [ReferenceFrameCategory; 3] = [Self::Session, Self::FiducialWorld, Self::Map];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::FiducialWorld => "fiducial_world",
            Self::Map => "map",
        }
    }
}

impl fmt::Display for ReferenceFrameCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReferenceFrameCategory {
    type Err = UnknownFrameCategory;

    /// Accepts `fiducial_world`, `FiducialWorld` and the tracker's
    /// `ReferenceFrameCategory.FiducialWorld` export form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = trimmed
            .strip_prefix("ReferenceFrameCategory.")
            .unwrap_or(trimmed);
        let normalized: String = name
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "session" => Ok(Self::Session),
            "fiducialworld" => Ok(Self::FiducialWorld),
            "map" => Ok(Self::Map),
            _ => Err(UnknownFrameCategory(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReferenceFrameCategory {
    type Error = UnknownFrameCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl ReferenceFrame {
    pub fn new(category: ReferenceFrameCategory, index: i32) -> Self {
        Self { category, index }
    }
}

impl fmt::Display for ReferenceFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.category, self.index)
    }
}

impl PoseSample {
    pub fn new(timestamp_ns: TimestampNs, x: f64, y: f64, frame: ReferenceFrame) -> Self {
        Self {
            timestamp_ns,
            x,
            y,
            frame,
        }
    }

    /// Whether two poses can be differenced: same category and same epoch.
    pub fn shares_frame_with(&self, other: &PoseSample) -> bool {
        self.frame == other.frame
    }
}

/// A pose log line that failed to parse.
#[derive(Debug, thiserror::Error)]
#[error("line {line}: {source}")]
pub struct PoseParseError {
    /// 1-based line number in the input.
    pub line: usize,
    #[source]
    pub source: serde_json::Error,
}

/// Parse poses from JSONL content (one JSON object per line).
///
/// Blank lines and `#` comment lines are skipped.
pub fn parse_poses(jsonl: &str) -> Result<Vec<PoseSample>, PoseParseError> {
    jsonl
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
        .map(|(line, content)| {
            serde_json::from_str(content).map_err(|source| PoseParseError { line, source })
        })
        .collect()
}

/// Serialize poses to JSONL format.
pub fn serialize_poses(poses: &[PoseSample]) -> Result<String, serde_json::Error> {
    let mut output = String::new();
    for pose in poses {
        output.push_str(&serde_json::to_string(pose)?);
        output.push('\n');
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fid(index: i32) -> ReferenceFrame {
        ReferenceFrame::new(ReferenceFrameCategory::FiducialWorld, index)
    }

    #[test]
    fn test_json_format() {
        let pose = PoseSample::new(1_732_514_400_000_000_000, 1.5, -2.0, fid(3));
        let json = serde_json::to_string(&pose).unwrap();
        assert!(json.contains("\"t\":1732514400000000000"));
        assert!(json.contains("\"frame_category\":\"fiducial_world\""));
        assert!(json.contains("\"frame_index\":3"));
    }

    #[test]
    fn test_parse_tracker_category_names() {
        let jsonl = "# vehicle 7\n\
            {\"t\":0,\"x\":0.0,\"y\":0.0,\"frame_category\":\"ReferenceFrameCategory.FiducialWorld\",\"frame_index\":0}\n\
            \n\
            {\"t\":10,\"x\":1.0,\"y\":0.0,\"frame_category\":\"Session\",\"frame_index\":1}\n";
        let poses = parse_poses(jsonl).unwrap();
        assert_eq!(poses.len(), 2);
        assert_eq!(poses[0].frame, fid(0));
        assert_eq!(
            poses[1].frame,
            ReferenceFrame::new(ReferenceFrameCategory::Session, 1)
        );
    }

    #[test]
    fn test_unknown_category_is_an_error() {
        let jsonl = "# header\n{\"t\":0,\"x\":0.0,\"y\":0.0,\"frame_category\":\"Moon\",\"frame_index\":0}";
        let err = parse_poses(jsonl).unwrap_err();
        assert_eq!(err.line, 2);
        assert!("Moon".parse::<ReferenceFrameCategory>().is_err());
    }

    #[test]
    fn test_category_parsing_variants() {
        for category in ReferenceFrameCategory::ALL {
            assert_eq!(category.as_str().parse::<ReferenceFrameCategory>(), Ok(category));
        }
        assert_eq!(
            "fiducial-world".parse::<ReferenceFrameCategory>(),
            Ok(ReferenceFrameCategory::FiducialWorld)
        );
        assert_eq!("MAP".parse::<ReferenceFrameCategory>(), Ok(ReferenceFrameCategory::Map));
    }

    #[test]
    fn test_jsonl_roundtrip() {
        let poses = vec![
            PoseSample::new(0, 0.0, 0.0, fid(0)),
            PoseSample::new(66_000_000, 0.25, 0.5, fid(0)),
            PoseSample::new(132_000_000, 0.5, 1.0, fid(1)),
        ];
        let jsonl = serialize_poses(&poses).unwrap();
        assert_eq!(parse_poses(&jsonl).unwrap(), poses);
    }

    #[test]
    fn test_shares_frame_requires_category_and_index() {
        let a = PoseSample::new(0, 0.0, 0.0, fid(0));
        let b = PoseSample::new(1, 0.0, 0.0, fid(1));
        let c = PoseSample::new(2, 0.0, 0.0, ReferenceFrame::new(ReferenceFrameCategory::Map, 0));
        assert!(a.shares_frame_with(&a));
        assert!(!a.shares_frame_with(&b));
        assert!(!a.shares_frame_with(&c));
    }
}

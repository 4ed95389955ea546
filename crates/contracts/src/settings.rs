//! TeeSettings - Config Loader output
//!
//! Named tee stages declared in a settings file, each carrying the
//! configuration string of the sink it tees to.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConfigVersion {
    #[default]
    V1,
}

/// Complete settings file
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct TeeSettings {
    #[serde(default)]
    pub version: ConfigVersion,

    /// Declared stages
    #[serde(default)]
    #[validate(nested)]
    pub stages: Vec<StageConfig>,
}

/// One decorated host component
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct StageConfig {
    /// Stage name (unique within the file)
    #[validate(length(min = 1, message = "stage name cannot be empty"))]
    pub name: String,

    /// Kind of host component being wrapped
    pub host: HostKind,

    /// Sink configuration string, `Null` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dumper: Option<String>,
}

/// Host kinds a tee decorator can wrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HostKind {
    Trainable,
    Clusterable,
    BatchTransformable,
}

impl HostKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trainable => "trainable",
            Self::Clusterable => "clusterable",
            Self::BatchTransformable => "batch_transformable",
        }
    }
}

impl TeeSettings {
    /// Look up a stage by name
    pub fn stage(&self, name: &str) -> Option<&StageConfig> {
        self.stages.iter().find(|s| s.name == name)
    }
}

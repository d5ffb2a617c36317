use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};

/// Metadata file read from the repository root when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = ".repo-metadata.yaml";

/// Desired repository metadata as declared in `.repo-metadata.yaml`
///
/// `description` and `homepage` keep "unset" (`None`) apart from "set to the
/// empty string" (`Some("")`). Unknown keys are ignored.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Configuration {
    /// Short repository description
    #[serde(default)]
    pub description: Option<String>,

    /// Project homepage URL
    #[serde(default)]
    pub homepage: Option<String>,

    /// Topic tags, in declaration order
    #[serde(default)]
    pub topics: Vec<String>,
}

impl Configuration {
    /// Load configuration from a specific file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_yaml(&content).map_err(|source| Error::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        debug!(
            "Loaded {:?}: description={:?} homepage={:?} topics={:?}",
            path, config.description, config.homepage, config.topics
        );

        Ok(config)
    }

    /// Parse a YAML document; an empty document is the default configuration
    pub fn from_yaml(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

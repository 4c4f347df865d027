//! Application configuration, loaded from JSON.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes:
//!
//! ```json
//! { "axis_order": "r,phi,theta", "bounds": { "angle_tolerance": 1e-9 } }
//! ```

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{AxisOrder, AxisOrderError, BoundsConfig};
use crate::ordering::DEFAULT_SORT_PARALLEL_THRESHOLD;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("invalid axis order: {0}")]
    AxisOrder(#[from] AxisOrderError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub bounds: BoundsConfig,
    pub sort_parallel_threshold: usize,
    /// Native axis order of spherical datasets, e.g. `"r,phi,theta"`.
    pub axis_order: String,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            bounds: BoundsConfig::default(),
            sort_parallel_threshold: DEFAULT_SORT_PARALLEL_THRESHOLD,
            axis_order: AxisOrder::default().to_string(),
        }
    }
}

impl GeometryConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?;
        // surface a bad axis order at load time rather than on first use
        config.axis_order()?;
        log::debug!("Loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    pub fn axis_order(&self) -> Result<AxisOrder, ConfigError> {
        Ok(AxisOrder::parse(&self.axis_order)?)
    }
}

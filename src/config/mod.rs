//! Tool location configuration
//!
//! Trim parameters are never persisted; the only configurable state is
//! where the external binaries live, read from an optional TOML file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{TrimPlanError, TrimPlanResult};

/// Locations of the external media tools
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolPaths {
    /// Transcoder binary
    pub ffmpeg: String,
    /// Probe binary
    pub ffprobe: String,
}

impl Default for ToolPaths {
    fn default() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
        }
    }
}

impl ToolPaths {
    /// Load tool paths from a TOML file
    pub fn load(path: &Path) -> TrimPlanResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| TrimPlanError::ConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let paths: Self = toml::from_str(&raw).map_err(|e| TrimPlanError::ConfigError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        debug!("Loaded tool paths from {}: {:?}", path.display(), paths);
        Ok(paths)
    }

    /// Load from an optional file, falling back to binaries on `PATH`
    pub fn load_or_default(path: Option<&Path>) -> TrimPlanResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_use_path_lookup() {
        let paths = ToolPaths::default();
        assert_eq!(paths.ffmpeg, "ffmpeg");
        assert_eq!(paths.ffprobe, "ffprobe");
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "ffmpeg = \"/opt/media/bin/ffmpeg\"").unwrap();

        let paths = ToolPaths::load(file.path()).unwrap();
        assert_eq!(paths.ffmpeg, "/opt/media/bin/ffmpeg");
        assert_eq!(paths.ffprobe, "ffprobe");
    }

    #[test]
    fn test_load_missing_file_is_an_error() {
        let err = ToolPaths::load(Path::new("/nonexistent/trimplan.toml")).unwrap_err();
        assert!(matches!(err, TrimPlanError::ConfigError { .. }));
    }

    #[test]
    fn test_load_or_default_without_file() {
        let paths = ToolPaths::load_or_default(None).unwrap();
        assert_eq!(paths, ToolPaths::default());
    }
}

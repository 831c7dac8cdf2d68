use std::{fs, path::Path};

use splat_core::pointcloud::decimation::DownsampleOptions;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reads `DownsampleOptions` from a JSON file, e.g.
/// `{"ratio": 0.5, "method": "random", "seed": 42}`.
pub fn load_options(path: &Path) -> Result<DownsampleOptions, ConfigError> {
    let text = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use splat_core::pointcloud::decimation::Method;
    use std::io::Write as _;

    #[test]
    fn reads_json_options() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"ratio": 0.25, "method": "random", "seed": 7}}"#).unwrap();

        let options = load_options(file.path()).unwrap();
        assert_eq!(options.ratio, Some(0.25));
        assert_eq!(options.method, Method::Random);
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.target_count, None);
    }

    #[test]
    fn reports_bad_files() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"method": "voxel"}}"#).unwrap();
        assert!(matches!(
            load_options(file.path()),
            Err(ConfigError::Json(_))
        ));

        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            load_options(&dir.path().join("missing.json")),
            Err(ConfigError::Io(_))
        ));
    }
}

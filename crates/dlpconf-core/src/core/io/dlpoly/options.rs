use super::record::LevelOfDetail;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "CONFIG generated by dlpconf";

/// Settings that control how a configuration is written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct WriteOptions {
    pub title: String,
    pub level_of_detail: LevelOfDetail,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            level_of_detail: LevelOfDetail::Positions,
        }
    }
}

impl WriteOptions {
    pub fn load(path: &Path) -> Result<Self, OptionsLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| OptionsLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| OptionsLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })
    }
}

#[derive(Debug, Error)]
pub enum OptionsLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn load_str(content: &str) -> Result<WriteOptions, OptionsLoadError> {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("write.toml");
        fs::write(&path, content).expect("Failed to write temporary file for test");
        WriteOptions::load(&path)
    }

    #[test]
    fn load_reads_all_keys() {
        let options = load_str("title = \"water box\"\nlevel-of-detail = 2\n").unwrap();
        assert_eq!(options.title, "water box");
        assert_eq!(options.level_of_detail, LevelOfDetail::Forces);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let options = load_str("level-of-detail = 1\n").unwrap();
        assert_eq!(options.title, DEFAULT_TITLE);
        assert_eq!(options.level_of_detail, LevelOfDetail::Velocities);
        assert_eq!(load_str("").unwrap(), WriteOptions::default());
    }

    #[test]
    fn out_of_range_level_is_a_toml_error() {
        assert!(matches!(
            load_str("level-of-detail = 7\n"),
            Err(OptionsLoadError::Toml { .. })
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            load_str("titel = \"typo\"\n"),
            Err(OptionsLoadError::Toml { .. })
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = WriteOptions::load(Path::new("/nonexistent/write.toml")).unwrap_err();
        match err {
            OptionsLoadError::Io { path, .. } => assert!(path.ends_with("write.toml")),
            other => panic!("Expected Io error, got {other:?}"),
        }
    }
}

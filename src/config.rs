use crate::model::MAX_SECTIONS;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Section count the creation form starts with.
    pub default_section_count: usize,
    /// Style tag stamped on every new note.
    pub note_color: String,
    /// Terminals narrower than this stack sections vertically.
    pub narrow_width: u16,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            default_section_count: 2,
            note_color: "enhanced-note".into(),
            narrow_width: 80,
            log_filter: "retro=info".into(),
            log_file: None,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("default_section_count must be between 1 and 4, got {0}")]
    SectionCountOutOfRange(usize),
    #[error("note_color must not be empty")]
    EmptyNoteColor,
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_SECTIONS).contains(&self.default_section_count) {
            return Err(ConfigError::SectionCountOutOfRange(
                self.default_section_count,
            ));
        }
        if self.note_color.trim().is_empty() {
            return Err(ConfigError::EmptyNoteColor);
        }
        Ok(())
    }
}

/// Reads the config at `path`, falling back to defaults when it is missing.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let data = fs::read_to_string(path).with_context(|| format!("reading {:?}", path))?;
    let config: Config = if data.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&data).with_context(|| format!("parsing {:?}", path))?
    };
    config
        .validate()
        .with_context(|| format!("invalid config {:?}", path))?;
    Ok(config)
}

/// Writes a default config unless one is already there.
pub fn init_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).with_context(|| format!("creating {:?}", parent))?;
    }
    let serialized = serde_yaml::to_string(&Config::default()).context("serializing config")?;
    fs::write(path, serialized).with_context(|| format!("writing {:?}", path))?;
    Ok(true)
}

pub fn default_config_path() -> Result<PathBuf> {
    Ok(project_dirs()?.config_dir().join("config.yml"))
}

pub fn default_log_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("retro.log"))
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", "retro").context("locating config directory")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = load_config(&dir.path().join("config.yml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.default_section_count, 2);
        assert_eq!(config.note_color, "enhanced-note");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "default_section_count: 4\n").unwrap();
        let config = load_config(&path).unwrap();
        assert_eq!(config.default_section_count, 4);
        assert_eq!(config.narrow_width, 80);
        assert_eq!(config.log_filter, "retro=info");
    }

    #[test]
    fn test_out_of_range_count_is_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "default_section_count: 7\n").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("between 1 and 4"));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yml");
        fs::write(&path, "default_section_count: [unclosed\n").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_init_writes_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.yml");
        assert!(init_config(&path).unwrap());
        assert!(!init_config(&path).unwrap());
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}

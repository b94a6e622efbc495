use anyhow::Result;
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub database_path: Option<PathBuf>,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    /// Command run with the note id and title when a note is opened
    #[serde(default)]
    pub open_command: Option<String>,
    #[serde(default = "default_min_column_width")]
    pub min_column_width: u16,
    #[serde(default = "default_max_visible_columns")]
    pub max_visible_columns: usize,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
    #[serde(default)]
    pub reduce_motion: bool,
    #[serde(default = "default_repo_timeout_ms")]
    pub repo_timeout_ms: u64,
    #[serde(default = "default_preview_width_percent")]
    pub preview_width_percent: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            app_name: default_app_name(),
            open_command: None,
            min_column_width: default_min_column_width(),
            max_visible_columns: default_max_visible_columns(),
            animation_ms: default_animation_ms(),
            reduce_motion: false,
            repo_timeout_ms: default_repo_timeout_ms(),
            preview_width_percent: default_preview_width_percent(),
        }
    }
}

impl Config {
    pub fn from_yaml(text: &str) -> Result<Self> {
        // An empty file is a valid "all defaults" config
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }
}

fn default_app_name() -> String {
    "notefinder".to_string()
}

fn default_min_column_width() -> u16 {
    24
}

fn default_max_visible_columns() -> usize {
    5
}

fn default_animation_ms() -> u64 {
    180
}

fn default_repo_timeout_ms() -> u64 {
    5000
}

fn default_preview_width_percent() -> u16 {
    30
}

/// Resolve the config file: CLI path, then platform config dir, then ./config.yaml.
/// `Ok(None)` means no file exists and defaults apply.
pub fn find_config_path(cli_path: Option<&str>) -> Result<Option<PathBuf>> {
    if let Some(path) = cli_path {
        let p = PathBuf::from(path);
        if p.exists() {
            return Ok(Some(p));
        }
        anyhow::bail!("Config file not found at specified path: {}", path);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join("notefinder").join("config.yaml");
        if config_path.exists() {
            return Ok(Some(config_path));
        }
    }

    let local_config = PathBuf::from("config.yaml");
    if local_config.exists() {
        return Ok(Some(local_config));
    }

    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config.app_name, "notefinder");
        assert_eq!(config.min_column_width, 24);
        assert_eq!(config.max_visible_columns, 5);
        assert!(!config.reduce_motion);
    }

    #[test]
    fn test_partial_config() {
        let config = Config::from_yaml(
            "open_command: \"code\"\nreduce_motion: true\nmax_visible_columns: 3\n",
        )
        .unwrap();
        assert_eq!(config.open_command.as_deref(), Some("code"));
        assert!(config.reduce_motion);
        assert_eq!(config.max_visible_columns, 3);
        assert_eq!(config.animation_ms, 180);
    }

    #[test]
    fn test_missing_cli_path_is_error() {
        assert!(find_config_path(Some("/definitely/not/here.yaml")).is_err());
    }
}

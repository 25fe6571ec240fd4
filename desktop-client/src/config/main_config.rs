use std::path::PathBuf;

use common::config::{ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer};
use serde::{Deserialize, Serialize};

use super::SnakeConfig;

const CONFIG_FILE_NAME: &str = "snake_desktop_config.yaml";

/// Relative paths are taken relative to the executable's directory.
pub fn resolve_path(path: &str) -> String {
    let candidate = PathBuf::from(path);
    if candidate.is_absolute() {
        return path.to_string();
    }
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(candidate).to_string_lossy().into_owned();
    }
    path.to_string()
}

pub fn get_config_manager(
    path_override: Option<&str>,
) -> ConfigManager<FileContentConfigProvider, Config, YamlConfigSerializer> {
    let path = match path_override {
        Some(path) => path.to_string(),
        None => resolve_path(CONFIG_FILE_NAME),
    };
    ConfigManager::from_yaml_file(&path)
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
pub struct Config {
    pub snake: SnakeConfig,
    pub high_score_file: String,
    #[serde(default = "default_recent_scores")]
    pub recent_scores: usize,
}

fn default_recent_scores() -> usize {
    5
}

impl Validate for Config {
    fn validate(&self) -> Result<(), String> {
        self.snake.validate()?;
        if self.high_score_file.is_empty() {
            return Err("high_score_file must not be empty".to_string());
        }
        if self.recent_scores == 0 || self.recent_scores > 50 {
            return Err("recent_scores must be between 1 and 50".to_string());
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snake: SnakeConfig::default(),
            high_score_file: "snake_high_score.yaml".to_string(),
            recent_scores: default_recent_scores(),
        }
    }
}

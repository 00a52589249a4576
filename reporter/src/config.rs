use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;
use shared::chesscom::DEFAULT_API_URL;

use crate::consts::{DEFAULT_CONFIG_PATH, DEFAULT_FONT_PATH, SUMMARY_FILENAME};

/// Process environment, `.env` included.
#[derive(Debug, Deserialize)]
pub struct Env {
    #[serde(default = "default_config_path")]
    pub config_path: PathBuf,
    #[serde(default = "default_font_path")]
    pub font_path: PathBuf,
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_chess_api_url")]
    pub chess_api_url: String,
    /// Takes precedence over the url in the configuration file.
    pub webhook_url: Option<String>,
}

fn default_config_path() -> PathBuf {
    PathBuf::from(DEFAULT_CONFIG_PATH)
}

fn default_font_path() -> PathBuf {
    PathBuf::from(DEFAULT_FONT_PATH)
}

fn default_output_path() -> PathBuf {
    PathBuf::from(SUMMARY_FILENAME)
}

fn default_chess_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

/// Contents of the JSON configuration file.
#[derive(Debug, Deserialize)]
pub struct FileConfig {
    pub users: Vec<String>,
    #[serde(default)]
    pub webhook_url: String,
}

impl FileConfig {
    pub fn read(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse configuration in {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub users: Vec<String>,
    pub webhook_url: String,
    pub font_path: PathBuf,
    pub output_path: PathBuf,
    pub chess_api_url: String,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let env = envy::from_env::<Env>()?;
        let file = FileConfig::read(&env.config_path)?;
        Self::from_parts(env, file)
    }

    pub fn from_parts(env: Env, file: FileConfig) -> anyhow::Result<Self> {
        let webhook_url = env
            .webhook_url
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(file.webhook_url);
        if webhook_url.trim().is_empty() {
            anyhow::bail!("No webhook url configured");
        }

        let users = file
            .users
            .into_iter()
            .map(|user| user.trim().to_string())
            .filter(|user| !user.is_empty())
            .collect();

        Ok(Self {
            users,
            webhook_url,
            font_path: env.font_path,
            output_path: env.output_path,
            chess_api_url: env.chess_api_url,
        })
    }
}

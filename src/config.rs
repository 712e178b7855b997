use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

const DEFAULT_SINCE_DAYS: u32 = 365;

#[derive(Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_number: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since_days: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| PlannerError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        Self::parse(&contents, config_path)
    }

    fn parse(contents: &str, path: PathBuf) -> Result<Self> {
        toml::from_str(contents).map_err(|e| PlannerError::ConfigParse { path, source: e })
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "planner")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(PlannerError::NoConfigDir)
    }

    /// Get token with env var taking precedence over config file
    pub fn token(&self) -> Result<String> {
        Self::resolve_token(std::env::var("GITHUB_TOKEN").ok(), self.token.as_deref())
    }

    fn resolve_token(from_env: Option<String>, from_file: Option<&str>) -> Result<String> {
        from_env
            .filter(|t| !t.is_empty())
            .or_else(|| from_file.filter(|t| !t.is_empty()).map(String::from))
            .ok_or(PlannerError::MissingToken)
    }

    /// Get owner, preferring explicit argument over config
    pub fn resolve_owner(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .map(String::from)
            .or_else(|| self.owner.clone())
            .ok_or(PlannerError::MissingOwner)
    }

    pub fn resolve_project(&self, explicit: Option<u32>) -> Result<u32> {
        explicit
            .or(self.project_number)
            .ok_or(PlannerError::MissingProject)
    }

    pub fn since_days(&self) -> u32 {
        self.since_days.unwrap_or(DEFAULT_SINCE_DAYS)
    }
}

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Failed to encode GraphQL request: {0}")]
    Encoding(#[source] serde_json::Error),

    #[error("Failed to build HTTP request: {0}")]
    RequestConstruction(#[source] reqwest::Error),

    #[error("HTTP request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("HTTP request cancelled")]
    Cancelled,

    #[error("GitHub API returned non-success status {status}: {message}")]
    HttpStatus {
        status: reqwest::StatusCode,
        message: String,
    },

    #[error("Failed to decode GraphQL response: {0}")]
    Decoding(#[source] serde_json::Error),

    #[error("GraphQL errors: {}", messages.join(", "))]
    GraphQL { messages: Vec<String> },

    #[error("Empty response from API")]
    EmptyResponse,

    #[error("Response reported another page but no end cursor")]
    MissingCursor,

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read config file at {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {path}: {source}")]
    ConfigWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    ConfigSerialize(#[source] toml::ser::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error(
        "No GitHub token found. Set GITHUB_TOKEN env var or add token to ~/.config/planner/config.toml"
    )]
    MissingToken,

    #[error("Owner not specified and no owner in config")]
    MissingOwner,

    #[error("Project number not specified and no project_number in config")]
    MissingProject,

    #[error("Invalid --since value '{0}' (expected RFC 3339 or YYYY-MM-DD)")]
    InvalidSince(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;

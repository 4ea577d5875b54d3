use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced to the front ends.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("failed to write preferences to {path:?}: {source}")]
    PreferencesWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode preferences: {0}")]
    PreferencesEncode(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("could not build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Failures of a single weather lookup. Never leaves the weather client.
#[derive(Error, Debug)]
pub enum WeatherError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("service rejected the request (cod {code}): {message}")]
    Rejected { code: String, message: String },
    #[error("malformed payload: {0}")]
    Malformed(String),
}

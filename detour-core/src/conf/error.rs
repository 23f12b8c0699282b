use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    // IO
    #[error("failed to read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Parsing
    #[error("failed to parse TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    // Rule validation
    #[error("invalid regex in redirect rule {index}: {source}")]
    InvalidRegex {
        index: usize,
        #[source]
        source: regex::Error,
    },

    #[error("invalid status code {code} in redirect rule {index}")]
    InvalidStatusCode { index: usize, code: u16 },

    // Addresses
    #[error("invalid listen address '{addr}'")]
    InvalidListen { addr: String },

    #[error("invalid upstream address '{addr}', expected host:port")]
    InvalidUpstream { addr: String },
}

impl ConfigError {
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.into(),
            source,
        }
    }

    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}

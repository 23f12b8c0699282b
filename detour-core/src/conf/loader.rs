use crate::conf::error::ConfigError;
use crate::conf::types::DetourConfig;
use std::fs;
use std::path::Path;

/// Read and parse a config file, then run structural validation.
///
/// Any failure here aborts startup; no partially loaded configuration is
/// ever handed to the server.
pub fn load_config(path: &Path) -> Result<DetourConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

    let cfg: DetourConfig = toml::from_str(&s).map_err(|e| ConfigError::parse(path, e))?;

    cfg.validate()?;

    Ok(cfg)
}

//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use bpviz::{BpvizError, config::AppConfig};

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for BpvizError {
    fn from(err: ConfigError) -> Self {
        BpvizError::Config(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (bpviz/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Arguments
///
/// * `explicit_path` - Optional explicit path to config file
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, BpvizError> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("bpviz/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "bpviz", "bpviz") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, BpvizError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;
    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    debug!(functions = config.functions().len(); "Configuration loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use bpviz::config::{ActionOrder, UnsupportedPolicy};

    use super::*;

    #[test]
    fn test_load_explicit_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("bpviz.toml");
        fs::write(
            &path,
            "[labels]\norchestrator = \"Controller\"\n\n[translation]\naction_order = \"lexicographic\"\n",
        )
        .expect("Failed to write config");

        let config = load_config(Some(&path)).expect("Failed to load config");
        assert_eq!(config.labels().orchestrator(), "Controller");
        assert_eq!(config.labels().user(), "User");
        assert_eq!(
            config.translation().action_order(),
            ActionOrder::Lexicographic
        );
        assert_eq!(config.translation().unsupported(), UnsupportedPolicy::Fail);
    }

    #[test]
    fn test_missing_explicit_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).expect_err("Missing file should fail");
        assert!(matches!(err, BpvizError::Config(ref msg) if msg.contains("Missing configuration file")));
    }

    #[test]
    fn test_malformed_config() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("bad.toml");
        fs::write(&path, "[translation]\nunsupported = \"retry\"\n").expect("Failed to write config");

        let err = load_config(Some(&path)).expect_err("Unknown policy should fail");
        assert!(matches!(err, BpvizError::Config(ref msg) if msg.starts_with("Failed to parse TOML")));
    }

    #[test]
    fn test_config_error_conversion() {
        let err = BpvizError::from(ConfigError::Parse("bad".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration error: Failed to parse TOML configuration: bad"
        );
    }
}

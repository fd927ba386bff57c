use crate::config::schema::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

#[cfg(test)]
use std::sync::Mutex;

#[cfg(test)]
static CONFIG_TEST_ENV_LOCK: Mutex<()> = Mutex::new(());

pub const ENV_STATE_ENABLED: &str = "DEEPLUCID_STATE_ENABLED";
pub const ENV_SESSION_EXPIRY_SECS: &str = "DEEPLUCID_SESSION_EXPIRY_SECS";
pub const ENV_MAX_SESSIONS: &str = "DEEPLUCID_MAX_SESSIONS";
pub const ENV_SWEEP_INTERVAL_SECS: &str = "DEEPLUCID_SWEEP_INTERVAL_SECS";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file contains invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),
}

/// Overrides taken from command line flags
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub config_path: Option<PathBuf>,
    pub enable_state: bool,
    pub max_sessions: Option<usize>,
    pub session_expiry_secs: Option<u64>,
}

pub fn load_config(cli: &CliOverrides) -> Result<Config> {
    tracing::debug!("Loading configuration");

    let mut config = Config::default();

    // Layer 1: config file (--config or ~/.deeplucid/config.json)
    let config_file = cli.config_path.clone().or_else(get_default_config_path);

    if let Some(ref path) = config_file {
        if path.exists() {
            tracing::debug!(config_path = %path.display(), "Loading configuration from file");
            config = read_config_file(path)?;
        } else {
            tracing::debug!(config_path = %path.display(), "Config file not found, using defaults");
        }
    }

    // Layer 2: environment variables
    tracing::debug!("Applying environment variable overrides");
    merge_env_variables(&mut config);

    // Layer 3: CLI flags (highest precedence)
    apply_cli_overrides(&mut config, cli);

    tracing::debug!(
        state_enabled = config.session.enabled,
        expiry_secs = config.session.expiry_secs,
        max_sessions = config.session.max_sessions,
        sweep_interval_secs = config.session.sweep_interval_secs,
        "Configuration loaded successfully"
    );

    Ok(config)
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".deeplucid").join("config.json"))
}

fn read_config_file(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)
        .map_err(ConfigError::IoError)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = serde_json::from_str(&content).map_err(ConfigError::InvalidJson)?;
    Ok(config)
}

/// Reads and parses an environment variable. Unset, empty or unparsable
/// values are ignored.
fn env_value<T: FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok().filter(|v| !v.trim().is_empty())?;
    match raw.trim().parse::<T>() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(variable = key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

fn env_flag(key: &str) -> Option<bool> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        "" => None,
        _ => {
            tracing::warn!(variable = key, value = %raw, "Ignoring unparsable environment variable");
            None
        }
    }
}

fn merge_env_variables(config: &mut Config) {
    if let Some(enabled) = env_flag(ENV_STATE_ENABLED) {
        config.session.enabled = enabled;
    }
    if let Some(secs) = env_value(ENV_SESSION_EXPIRY_SECS) {
        config.session.expiry_secs = secs;
    }
    if let Some(max) = env_value(ENV_MAX_SESSIONS) {
        config.session.max_sessions = max;
    }
    if let Some(secs) = env_value(ENV_SWEEP_INTERVAL_SECS) {
        config.session.sweep_interval_secs = secs;
    }
}

fn apply_cli_overrides(config: &mut Config, cli: &CliOverrides) {
    if cli.enable_state {
        tracing::debug!("Applying CLI --enable-state override");
        config.session.enabled = true;
    }
    if let Some(max) = cli.max_sessions {
        tracing::debug!(max_sessions = max, "Applying CLI max sessions override");
        config.session.max_sessions = max;
    }
    if let Some(secs) = cli.session_expiry_secs {
        tracing::debug!(expiry_secs = secs, "Applying CLI session expiry override");
        config.session.expiry_secs = secs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::SessionConfig;
    use std::env;
    use tempfile::TempDir;

    fn setup() -> TempDir {
        TempDir::new().unwrap()
    }

    fn clear_env() {
        unsafe {
            env::remove_var(ENV_STATE_ENABLED);
            env::remove_var(ENV_SESSION_EXPIRY_SECS);
            env::remove_var(ENV_MAX_SESSIONS);
            env::remove_var(ENV_SWEEP_INTERVAL_SECS);
        }
    }

    fn with_path(path: PathBuf) -> CliOverrides {
        CliOverrides {
            config_path: Some(path),
            ..Default::default()
        }
    }

    #[test]
    fn test_load_config_defaults() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();
        let nonexistent_path = temp_dir.path().join("nonexistent_config.json");

        let config = load_config(&with_path(nonexistent_path)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_config_from_file() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();
        let config_path = temp_dir.path().join("config.json");

        let file_config = Config {
            session: SessionConfig {
                enabled: true,
                expiry_secs: 90,
                max_sessions: 7,
                sweep_interval_secs: 15,
            },
            log_filter: Some("deeplucid=debug".to_string()),
        };
        fs::write(&config_path, serde_json::to_string_pretty(&file_config).unwrap()).unwrap();

        let loaded = load_config(&with_path(config_path)).unwrap();
        assert_eq!(loaded, file_config);
    }

    #[test]
    fn test_load_config_invalid_json() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();
        let config_path = temp_dir.path().join("config.json");

        fs::write(&config_path, "not valid json").unwrap();

        let result = load_config(&with_path(config_path));
        assert!(result.is_err());
        let err_msg = format!("{}", result.unwrap_err());
        assert!(err_msg.contains("invalid JSON"));
    }

    #[test]
    fn test_env_variable_override() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();
        let config_path = temp_dir.path().join("config.json");

        fs::write(&config_path, r#"{ "session": { "max_sessions": 7, "expiry_secs": 90 } }"#)
            .unwrap();

        unsafe {
            env::set_var(ENV_MAX_SESSIONS, "12");
            env::set_var(ENV_STATE_ENABLED, "true");
        }

        let config = load_config(&with_path(config_path)).unwrap();
        assert_eq!(config.session.max_sessions, 12);
        assert_eq!(config.session.expiry_secs, 90);
        assert!(config.session.enabled);

        clear_env();
    }

    #[test]
    fn test_env_invalid_values_ignored() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();

        unsafe {
            env::set_var(ENV_MAX_SESSIONS, "lots");
            env::set_var(ENV_STATE_ENABLED, "maybe");
            env::set_var(ENV_SWEEP_INTERVAL_SECS, "-3");
        }

        let config = load_config(&with_path(temp_dir.path().join("none.json"))).unwrap();
        assert_eq!(config, Config::default());

        clear_env();
    }

    #[test]
    fn test_config_hierarchy_precedence() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();
        let config_path = temp_dir.path().join("config.json");

        // Layer 1: file
        fs::write(
            &config_path,
            r#"{ "session": { "max_sessions": 7, "expiry_secs": 90, "sweep_interval_secs": 5 } }"#,
        )
        .unwrap();

        // Layer 2: env
        unsafe {
            env::set_var(ENV_MAX_SESSIONS, "12");
            env::set_var(ENV_SESSION_EXPIRY_SECS, "120");
        }

        // Layer 3: CLI
        let cli = CliOverrides {
            config_path: Some(config_path),
            enable_state: true,
            max_sessions: Some(3),
            session_expiry_secs: None,
        };
        let config = load_config(&cli).unwrap();

        assert!(config.session.enabled); // From CLI
        assert_eq!(config.session.max_sessions, 3); // From CLI
        assert_eq!(config.session.expiry_secs, 120); // From env
        assert_eq!(config.session.sweep_interval_secs, 5); // From file

        clear_env();
    }

    #[test]
    fn test_enable_state_flag_absent_keeps_file_value() {
        let _lock = CONFIG_TEST_ENV_LOCK.lock().unwrap();
        clear_env();
        let temp_dir = setup();
        let config_path = temp_dir.path().join("config.json");
        fs::write(&config_path, r#"{ "session": { "enabled": true } }"#).unwrap();

        let config = load_config(&with_path(config_path)).unwrap();
        assert!(config.session.enabled);
    }

    #[test]
    fn test_default_config_path() {
        let path = get_default_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains(".deeplucid"));
        assert!(path.to_string_lossy().contains("config.json"));
    }
}

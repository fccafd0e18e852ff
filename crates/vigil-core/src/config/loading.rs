//! Configuration loading and merging logic.
//!
//! This module handles loading configuration from files and merging
//! configurations from different sources (user config, project config).
//!
//! # Configuration Hierarchy
//!
//! Configuration is loaded in the following order (later sources override earlier ones):
//! 1. **Hardcoded defaults** - Built-in fallback values
//! 2. **User config** - `~/.vigil/config.toml` (global user preferences)
//! 3. **Project config** - `./.vigil/config.toml` (deployment-specific overrides)
//! 4. **CLI arguments** - Command-line flags (highest priority)

use crate::config::types::{MonitorSettings, PollerSettings, ServerSettings, VigilConfig};
use crate::config::validation::validate_config;
use std::fs;
use std::path::PathBuf;

/// Check if an error is a "file not found" error.
fn is_file_not_found(e: &(dyn std::error::Error + 'static)) -> bool {
    if let Some(io_err) = e.downcast_ref::<std::io::Error>() {
        return io_err.kind() == std::io::ErrorKind::NotFound;
    }

    let err_str = e.to_string();
    err_str.contains("No such file or directory") || err_str.contains("cannot find the path")
}

/// Load configuration from the hierarchy of config files.
///
/// Loads and merges configuration from:
/// 1. Default values
/// 2. User config (`~/.vigil/config.toml`)
/// 3. Project config (`./.vigil/config.toml`)
///
/// # Errors
///
/// Returns an error if validation fails. Missing config files are not errors.
pub fn load_hierarchy() -> Result<VigilConfig, Box<dyn std::error::Error>> {
    let mut config = VigilConfig::default();

    // Load user config (file not found is expected, parse errors fail)
    match load_user_config() {
        Ok(user_config) => config = merge_configs(config, user_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with defaults
    }

    // Load project config (file not found is expected, parse errors fail)
    match load_project_config() {
        Ok(project_config) => config = merge_configs(config, project_config),
        Err(e) if !is_file_not_found(e.as_ref()) => return Err(e),
        Err(_) => {} // File not found - continue with merged config
    }

    // Validate the final configuration
    validate_config(&config)?;

    Ok(config)
}

/// Load the user configuration from ~/.vigil/config.toml.
fn load_user_config() -> Result<VigilConfig, Box<dyn std::error::Error>> {
    let home_dir = dirs::home_dir().ok_or("Could not find home directory")?;
    let config_path = home_dir.join(".vigil").join("config.toml");
    load_config_file(&config_path)
}

/// Load the project configuration from ./.vigil/config.toml.
fn load_project_config() -> Result<VigilConfig, Box<dyn std::error::Error>> {
    let config_path = std::env::current_dir()?.join(".vigil").join("config.toml");
    load_config_file(&config_path)
}

/// Load a configuration file from the given path.
fn load_config_file(path: &PathBuf) -> Result<VigilConfig, Box<dyn std::error::Error>> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;
    let config: VigilConfig = toml::from_str(&content)
        .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;
    Ok(config)
}

/// Merge two configurations, with override_config taking precedence.
///
/// Optional fields replace base values only when present in the override.
pub fn merge_configs(base: VigilConfig, override_config: VigilConfig) -> VigilConfig {
    VigilConfig {
        monitor: MonitorSettings {
            inactivity_timeout_secs: override_config
                .monitor
                .inactivity_timeout_secs
                .or(base.monitor.inactivity_timeout_secs),
            warning_lead_secs: override_config
                .monitor
                .warning_lead_secs
                .or(base.monitor.warning_lead_secs),
            activity_debounce_ms: override_config
                .monitor
                .activity_debounce_ms
                .or(base.monitor.activity_debounce_ms),
        },
        poller: PollerSettings {
            interval_ms: override_config.poller.interval_ms.or(base.poller.interval_ms),
            max_failures: override_config
                .poller
                .max_failures
                .or(base.poller.max_failures),
        },
        server: ServerSettings {
            // Endpoint strings always carry serde defaults, so the override
            // config's values win. A project config without a [server] section
            // therefore resets endpoints to defaults, same as the base.
            base_url: override_config.server.base_url,
            check_path: override_config.server.check_path,
            logout_path: override_config.server.logout_path,
            login_path: override_config.server.login_path,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_config_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let result = load_config_file(&path);
        assert!(result.is_err());
        assert!(is_file_not_found(result.unwrap_err().as_ref()));
    }

    #[test]
    fn test_load_config_file_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "invalid toml [[[").unwrap();
        let result = load_config_file(&path);
        assert!(result.is_err());
        assert!(!is_file_not_found(result.unwrap_err().as_ref()));
    }

    #[test]
    fn test_config_hierarchy_integration() {
        let dir = tempfile::tempdir().unwrap();
        let user_config_dir = dir.path().join("user");
        let project_config_dir = dir.path().join("project");
        std::fs::create_dir_all(&user_config_dir).unwrap();
        std::fs::create_dir_all(project_config_dir.join(".vigil")).unwrap();

        let user_config_content = r#"
[monitor]
inactivity_timeout_secs = 600
warning_lead_secs = 480

[server]
base_url = "https://admin.school.example"
"#;
        std::fs::write(user_config_dir.join("config.toml"), user_config_content).unwrap();

        let project_config_content = r#"
[monitor]
inactivity_timeout_secs = 900

[poller]
interval_ms = 1000
"#;
        std::fs::write(
            project_config_dir.join(".vigil").join("config.toml"),
            project_config_content,
        )
        .unwrap();

        let user_config = load_config_file(&user_config_dir.join("config.toml")).unwrap();
        assert_eq!(user_config.monitor.inactivity_timeout_secs(), 600);
        assert_eq!(user_config.server.base_url, "https://admin.school.example");

        let project_config =
            load_config_file(&project_config_dir.join(".vigil").join("config.toml")).unwrap();
        assert_eq!(project_config.monitor.inactivity_timeout_secs(), 900);

        let merged = merge_configs(user_config, project_config);
        assert_eq!(merged.monitor.inactivity_timeout_secs(), 900); // Overridden by project
        assert_eq!(merged.monitor.warning_lead_secs(), 480); // From user
        assert_eq!(merged.poller.interval_ms(), 1000); // From project
    }

    #[test]
    fn test_merge_server_settings_override_wins() {
        // Documents current behavior: server endpoint strings always take the
        // override config's value, even when the override lacks a [server]
        // section and therefore carries the serde defaults.
        let user_config: VigilConfig = toml::from_str(
            r#"
[server]
base_url = "https://admin.school.example"
"#,
        )
        .unwrap();

        let project_config: VigilConfig = toml::from_str(
            r#"
[poller]
interval_ms = 5000
"#,
        )
        .unwrap();

        let merged = merge_configs(user_config, project_config);
        assert_eq!(
            merged.server.base_url, "http://127.0.0.1:5000",
            "current behavior: override config always wins, even if it's a default"
        );
        assert_eq!(merged.poller.interval_ms(), 5000);
    }

    #[test]
    fn test_toml_parsing_edge_cases() {
        // Empty config falls back to defaults everywhere
        let empty_config: VigilConfig = toml::from_str("").unwrap();
        assert_eq!(empty_config.monitor.inactivity_timeout_secs(), 300);
        assert_eq!(empty_config.poller.interval_ms(), 3000);

        // Partial config keeps defaults for the rest
        let partial_config: VigilConfig = toml::from_str(
            r#"
[poller]
max_failures = 5
"#,
        )
        .unwrap();
        assert_eq!(partial_config.poller.max_failures(), 5);
        assert_eq!(partial_config.poller.interval_ms(), 3000);

        // Invalid TOML should fail
        let invalid_result: Result<VigilConfig, _> = toml::from_str("invalid toml [[[");
        assert!(invalid_result.is_err());
    }
}

//! Configuration resolution and graceful degradation
//!
//! - Priority order: CLI > environment > TOML file > defaults
//! - Missing or malformed TOML never aborts; it yields a warning and defaults
//!
//! Note: Uses serial_test to prevent environment variable races. Every test
//! that reads or writes FRETDATE_* variables is marked #[serial].

use fretdate_api::config::{
    load_toml, CliOverrides, ConfigError, ServiceConfig, TomlConfig, ENV_BIND, ENV_CONFIG, ENV_MAX_BATCH,
};
use serial_test::serial;
use std::env;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn clear_env() {
    env::remove_var(ENV_BIND);
    env::remove_var(ENV_MAX_BATCH);
    env::remove_var(ENV_CONFIG);
}

fn write_config(dir: &TempDir, content: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, content).expect("write config");
    path
}

fn with_config(path: PathBuf) -> CliOverrides {
    CliOverrides {
        config: Some(path),
        ..CliOverrides::default()
    }
}

#[test]
fn test_load_toml_reads_all_keys() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bind_addr = \"0.0.0.0:8080\"\nmax_batch = 25\nlog_level = \"debug\"\n");

    let config = load_toml(&path).unwrap();
    assert_eq!(
        config,
        TomlConfig {
            bind_addr: Some("0.0.0.0:8080".to_string()),
            max_batch: Some(25),
            log_level: Some("debug".to_string()),
        }
    );
}

#[test]
fn test_load_toml_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = load_toml(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_load_toml_malformed_file() {
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_batch = \"lots\"\n");
    assert!(matches!(load_toml(&path), Err(ConfigError::Parse { .. })));
}

#[test]
#[serial]
fn test_missing_config_file_falls_back_to_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();

    let resolved = ServiceConfig::resolve(&with_config(dir.path().join("absent.toml")));

    assert_eq!(resolved.config, ServiceConfig::default());
    assert!(resolved.source.is_none());
    assert_eq!(resolved.warnings.len(), 1);
    assert!(resolved.warnings[0].contains("not found"));
}

#[test]
#[serial]
fn test_malformed_config_file_falls_back_to_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "this is [not toml");

    let resolved = ServiceConfig::resolve(&with_config(path));

    assert_eq!(resolved.config, ServiceConfig::default());
    assert!(resolved.warnings[0].contains("Malformed"));
}

#[test]
#[serial]
fn test_toml_overrides_defaults() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bind_addr = \"0.0.0.0:8080\"\nmax_batch = 25\nlog_level = \"debug\"\n");

    let resolved = ServiceConfig::resolve(&with_config(path.clone()));

    assert_eq!(resolved.config.bind_addr.to_string(), "0.0.0.0:8080");
    assert_eq!(resolved.config.max_batch, 25);
    assert_eq!(resolved.config.log_level, "debug");
    assert_eq!(resolved.source, Some(path));
    assert!(resolved.warnings.is_empty());
}

#[test]
#[serial]
fn test_env_overrides_toml() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "bind_addr = \"0.0.0.0:8080\"\nmax_batch = 25\n");
    env::set_var(ENV_BIND, "127.0.0.1:9000");
    env::set_var(ENV_MAX_BATCH, "50");

    let resolved = ServiceConfig::resolve(&with_config(path));

    assert_eq!(resolved.config.bind_addr.to_string(), "127.0.0.1:9000");
    assert_eq!(resolved.config.max_batch, 50);
    clear_env();
}

#[test]
#[serial]
fn test_cli_overrides_env() {
    clear_env();
    let dir = TempDir::new().unwrap();
    env::set_var(ENV_BIND, "127.0.0.1:9000");
    env::set_var(ENV_MAX_BATCH, "50");

    let cli = CliOverrides {
        bind: Some("127.0.0.1:9100".parse().unwrap()),
        max_batch: Some(5),
        config: Some(dir.path().join("absent.toml")),
    };
    let resolved = ServiceConfig::resolve(&cli);

    assert_eq!(resolved.config.bind_addr.to_string(), "127.0.0.1:9100");
    assert_eq!(resolved.config.max_batch, 5);
    clear_env();
}

#[test]
#[serial]
fn test_config_path_from_env() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_batch = 12\n");
    env::set_var(ENV_CONFIG, &path);

    let resolved = ServiceConfig::resolve(&CliOverrides::default());

    assert_eq!(resolved.config.max_batch, 12);
    assert_eq!(resolved.source, Some(path));
    clear_env();
}

#[test]
#[serial]
fn test_invalid_env_values_are_ignored_with_warning() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_batch = 30\n");
    env::set_var(ENV_BIND, "localhost");
    env::set_var(ENV_MAX_BATCH, "0");

    let resolved = ServiceConfig::resolve(&with_config(path));

    assert_eq!(resolved.config.bind_addr, ServiceConfig::default().bind_addr);
    assert_eq!(resolved.config.max_batch, 30);
    assert_eq!(resolved.warnings.len(), 2);
    assert!(resolved.warnings.iter().any(|w| w.contains(ENV_BIND)));
    assert!(resolved.warnings.iter().any(|w| w.contains(ENV_MAX_BATCH)));
    clear_env();
}

#[test]
#[serial]
fn test_zero_cli_max_batch_is_ignored_with_warning() {
    clear_env();
    let dir = TempDir::new().unwrap();
    let path = write_config(&dir, "max_batch = 30\n");

    let cli = CliOverrides {
        max_batch: Some(0),
        ..with_config(path)
    };
    let resolved = ServiceConfig::resolve(&cli);

    assert_eq!(resolved.config.max_batch, 30);
    assert_eq!(resolved.warnings.len(), 1);
    assert!(resolved.warnings[0].contains("--max-batch"));
}

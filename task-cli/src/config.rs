use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_TASK_FILE: &str = "tasks.json";
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Base name of the optional config file in the working directory (`task-cli.toml`, ...).
pub const CONFIG_FILE: &str = "task-cli";
pub const ENV_PREFIX: &str = "TASK_CLI";

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    /// Path of the JSON task file.
    pub file: PathBuf,
    pub log_level: String,
}

impl Config {
    /// Loads defaults, then `task-cli.*` if present, then `TASK_CLI_*` environment variables.
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    pub fn load_from(config_file: &str) -> anyhow::Result<Self> {
        Self::load_with_env(config_file, config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Same layering as [`Config::load_from`], reading overrides from `environment`.
    pub fn load_with_env(
        config_file: &str,
        environment: config::Environment,
    ) -> anyhow::Result<Self> {
        let settings = config::Config::builder()
            .set_default("file", DEFAULT_TASK_FILE)?
            .set_default("log_level", DEFAULT_LOG_LEVEL)?
            .add_source(config::File::with_name(config_file).required(false))
            .add_source(environment)
            .build()
            .context("cannot read configuration")?;

        Ok(settings.try_deserialize()?)
    }

    pub fn level(&self) -> anyhow::Result<tracing::Level> {
        self.log_level
            .parse()
            .with_context(|| format!("invalid log level '{}'", self.log_level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;

    fn env_of(vars: &[(&str, &str)]) -> config::Environment {
        let map: config::Map<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        config::Environment::with_prefix(ENV_PREFIX).source(Some(map))
    }

    fn config_with_env(dir: &TempDir, vars: &[(&str, &str)]) -> anyhow::Result<Config> {
        let base = dir.child(CONFIG_FILE);
        Config::load_with_env(base.path().to_str().unwrap(), env_of(vars))
    }

    fn config_in(dir: &TempDir) -> anyhow::Result<Config> {
        config_with_env(dir, &[])
    }

    #[test]
    fn test_defaults_without_config_file() {
        let dir = TempDir::new().unwrap();

        let config = config_in(&dir).unwrap();

        assert_eq!(config.file, PathBuf::from(DEFAULT_TASK_FILE));
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        // Arrange
        let dir = TempDir::new().unwrap();
        dir.child("task-cli.toml")
            .write_str(
                r#"
                file = "/var/tmp/my-tasks.json"
                log_level = "debug"
                "#,
            )
            .unwrap();

        // Act
        let config = config_in(&dir).unwrap();

        // Assert
        assert_eq!(config.file, PathBuf::from("/var/tmp/my-tasks.json"));
        assert_eq!(config.level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_partial_config_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        dir.child("task-cli.toml")
            .write_str(r#"log_level = "info""#)
            .unwrap();

        let config = config_in(&dir).unwrap();

        assert_eq!(config.file, PathBuf::from(DEFAULT_TASK_FILE));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_environment_overrides_config_file() {
        // Arrange
        let dir = TempDir::new().unwrap();
        dir.child("task-cli.toml")
            .write_str(
                r#"
                file = "from-file.json"
                log_level = "debug"
                "#,
            )
            .unwrap();

        // Act
        let config = config_with_env(
            &dir,
            &[("TASK_CLI_FILE", "from-env.json"), ("OTHER_FILE", "ignored.json")],
        )
        .unwrap();

        // Assert
        assert_eq!(config.file, PathBuf::from("from-env.json"));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let config = Config {
            file: PathBuf::from(DEFAULT_TASK_FILE),
            log_level: "chatty".to_string(),
        };

        let err = config.level().unwrap_err();

        assert_eq!(err.to_string(), "invalid log level 'chatty'");
    }
}

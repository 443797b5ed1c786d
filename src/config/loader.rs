//! Layered configuration loader
//!
//! Sources are merged in this order, later ones winning:
//! 1. `default.toml` (required)
//! 2. `{environment}.toml` (optional)
//! 3. `local.toml` (optional)
//! 4. `NOTIFY_*` environment variables
//!
//! Setting `NOTIFY_CONFIG_FILE` (or passing `--config`) replaces steps 1-3 with a
//! single file.

use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, File, FileFormat};

use crate::config::environment::Environment;
use crate::config::error::ConfigError;
use crate::config::settings::Settings;

const CONFIG_DIR_ENV: &str = "NOTIFY_CONFIG_DIR";

const CONFIG_FILE_ENV: &str = "NOTIFY_CONFIG_FILE";

const DEFAULT_CONFIG_DIR: &str = "config";

const ENV_PREFIX: &str = "NOTIFY";

/// Separator for nested keys: `NOTIFY_FIREBASE__APP_NAME` -> `firebase.app_name`
const ENV_SEPARATOR: &str = "__";

/// Keys parsed as comma-separated lists when they come from the environment
const ENV_LIST_KEYS: &[&str] = &["server.cors_allowed_origins"];

#[derive(Debug)]
pub struct ConfigLoader {
    config_dir: PathBuf,
    /// When set, layered loading is skipped
    config_file: Option<PathBuf>,
    environment: Environment,
}

impl ConfigLoader {
    /// Creates a loader from `NOTIFY_CONFIG_DIR`, `NOTIFY_CONFIG_FILE` and `NOTIFY_APP_ENV`.
    ///
    /// # Errors
    ///
    /// Returns `MutualExclusivityError` when both the directory and file
    /// variables are set.
    pub fn new() -> Result<Self, ConfigError> {
        let dir_from_env = std::env::var(CONFIG_DIR_ENV).ok();
        let config_file = std::env::var(CONFIG_FILE_ENV).ok().map(PathBuf::from);

        if dir_from_env.is_some() && config_file.is_some() {
            return Err(ConfigError::mutual_exclusivity(
                "NOTIFY_CONFIG_DIR and NOTIFY_CONFIG_FILE cannot both be set. \
                 Use NOTIFY_CONFIG_DIR for layered configuration or \
                 NOTIFY_CONFIG_FILE for a single configuration file.",
            ));
        }

        Ok(Self {
            config_dir: dir_from_env
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR)),
            config_file,
            environment: Environment::from_env(),
        })
    }

    /// Creates a loader that reads exactly one file plus environment overrides.
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: Some(path.into()),
            environment: Environment::from_env(),
        }
    }

    /// Overrides the environment used to pick the overlay file.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Loads, deserializes and validates the settings.
    ///
    /// # Errors
    ///
    /// - `FileNotFound` when `default.toml` (or the single file) is missing
    /// - `ParseError` when the merged sources do not match `Settings`
    /// - `ValidationError` when a value is out of range
    pub fn load(&self) -> Result<Settings, ConfigError> {
        let config = self.build_config()?;
        let mut settings: Settings = config.try_deserialize().map_err(|e| {
            ConfigError::ParseError(format!("Failed to deserialize configuration: {}", e))
        })?;
        settings.environment = self.environment;

        settings.validate()?;

        Ok(settings)
    }

    fn build_config(&self) -> Result<Config, ConfigError> {
        let builder = Config::builder();

        let builder = match &self.config_file {
            Some(file) => add_file_source(builder, file, true)?,
            None => self.add_layered_sources(builder)?,
        };

        add_env_source(builder).build().map_err(ConfigError::from)
    }

    fn add_layered_sources(
        &self,
        builder: ConfigBuilder<DefaultState>,
    ) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let builder = add_file_source(builder, &self.config_dir.join("default.toml"), true)?;

        let overlay = self
            .config_dir
            .join(format!("{}.toml", self.environment.as_str()));
        let builder = add_file_source(builder, &overlay, false)?;

        add_file_source(builder, &self.config_dir.join("local.toml"), false)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self {
            config_dir: PathBuf::from(DEFAULT_CONFIG_DIR),
            config_file: None,
            environment: Environment::default(),
        })
    }
}

fn add_file_source(
    builder: ConfigBuilder<DefaultState>,
    path: &Path,
    required: bool,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    if required && !path.exists() {
        return Err(ConfigError::file_not_found(format!(
            "Required configuration file not found: {}",
            path.display()
        )));
    }

    Ok(builder.add_source(
        File::new(&path.to_string_lossy(), FileFormat::Toml).required(required),
    ))
}

fn add_env_source(builder: ConfigBuilder<DefaultState>) -> ConfigBuilder<DefaultState> {
    let mut source = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("_")
        .separator(ENV_SEPARATOR)
        .ignore_empty(true)
        .try_parsing(true)
        .list_separator(",");

    for key in ENV_LIST_KEYS {
        source = source.with_list_parse_key(key);
    }

    builder.add_source(source)
}

/// Serializes tests that read or mutate `NOTIFY_*` environment variables
#[cfg(test)]
pub(crate) static ENV_TEST_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

#[cfg(test)]
pub(crate) fn lock_env() -> std::sync::MutexGuard<'static, ()> {
    ENV_TEST_LOCK.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const DEFAULT_TOML: &str = r#"
[application]
name = "notify-test"
version = "1.0.0"

[server]
host = "127.0.0.1"
port = 8080

[logger]
level = "info"

[firebase]
credentials_path = "config/service-account.json"
app_name = "Notification-demo"
"#;

    fn setup_config_dir(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        for (name, content) in files {
            fs::write(dir.path().join(name), content).expect("Failed to write config file");
        }
        dir
    }

    /// Restores touched environment variables on drop
    struct EnvGuard {
        saved: Vec<(String, Option<String>)>,
    }

    impl EnvGuard {
        fn new() -> Self {
            let mut guard = Self { saved: Vec::new() };
            for key in [
                CONFIG_DIR_ENV,
                CONFIG_FILE_ENV,
                Environment::ENV_VAR,
                "NOTIFY_SERVER__PORT",
                "NOTIFY_FIREBASE__APP_NAME",
                "NOTIFY_SERVER__CORS_ALLOWED_ORIGINS",
            ] {
                guard.remove(key);
            }
            guard
        }

        fn set(&mut self, key: &str, value: &str) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::set_var(key, value);
            }
        }

        fn remove(&mut self, key: &str) {
            self.saved.push((key.to_string(), std::env::var(key).ok()));
            unsafe {
                std::env::remove_var(key);
            }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            for (key, value) in self.saved.iter().rev() {
                unsafe {
                    match value {
                        Some(value) => std::env::set_var(key, value),
                        None => std::env::remove_var(key),
                    }
                }
            }
        }
    }

    #[test]
    fn test_new_uses_default_dir() {
        let _lock = lock_env();
        let _env = EnvGuard::new();

        let loader = ConfigLoader::new().unwrap();
        assert_eq!(loader.config_dir, PathBuf::from("config"));
        assert!(loader.config_file.is_none());
        assert_eq!(loader.environment, Environment::Development);
    }

    #[test]
    fn test_dir_and_file_are_mutually_exclusive() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        env.set(CONFIG_DIR_ENV, "/etc/notify");
        env.set(CONFIG_FILE_ENV, "/etc/notify/app.toml");

        let err = ConfigLoader::new().unwrap_err();
        assert!(matches!(err, ConfigError::MutualExclusivityError(_)));
    }

    #[test]
    fn test_missing_default_toml() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        let err = ConfigLoader::new().unwrap().load().unwrap_err();
        match err {
            ConfigError::FileNotFound(msg) => assert!(msg.contains("default.toml")),
            other => panic!("Expected FileNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_layered_precedence() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            (
                "production.toml",
                "[server]\nhost = \"0.0.0.0\"\nport = 9000\n\n[firebase]\napp_name = \"prod-app\"\n",
            ),
            ("local.toml", "[server]\nport = 9100\n"),
        ]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());
        env.set(Environment::ENV_VAR, "production");
        env.set("NOTIFY_FIREBASE__APP_NAME", "env-app");

        let settings = ConfigLoader::new().unwrap().load().unwrap();

        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 9100);
        assert_eq!(settings.firebase.app_name, "env-app");
        assert_eq!(settings.application.name, "notify-test");
    }

    #[test]
    fn test_with_environment_overrides_env_var() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[
            ("default.toml", DEFAULT_TOML),
            ("test.toml", "[server]\nport = 7000\n"),
        ]);
        env.set(CONFIG_DIR_ENV, dir.path().to_str().unwrap());

        let settings = ConfigLoader::new()
            .unwrap()
            .with_environment(Environment::Test)
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 7000);
        assert_eq!(settings.environment, Environment::Test);
    }

    #[test]
    fn test_single_file_mode_with_env_override() {
        let _lock = lock_env();
        let mut env = EnvGuard::new();
        let dir = setup_config_dir(&[("single.toml", DEFAULT_TOML)]);
        env.set("NOTIFY_SERVER__PORT", "4100");
        env.set(
            "NOTIFY_SERVER__CORS_ALLOWED_ORIGINS",
            "http://localhost:5173,https://demo.example.com",
        );

        let settings = ConfigLoader::from_file(dir.path().join("single.toml"))
            .load()
            .unwrap();

        assert_eq!(settings.server.port, 4100);
        assert_eq!(
            settings.server.cors_allowed_origins,
            vec![
                "http://localhost:5173".to_string(),
                "https://demo.example.com".to_string()
            ]
        );
    }

    #[test]
    fn test_invalid_values_fail_validation() {
        let _lock = lock_env();
        let _env = EnvGuard::new();
        let dir = setup_config_dir(&[("bad.toml", "[logger]\nlevel = \"loud\"\n")]);

        let err = ConfigLoader::from_file(dir.path().join("bad.toml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}

//! Configuration validation logic
//!
//! Validation runs after every load and after CLI overrides are merged, so a
//! bad value is reported before the credential file is even opened.

use crate::config::error::ConfigError;
use crate::config::settings::{FirebaseConfig, LoggerSettings, ServerConfig, Settings};

const VALID_LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const VALID_LOG_FORMATS: &[&str] = &["full", "compact", "json"];

impl ServerConfig {
    /// Validate server configuration
    ///
    /// # Validation Rules
    /// - Host must not be empty
    /// - Port must be between 1 and 65535
    /// - CORS origins must be `*` or absolute http(s) origins
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.host.trim().is_empty() {
            return Err(ConfigError::validation(
                "server.host",
                "Host is required. Use 127.0.0.1 for local access or 0.0.0.0 for all interfaces.",
            ));
        }

        if self.port == 0 {
            return Err(ConfigError::validation(
                "server.port",
                "Port must be between 1 and 65535.",
            ));
        }

        for origin in &self.cors_allowed_origins {
            let origin = origin.trim();
            if origin == "*" {
                continue;
            }
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::validation(
                    "server.cors_allowed_origins",
                    format!("Origin '{}' must be '*' or start with http:// or https://", origin),
                ));
            }
        }

        Ok(())
    }
}

impl FirebaseConfig {
    /// Validate Firebase configuration
    ///
    /// Only the shape of the values is checked here; the credential file itself
    /// is read and verified by the credential loader at startup.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.credentials_path.as_os_str().is_empty() {
            return Err(ConfigError::validation(
                "firebase.credentials_path",
                "Path to the service-account JSON file is required.",
            ));
        }

        if self.app_name.trim().is_empty() {
            return Err(ConfigError::validation(
                "firebase.app_name",
                "Firebase app name cannot be empty.",
            ));
        }

        if let Some(project_id) = &self.project_id
            && project_id.trim().is_empty()
        {
            return Err(ConfigError::validation(
                "firebase.project_id",
                "Project id override cannot be blank; remove it to use the credential's project.",
            ));
        }

        if !(self.api_base_url.starts_with("https://") || self.api_base_url.starts_with("http://"))
        {
            return Err(ConfigError::validation(
                "firebase.api_base_url",
                format!(
                    "Invalid FCM API URL '{}'. Expected an http(s) URL.",
                    self.api_base_url
                ),
            ));
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::validation(
                "firebase.request_timeout",
                "FCM request timeout must be greater than 0 seconds.",
            ));
        }

        Ok(())
    }
}

impl LoggerSettings {
    /// Validate logger settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !VALID_LOG_LEVELS.contains(&self.level.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.level",
                format!(
                    "Invalid log level '{}'. Valid levels are: {}",
                    self.level,
                    VALID_LOG_LEVELS.join(", ")
                ),
            ));
        }

        if self.file.enabled && self.file.path.trim().is_empty() {
            return Err(ConfigError::validation(
                "logger.file.path",
                "File path is required when file logging is enabled.",
            ));
        }

        if !VALID_LOG_FORMATS.contains(&self.file.format.to_lowercase().as_str()) {
            return Err(ConfigError::validation(
                "logger.file.format",
                format!(
                    "Invalid log format '{}'. Valid formats are: {}",
                    self.file.format,
                    VALID_LOG_FORMATS.join(", ")
                ),
            ));
        }

        if !self.console.enabled && !self.file.enabled {
            return Err(ConfigError::validation(
                "logger",
                "At least one output (console or file) must be enabled.",
            ));
        }

        Ok(())
    }
}

impl Settings {
    /// Validate all sections, returning the first error encountered
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;
        self.logger.validate()?;
        self.firebase.validate()?;
        Ok(())
    }
}

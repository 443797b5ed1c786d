//! CLI argument parsing with clap
//!
//! This module defines the command-line interface structure using clap,
//! including all commands, arguments, and their documentation.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Firebase Cloud Messaging push relay
#[derive(Parser, Debug)]
#[command(name = "firebase-notify")]
#[command(about = "Relays notification requests to Firebase Cloud Messaging")]
#[command(long_about = "
firebase-notify accepts JSON notification requests over HTTP and forwards each
one to Firebase Cloud Messaging using a Google service-account credential.

EXAMPLES:
    # Start the server with default configuration
    firebase-notify serve

    # Start server on custom host and port
    firebase-notify serve --host 0.0.0.0 --port 8080

    # Use custom configuration file
    firebase-notify --config /etc/firebase-notify/production.toml serve

    # Check configuration and credentials without starting the server
    firebase-notify serve --dry-run

    # Send one notification to a device token
    firebase-notify send --token <TOKEN> --title Hi --body Hello --data k=v
")]
#[command(version = crate::clap_long_version())]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Configuration file path
    ///
    /// Load this single TOML file instead of the layered `config/` directory.
    /// `NOTIFY_*` environment variables still apply on top of it.
    #[arg(short, long, value_name = "FILE", value_parser = super::validation::validate_config_file_path)]
    pub config: Option<PathBuf>,

    /// Override environment detection
    ///
    /// Selects the `config/{environment}.toml` overlay instead of `NOTIFY_APP_ENV`.
    #[arg(short, long, value_enum)]
    pub env: Option<Environment>,

    /// Enable verbose logging (debug level)
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web server (default)
    ///
    /// Loads the service-account credential, registers the Firebase app and
    /// serves `POST /notification`. Startup fails if the credential is unusable.
    ///
    /// Examples:
    ///   firebase-notify serve                           # Start with defaults
    ///   firebase-notify serve --host 0.0.0.0 --port 80 # Bind to all interfaces on port 80
    ///   firebase-notify serve --dry-run                 # Validate config and credential
    Serve {
        /// Host address to bind to
        #[arg(long, value_name = "ADDRESS", value_parser = super::validation::validate_host_address)]
        host: Option<String>,

        /// Port number to listen on
        #[arg(short, long, value_name = "PORT", value_parser = super::validation::validate_port)]
        port: Option<u16>,

        /// Log level override
        ///
        /// Takes precedence over the configuration file and the global
        /// --verbose/--quiet flags.
        #[arg(long, value_enum)]
        log_level: Option<LogLevel>,

        /// Validate configuration, load the credential and exit
        #[arg(long)]
        dry_run: bool,
    },
    /// Send one notification and print the result
    ///
    /// Uses the same credential and dispatch path as the server. Handy for
    /// checking a device token copied from the web demo client.
    ///
    /// Example:
    ///   firebase-notify send --token <TOKEN> --title Hi --body Hello --image https://example.com/a.png
    Send {
        /// Recipient registration token
        #[arg(long, value_name = "TOKEN")]
        token: String,

        /// Notification title
        #[arg(long, default_value = "")]
        title: String,

        /// Notification body
        #[arg(long, default_value = "")]
        body: String,

        /// Image URL shown in the notification
        #[arg(long, value_name = "URL")]
        image: Option<String>,

        /// Data payload entry, repeatable
        #[arg(long = "data", value_name = "KEY=VALUE", value_parser = super::validation::parse_data_pair)]
        data: Vec<(String, String)>,
    },
}

/// Environment options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Environment {
    #[value(name = "development", alias = "dev")]
    Development,
    #[value(name = "test")]
    Test,
    #[value(name = "staging", alias = "stage")]
    Staging,
    #[value(name = "production", alias = "prod")]
    Production,
}

/// Log level options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    #[value(name = "error")]
    Error,
    #[value(name = "warn")]
    Warn,
    #[value(name = "info")]
    Info,
    #[value(name = "debug")]
    Debug,
    #[value(name = "trace")]
    Trace,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl From<Environment> for crate::config::Environment {
    fn from(env: Environment) -> Self {
        match env {
            Environment::Development => crate::config::Environment::Development,
            Environment::Test => crate::config::Environment::Test,
            Environment::Staging => crate::config::Environment::Staging,
            Environment::Production => crate::config::Environment::Production,
        }
    }
}

impl Cli {
    /// True when the server should start (no subcommand or `serve` without `--dry-run`)
    pub fn starts_server(&self) -> bool {
        matches!(
            self.command,
            None | Some(Commands::Serve { dry_run: false, .. })
        )
    }
}

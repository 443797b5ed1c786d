//! Serve command handler
//!
//! Runs the server, or with `--dry-run` checks configuration and credential
//! and exits.

use crate::config::Settings;
use crate::error::AppResult;
use crate::server::{Server, register_firebase_app};

pub struct ServeCommandHandler {
    config: Settings,
}

impl ServeCommandHandler {
    pub fn new(config: Settings) -> Self {
        Self { config }
    }

    pub async fn execute(self, dry_run: bool) -> AppResult<()> {
        if dry_run {
            self.validate_only()
        } else {
            Server::new(self.config).run().await.map_err(Into::into)
        }
    }

    /// Validates settings and loads the credential without binding.
    pub fn validate_only(&self) -> AppResult<()> {
        self.config.validate()?;
        println!("✓ Configuration is valid");
        println!("✓ Server would bind to: {}", self.config.server.address());

        let app = register_firebase_app(&self.config.firebase)?;
        println!(
            "✓ Firebase app '{}' initialized for project '{}'",
            app.name(),
            app.project_id()
        );

        println!("Dry run completed successfully - configuration is ready for deployment");
        Ok(())
    }

    pub fn config(&self) -> &Settings {
        &self.config
    }
}

//! Server module for managing HTTP server lifecycle
//!
//! This module handles server initialization, startup, and graceful shutdown.

use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;

use crate::api::routes::create_router;
use crate::config::{FirebaseConfig, Settings};
use crate::error::AppResult;
use crate::external::firebase::{FirebaseApp, FirebaseOptions};
use crate::state::AppState;

/// Loads the service-account credential and registers the Firebase app.
///
/// Runs once per process; every failure here is fatal to startup.
pub fn register_firebase_app(config: &FirebaseConfig) -> AppResult<FirebaseApp> {
    tracing::info!(
        credentials_path = %config.credentials_path.display(),
        "Loading Firebase service-account credential"
    );
    let options = FirebaseOptions::from_config(config)?;
    let app = FirebaseApp::initialize(options, config.app_name.clone())?;

    tracing::info!(
        app_name = %app.name(),
        project_id = %app.project_id(),
        validate_only = config.validate_only,
        "Firebase application initialized"
    );
    Ok(app)
}

/// HTTP server manager
pub struct Server {
    settings: Settings,
}

impl Server {
    /// Create a new server with the given settings
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    /// Start the server and run until shutdown signal
    ///
    /// The listener is bound only after the Firebase app is registered, so a
    /// bad credential never exposes the endpoint.
    ///
    /// # Errors
    /// - Credential loading or client construction errors
    /// - Address binding errors
    /// - Server runtime errors
    pub async fn run(self) -> anyhow::Result<()> {
        tracing::info!(
            app_name = %self.settings.application.name,
            app_version = %self.settings.application.version,
            environment = %self.settings.environment,
            "Application starting"
        );

        tracing::info!(
            host = %self.settings.server.host,
            port = %self.settings.server.port,
            cors_origins = ?self.settings.server.cors_allowed_origins,
            "Server configuration loaded"
        );

        tracing::info!(
            level = %self.settings.logger.level,
            console_enabled = %self.settings.logger.console.enabled,
            file_enabled = %self.settings.logger.file.enabled,
            "Logger configuration loaded"
        );

        tracing::info!(
            api_base_url = %self.settings.firebase.api_base_url,
            request_timeout = %self.settings.firebase.request_timeout,
            project_override = self.settings.firebase.project_id.is_some(),
            "Firebase configuration loaded"
        );

        let app = register_firebase_app(&self.settings.firebase)
            .context("Failed to initialize Firebase application")?;

        let state = AppState::from_firebase(Arc::new(app));
        let router = create_router(state, &self.settings.server);

        let address = self.settings.server.address();
        let listener = TcpListener::bind(&address).await.map_err(|e| {
            tracing::error!(error = %e, address = %address, "Failed to bind to address");
            anyhow::anyhow!("Failed to bind to {}: {}", address, e)
        })?;

        tracing::info!(address = %address, "Server listening");

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");

        Ok(())
    }
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}

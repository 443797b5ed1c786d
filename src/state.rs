//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use serde::Serialize;

use crate::external::firebase::FirebaseApp;
use crate::services::Services;
use crate::services::notifications::PushProvider;

/// Identity of the registered Firebase app, reported by the readiness probe
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub app_name: String,
    pub project_id: String,
}

impl From<&FirebaseApp> for ProviderInfo {
    fn from(app: &FirebaseApp) -> Self {
        Self {
            app_name: app.name().to_string(),
            project_id: app.project_id().to_string(),
        }
    }
}

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since the provider sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    pub provider: Arc<ProviderInfo>,
}

impl AppState {
    pub fn new(provider: Arc<dyn PushProvider>, info: ProviderInfo) -> Self {
        Self {
            services: Services::new(provider),
            provider: Arc::new(info),
        }
    }

    /// State backed by the process-wide Firebase app.
    pub fn from_firebase(app: Arc<FirebaseApp>) -> Self {
        let info = ProviderInfo::from(app.as_ref());
        Self::new(app, info)
    }
}

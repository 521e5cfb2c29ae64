//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::config::Config;
use essay_checker_core::ports::{AuthService, EssayAnalysisService, EssayStoreService};
use std::sync::Arc;

/// The shared application state, created once at startup and passed to all handlers.
///
/// Every collaborator is an injected trait object, constructed in the binary.
/// Nothing here is ambient: tests substitute in-memory fakes for all three ports.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: Arc<dyn EssayStoreService>,
    pub auth: Arc<dyn AuthService>,
    pub analysis: Arc<dyn EssayAnalysisService>,
}

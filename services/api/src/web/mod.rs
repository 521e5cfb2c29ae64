pub mod auth;
pub mod middleware;
pub mod rest;
pub mod state;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use state::AppState;

pub use middleware::require_auth;
pub use rest::{analyze_essay_handler, create_essay_handler, list_essays_handler};

/// Builds the application router: public auth routes plus the protected
/// essay routes behind the session-cookie middleware.
///
/// Factored out of the binary so tests can drive the exact same router
/// with fake ports in the state.
pub fn api_router(app_state: Arc<AppState>) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(auth::signup_handler))
        .route("/auth/login", post(auth::login_handler))
        .route("/auth/logout", post(auth::logout_handler));

    let protected_routes = Router::new()
        .route("/api/analyze", post(rest::analyze_essay_handler))
        .route(
            "/api/essays",
            get(rest::list_essays_handler).post(rest::create_essay_handler),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            middleware::require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .with_state(app_state)
}

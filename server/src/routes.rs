//! Route-Definitionen fuer die Auth-API (/api/...)

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Erstellt den vollstaendigen /api/-Router
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/api/auth/signup", post(handlers::signup))
        .route("/api/auth/login", post(handlers::login))
        .route("/api/health", get(handlers::health))
}

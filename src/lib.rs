pub mod auth;
pub mod bookings;
pub mod config;
pub mod db;
pub mod error;
pub mod users;

use axum::{extract::FromRef, response::IntoResponse, routing::get, Json, Router};
use serde_json::json;
use sqlx::SqlitePool;

use crate::auth::token::Keys;

pub use error::{AppError, AppResult};

#[derive(Clone, FromRef)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub keys: Keys,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/users", get(users::list))
        .nest("/auth", auth::router())
        .nest("/bookings", bookings::router())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

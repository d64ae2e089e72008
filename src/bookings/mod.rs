mod availability;
mod dashboard;
mod new;
mod providers;
mod rate;
mod status;

use axum::{routing::{get, post, put}, Router};

use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(new::create))
        .route("/available-providers", get(providers::available_providers))
        .route("/me", get(dashboard::assigned))
        .route("/my-dashboard", get(dashboard::dashboard))
        .route("/profile/availability", put(availability::update))
        .route("/{id}/status", put(status::update))
        .route("/{id}/rate", put(rate::rate))
}

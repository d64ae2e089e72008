use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    auth::AuthUser,
    db::{AccountRow, AccountView},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct AvailabilityBody {
    #[serde(rename = "isAvailable")]
    is_available: Option<bool>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn update(
    State(db_pool): State<SqlitePool>,
    auth: AuthUser,
    Json(body): Json<AvailabilityBody>,
) -> AppResult<Json<Value>> {
    auth.require_provider()?;

    let is_available = body
        .is_available
        .ok_or_else(|| AppError::Validation("Availability status is required".to_string()))?;

    sqlx::query("UPDATE accounts SET is_available = ? WHERE id = ?")
        .bind(is_available)
        .bind(&auth.account.id)
        .execute(&db_pool)
        .await?;

    let user = AccountView::from(AccountRow {
        is_available,
        ..auth.account
    });
    let message = if is_available {
        "You are now available for bookings"
    } else {
        "You are now unavailable for bookings"
    };

    Ok(Json(json!({ "message": message, "user": user })))
}

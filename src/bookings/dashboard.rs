use axum::{debug_handler, extract::State, Json};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    auth::AuthUser,
    db::{BookingRow, BookingView},
    AppResult, AppState,
};

// Bookings written before the provider key moved to assigned_to_user_id carry
// it in legacy_user_id. This is the only place the dual-field match is
// allowed; writes always set assigned_to_user_id.
pub(crate) async fn bookings_for_provider(
    db_pool: &SqlitePool,
    user_id: &str,
) -> Result<Vec<BookingRow>, sqlx::Error> {
    sqlx::query_as::<_, BookingRow>(
        "SELECT * FROM bookings
         WHERE assigned_to_user_id = ?1 OR legacy_user_id = ?1
         ORDER BY created_at DESC",
    )
    .bind(user_id)
    .fetch_all(db_pool)
    .await
}

#[debug_handler(state = AppState)]
pub(crate) async fn dashboard(
    State(db_pool): State<SqlitePool>,
    auth: AuthUser,
) -> AppResult<Json<Value>> {
    let bookings = bookings_for_provider(&db_pool, &auth.account.user_id).await?;
    tracing::debug!(user_id = %auth.account.user_id, count = bookings.len(), "dashboard fetch");

    let bookings: Vec<BookingView> = bookings.into_iter().map(BookingView::from).collect();
    Ok(Json(json!({ "success": true, "bookings": bookings })))
}

#[debug_handler(state = AppState)]
pub(crate) async fn assigned(
    State(db_pool): State<SqlitePool>,
    auth: AuthUser,
) -> AppResult<Json<Vec<BookingView>>> {
    auth.require_provider()?;

    let bookings = sqlx::query_as::<_, BookingRow>(
        "SELECT * FROM bookings WHERE provider_id = ? ORDER BY date DESC",
    )
    .bind(&auth.account.id)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(bookings.into_iter().map(BookingView::from).collect()))
}

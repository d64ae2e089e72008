use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    auth::AuthUser,
    db::{self, BookingRow, BookingStatus, BookingView},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct StatusBody {
    status: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn update(
    State(db_pool): State<SqlitePool>,
    auth: AuthUser,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> AppResult<Json<BookingView>> {
    auth.require_provider()?;

    let booking = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = ?")
        .bind(&id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    // Ownership is checked before the payload: a non-assigned caller gets 403
    // whatever value they sent.
    if booking.assigned_to_user_id != auth.account.user_id {
        return Err(AppError::Forbidden(
            "Not authorized to update this booking".to_string(),
        ));
    }

    let status = body
        .status
        .as_deref()
        .and_then(BookingStatus::parse)
        .ok_or_else(|| {
            AppError::Validation(
                "Status must be one of pending, accepted, rejected, completed, cancelled"
                    .to_string(),
            )
        })?;

    // Any transition between the five states is accepted, including out of
    // terminal ones.
    let updated_at = db::now_timestamp();
    sqlx::query("UPDATE bookings SET status = ?, updated_at = ? WHERE id = ?")
        .bind(status.as_str())
        .bind(&updated_at)
        .bind(&id)
        .execute(&db_pool)
        .await?;

    tracing::info!(booking_id = %id, status = %status, "booking status updated");

    Ok(Json(BookingView::from(BookingRow {
        status: status.as_str().to_string(),
        updated_at,
        ..booking
    })))
}

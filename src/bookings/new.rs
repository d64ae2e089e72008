use axum::{debug_handler, extract::State, http::StatusCode, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    db::{self, AccountRow, BookingRow, BookingStatus, BookingView, Role},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct CreateBody {
    customer_name: Option<String>,
    customer_phone: Option<String>,
    service_type: Option<String>,
    #[serde(rename = "serviceProviderUniqueId")]
    service_provider_unique_id: Option<String>,
    date: Option<String>,
    time: Option<String>,
    address: Option<String>,
    notes: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn create(
    State(db_pool): State<SqlitePool>,
    Json(body): Json<CreateBody>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let customer_name = required(body.customer_name, "Customer name is required")?;
    let customer_phone = required(body.customer_phone, "Customer phone is required")?;
    let service_type = body
        .service_type
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| {
            AppError::Validation("Service type must be either driver or maid".to_string())
        })?;
    let provider_user_id = required(
        body.service_provider_unique_id,
        "Service provider user_id is required",
    )?;
    // Date and time are opaque display strings; nothing validates them as
    // calendar values.
    let date = required(body.date, "Date is required")?;
    let time = required(body.time, "Time is required")?;
    let address = required(body.address, "Address is required")?;
    let notes = body.notes.map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

    let provider = sqlx::query_as::<_, AccountRow>(
        "SELECT * FROM accounts WHERE user_id = ? AND role = ?",
    )
    .bind(&provider_user_id)
    .bind(service_type.as_str())
    .fetch_optional(&db_pool)
    .await?
    .ok_or_else(|| AppError::NotFound("Service provider not found".to_string()))?;

    let now = db::now_timestamp();
    let booking = BookingRow {
        id: Uuid::now_v7().to_string(),
        customer_name,
        customer_phone,
        service_type: service_type.as_str().to_string(),
        date,
        time,
        address,
        notes,
        status: BookingStatus::Pending.as_str().to_string(),
        provider_id: provider.id.clone(),
        assigned_to_user_id: provider.user_id.clone(),
        legacy_user_id: None,
        rating_score: None,
        rating_review: None,
        created_at: now.clone(),
        updated_at: now,
    };

    sqlx::query(
        "INSERT INTO bookings (id, customer_name, customer_phone, service_type, date, time, address,
                               notes, status, provider_id, assigned_to_user_id, legacy_user_id,
                               rating_score, rating_review, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, NULL, NULL, NULL, ?, ?)",
    )
    .bind(&booking.id)
    .bind(&booking.customer_name)
    .bind(&booking.customer_phone)
    .bind(&booking.service_type)
    .bind(&booking.date)
    .bind(&booking.time)
    .bind(&booking.address)
    .bind(&booking.notes)
    .bind(&booking.status)
    .bind(&booking.provider_id)
    .bind(&booking.assigned_to_user_id)
    .bind(&booking.created_at)
    .bind(&booking.updated_at)
    .execute(&db_pool)
    .await?;

    tracing::info!(booking_id = %booking.id, provider = %provider.user_id, "booking created");

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Booking created successfully",
            "booking": BookingView::from(booking),
        })),
    ))
}

fn required(value: Option<String>, message: &str) -> AppResult<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

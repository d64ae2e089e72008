use axum::{debug_handler, extract::{Path, State}, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::{self, BookingRow, BookingStatus, BookingView},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RateBody {
    rating: Option<i64>,
    review: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn rate(
    State(db_pool): State<SqlitePool>,
    Path(id): Path<String>,
    Json(body): Json<RateBody>,
) -> AppResult<Json<Value>> {
    let score = body
        .rating
        .filter(|score| (1..=5).contains(score))
        .ok_or_else(|| {
            AppError::Validation("Please provide a rating between 1 and 5".to_string())
        })?;

    let booking = sqlx::query_as::<_, BookingRow>("SELECT * FROM bookings WHERE id = ?")
        .bind(&id)
        .fetch_optional(&db_pool)
        .await?
        .ok_or_else(|| AppError::NotFound("Booking not found".to_string()))?;

    if booking.status != BookingStatus::Completed.as_str() {
        return Err(AppError::InvalidState(
            "You can only rate completed bookings".to_string(),
        ));
    }

    // Re-rating replaces the previous score; the mean below is always taken
    // over current scores, not a rolling sum.
    let updated_at = db::now_timestamp();
    sqlx::query("UPDATE bookings SET rating_score = ?, rating_review = ?, updated_at = ? WHERE id = ?")
        .bind(score)
        .bind(&body.review)
        .bind(&updated_at)
        .bind(&id)
        .execute(&db_pool)
        .await?;

    recompute_provider_rating(&db_pool, &booking.provider_id).await?;
    tracing::info!(booking_id = %id, score, "booking rated");

    Ok(Json(json!({
        "message": "Thank you for your feedback!",
        "booking": BookingView::from(BookingRow {
            rating_score: Some(score),
            rating_review: body.review,
            updated_at,
            ..booking
        }),
    })))
}

// Read-aggregate-then-write with no isolation; concurrent ratings for the
// same provider are last-write-wins on the stored mean.
pub(crate) async fn recompute_provider_rating(
    db_pool: &SqlitePool,
    provider_id: &str,
) -> AppResult<()> {
    let mean: Option<f64> = sqlx::query_scalar(
        "SELECT AVG(rating_score) FROM bookings WHERE provider_id = ? AND rating_score IS NOT NULL",
    )
    .bind(provider_id)
    .fetch_one(db_pool)
    .await?;

    if let Some(mean) = mean {
        sqlx::query("UPDATE accounts SET rating = ? WHERE id = ?")
            .bind(round_rating(mean))
            .bind(provider_id)
            .execute(db_pool)
            .await?;
    }

    Ok(())
}

fn round_rating(mean: f64) -> f64 {
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_rounds_to_one_decimal() {
        assert_eq!(round_rating((5.0 + 4.0 + 5.0) / 3.0), 4.7);
        assert_eq!(round_rating(4.65), 4.7);
        assert_eq!(round_rating(4.64), 4.6);
        assert_eq!(round_rating(5.0), 5.0);
    }
}

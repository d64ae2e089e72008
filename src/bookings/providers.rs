use axum::{debug_handler, extract::{Query, State}, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{AccountRow, AccountView, Role},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct ProvidersQuery {
    #[serde(rename = "type")]
    service_type: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn available_providers(
    State(db_pool): State<SqlitePool>,
    Query(query): Query<ProvidersQuery>,
) -> AppResult<Json<Vec<AccountView>>> {
    let role = query
        .service_type
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| {
            AppError::Validation("Please provide a valid service type (driver or maid)".to_string())
        })?;

    // Every account of the kind, ignoring is_available; the flag only filters
    // the /users listing.
    let providers = sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE role = ?")
        .bind(role.as_str())
        .fetch_all(&db_pool)
        .await?;

    Ok(Json(providers.into_iter().map(AccountView::from).collect()))
}

use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    auth::{password, token::{self, Keys}},
    db::{AccountRow, AccountView, Role},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct LoginBody {
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn login(
    State(db_pool): State<SqlitePool>,
    State(keys): State<Keys>,
    Json(body): Json<LoginBody>,
) -> AppResult<Json<Value>> {
    let email = body
        .email
        .filter(|s| s.contains('@'))
        .ok_or_else(|| AppError::Validation("Please include a valid email".to_string()))?;
    let plain = body
        .password
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation("Password is required".to_string()))?;
    let role = body
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| AppError::Validation("Role is required".to_string()))?;

    let account = sqlx::query_as::<_, AccountRow>(
        "SELECT * FROM accounts WHERE email = ? AND role = ?",
    )
    .bind(&email)
    .bind(role.as_str())
    .fetch_optional(&db_pool)
    .await?
    .ok_or(AppError::InvalidCredentials)?;

    if !password::verify_password(&plain, &account.password)? {
        return Err(AppError::InvalidCredentials);
    }

    let token = token::issue(&keys, &account.id, &account.user_id, role)?;
    tracing::info!(user_id = %account.user_id, role = %role, "login");

    Ok(Json(json!({ "token": token, "user": AccountView::from(account) })))
}

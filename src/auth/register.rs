use axum::{debug_handler, extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    auth::{generate_user_id, password, token::{self, Keys}},
    db::{self, AccountView, Role},
    AppError, AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct RegisterBody {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    role: Option<String>,
    phone: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn register(
    State(db_pool): State<SqlitePool>,
    State(keys): State<Keys>,
    Json(body): Json<RegisterBody>,
) -> AppResult<Json<Value>> {
    let name = required(body.name, "Name is required")?;
    let email = body
        .email
        .map(|s| s.trim().to_string())
        .filter(|s| s.contains('@') && !s.starts_with('@') && !s.ends_with('@'))
        .ok_or_else(|| AppError::Validation("Please include a valid email".to_string()))?;
    let plain = body
        .password
        .filter(|s| s.len() >= 6)
        .ok_or_else(|| {
            AppError::Validation("Please enter a password with 6 or more characters".to_string())
        })?;
    let role = body
        .role
        .as_deref()
        .and_then(Role::parse)
        .ok_or_else(|| AppError::Validation("Role is required".to_string()))?;
    let phone = required(body.phone, "Phone number is required")?;

    // Email uniqueness is scoped per role; the same address may hold both a
    // driver and a maid account.
    let existing = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(1) FROM accounts WHERE email = ? AND role = ?",
    )
    .bind(&email)
    .bind(role.as_str())
    .fetch_one(&db_pool)
    .await?;
    if existing > 0 {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let user_id = generate_user_id(&db_pool, role).await?;
    let hashed = password::hash_password(&plain)?;
    let id = Uuid::now_v7().to_string();
    let created_at = db::now_timestamp();

    sqlx::query(
        "INSERT INTO accounts (id, user_id, role, name, email, phone, password, is_available, rating, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, 1, 5.0, ?)",
    )
    .bind(&id)
    .bind(&user_id)
    .bind(role.as_str())
    .bind(&name)
    .bind(&email)
    .bind(&phone)
    .bind(&hashed)
    .bind(&created_at)
    .execute(&db_pool)
    .await?;

    let token = token::issue(&keys, &id, &user_id, role)?;
    tracing::info!(%user_id, role = %role, "registered new account");

    let user = AccountView {
        id,
        user_id,
        role: role.as_str().to_string(),
        name,
        email,
        phone,
        is_available: true,
        rating: 5.0,
        created_at,
    };

    Ok(Json(json!({ "token": token, "user": user })))
}

fn required(value: Option<String>, message: &str) -> AppResult<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(message.to_string()))
}

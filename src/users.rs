use axum::{debug_handler, extract::{Query, State}, Json};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    db::{AccountRow, AccountView, Role},
    AppResult, AppState,
};

#[derive(Debug, Deserialize)]
pub(crate) struct UsersQuery {
    #[serde(rename = "userType")]
    user_type: Option<String>,
    #[serde(rename = "isAvailable")]
    is_available: Option<String>,
}

#[debug_handler(state = AppState)]
pub(crate) async fn list(
    State(db_pool): State<SqlitePool>,
    Query(query): Query<UsersQuery>,
) -> AppResult<Json<Vec<AccountView>>> {
    let role = query.user_type.as_deref().and_then(Role::parse);
    // Only the literal "true" narrows to available accounts, as in the
    // original query contract.
    let only_available = query.is_available.as_deref() == Some("true");

    let accounts = match (role, only_available) {
        (Some(role), true) => {
            sqlx::query_as::<_, AccountRow>(
                "SELECT * FROM accounts WHERE role = ? AND is_available = 1",
            )
            .bind(role.as_str())
            .fetch_all(&db_pool)
            .await?
        }
        (Some(role), false) => {
            sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE role = ?")
                .bind(role.as_str())
                .fetch_all(&db_pool)
                .await?
        }
        (None, true) => {
            sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts WHERE is_available = 1")
                .fetch_all(&db_pool)
                .await?
        }
        (None, false) => {
            sqlx::query_as::<_, AccountRow>("SELECT * FROM accounts")
                .fetch_all(&db_pool)
                .await?
        }
    };

    Ok(Json(accounts.into_iter().map(AccountView::from).collect()))
}

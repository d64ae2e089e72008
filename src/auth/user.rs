use axum::{debug_handler, Json};

use crate::{auth::AuthUser, db::AccountView, AppResult, AppState};

#[debug_handler(state = AppState)]
pub(crate) async fn user(auth: AuthUser) -> AppResult<Json<AccountView>> {
    Ok(Json(auth.account.into()))
}

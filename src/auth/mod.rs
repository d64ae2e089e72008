mod guard;
mod login;
mod register;
mod user;

pub mod password;
pub mod token;

pub use guard::AuthUser;

use axum::{routing::{get, post}, Router};
use rand::seq::IndexedRandom;
use sqlx::SqlitePool;

use crate::{db::Role, AppResult, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register::register))
        .route("/login", post(login::login))
        .route("/user", get(user::user))
}

const USER_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const USER_ID_SUFFIX_LEN: usize = 6;

// Retried until unused; there is no retry cap, so a nearly-full identifier
// space would spin here.
pub(crate) async fn generate_user_id(db_pool: &SqlitePool, role: Role) -> AppResult<String> {
    loop {
        let suffix: String = (0..USER_ID_SUFFIX_LEN)
            .map(|_| *USER_ID_CHARSET.choose(&mut rand::rng()).unwrap() as char)
            .collect();
        let candidate = format!("{}_{}", role.as_str(), suffix);

        let taken = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM accounts WHERE user_id = ?")
            .bind(&candidate)
            .fetch_one(db_pool)
            .await?;

        if taken == 0 {
            return Ok(candidate);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use sqlx::sqlite::SqlitePoolOptions;

    #[tokio::test]
    async fn public_ids_are_role_prefixed() {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .unwrap();
        db::init(&pool).await.unwrap();

        let id = generate_user_id(&pool, Role::Driver).await.unwrap();
        let suffix = id.strip_prefix("driver_").unwrap();
        assert_eq!(suffix.len(), USER_ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

        let id = generate_user_id(&pool, Role::Maid).await.unwrap();
        assert!(id.starts_with("maid_"));
    }
}

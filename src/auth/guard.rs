use axum::{extract::FromRequestParts, http::{header, request::Parts}};

use crate::{auth::token, db::{AccountRow, Role}, AppError, AppResult, AppState};

pub struct AuthUser {
    pub account: AccountRow,
    pub role: Role,
}

impl AuthUser {
    pub fn require_driver(&self) -> AppResult<()> {
        if self.role == Role::Driver {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied. Drivers only.".to_string()))
        }
    }

    pub fn require_maid(&self) -> AppResult<()> {
        if self.role == Role::Maid {
            Ok(())
        } else {
            Err(AppError::Forbidden("Access denied. Maids only.".to_string()))
        }
    }

    pub fn require_provider(&self) -> AppResult<()> {
        match self.role {
            Role::Driver | Role::Maid => Ok(()),
        }
    }
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<AuthUser, AppError> {
        let header_value = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::MissingToken)?;

        let token = header_value
            .strip_prefix("Bearer ")
            .ok_or(AppError::MissingToken)?;

        let claims = token::verify(&state.keys, token)?;

        // The identity behind a still-valid token may have gone away.
        let account = sqlx::query_as::<_, AccountRow>(
            "SELECT * FROM accounts WHERE user_id = ? AND role = ?",
        )
        .bind(&claims.user_id)
        .bind(claims.role.as_str())
        .fetch_optional(&state.db_pool)
        .await?
        .ok_or(AppError::InvalidToken)?;

        tracing::debug!(user_id = %account.user_id, role = %claims.role, "authenticated request");

        Ok(AuthUser {
            account,
            role: claims.role,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> AuthUser {
        AuthUser {
            account: AccountRow {
                id: "internal".to_string(),
                user_id: format!("{role}_AB12CD"),
                role: role.as_str().to_string(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
                phone: "555-0100".to_string(),
                password: "$2b$12$hash".to_string(),
                is_available: true,
                rating: 5.0,
                created_at: "2024-06-01T10:00:00.000000Z".to_string(),
            },
            role,
        }
    }

    #[test]
    fn role_gates_match_the_attached_role() {
        assert!(user(Role::Driver).require_driver().is_ok());
        assert!(user(Role::Driver).require_maid().is_err());
        assert!(user(Role::Maid).require_maid().is_ok());
        assert!(user(Role::Maid).require_driver().is_err());
    }

    #[test]
    fn both_roles_count_as_providers() {
        assert!(user(Role::Driver).require_provider().is_ok());
        assert!(user(Role::Maid).require_provider().is_ok());
    }

    #[test]
    fn gate_failures_are_forbidden() {
        let err = user(Role::Maid).require_driver().unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }
}

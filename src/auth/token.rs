use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

use crate::{db::Role, AppError, AppResult};

pub const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Clone)]
pub struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    pub fn new(secret: &[u8]) -> Keys {
        Keys {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

// sub carries the store-assigned id, user_id the public identifier. There is
// no revocation list; a token stays valid until exp whatever happens to the
// account in the meantime.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub user_id: String,
    pub role: Role,
    pub exp: i64,
}

pub fn issue(keys: &Keys, id: &str, user_id: &str, role: Role) -> AppResult<String> {
    let exp = (OffsetDateTime::now_utc() + Duration::days(TOKEN_LIFETIME_DAYS)).unix_timestamp();
    let claims = Claims {
        sub: id.to_string(),
        user_id: user_id.to_string(),
        role,
        exp,
    };

    encode(&Header::default(), &claims, &keys.encoding)
        .map_err(|err| AppError::Internal(err.into()))
}

pub fn verify(keys: &Keys, token: &str) -> AppResult<Claims> {
    decode::<Claims>(token, &keys.decoding, &Validation::default())
        .map(|data| data.claims)
        .map_err(|err| match err.kind() {
            ErrorKind::ExpiredSignature => AppError::TokenExpired,
            _ => AppError::InvalidToken,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> Keys {
        Keys::new(b"unit-test-secret")
    }

    #[test]
    fn fresh_token_verifies() {
        let token = issue(&keys(), "internal-id", "driver_AB12CD", Role::Driver).unwrap();
        let claims = verify(&keys(), &token).unwrap();

        assert_eq!(claims.sub, "internal-id");
        assert_eq!(claims.user_id, "driver_AB12CD");
        assert_eq!(claims.role, Role::Driver);

        let now = OffsetDateTime::now_utc().unix_timestamp();
        let lifetime = Duration::days(TOKEN_LIFETIME_DAYS).whole_seconds();
        assert!((claims.exp - now - lifetime).abs() < 5);
    }

    #[test]
    fn expired_token_is_rejected_as_expired() {
        // Past the default 60s validation leeway.
        let claims = Claims {
            sub: "internal-id".to_string(),
            user_id: "maid_XY34ZW".to_string(),
            role: Role::Maid,
            exp: OffsetDateTime::now_utc().unix_timestamp() - 120,
        };
        let token = encode(&Header::default(), &claims, &keys().encoding).unwrap();

        assert!(matches!(verify(&keys(), &token), Err(AppError::TokenExpired)));
    }

    #[test]
    fn foreign_secret_is_rejected_as_invalid() {
        let token = issue(&keys(), "internal-id", "driver_AB12CD", Role::Driver).unwrap();
        let other = Keys::new(b"some-other-secret");

        assert!(matches!(verify(&other, &token), Err(AppError::InvalidToken)));
    }

    #[test]
    fn garbage_is_rejected_as_invalid() {
        assert!(matches!(
            verify(&keys(), "not-a-token"),
            Err(AppError::InvalidToken)
        ));
    }
}

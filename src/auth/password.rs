use bcrypt::{hash, verify, DEFAULT_COST};

use crate::AppResult;

pub fn hash_password(plain: &str) -> AppResult<String> {
    Ok(hash(plain, DEFAULT_COST)?)
}

// bcrypt::verify re-derives the hash and compares internally, which is the
// constant-time-safe comparison for stored credentials.
pub fn verify_password(plain: &str, hashed: &str) -> AppResult<bool> {
    Ok(verify(plain, hashed)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_verifies_and_is_not_cleartext() {
        let hashed = hash_password("hunter22").unwrap();

        assert_ne!(hashed, "hunter22");
        assert!(verify_password("hunter22", &hashed).unwrap());
        assert!(!verify_password("hunter23", &hashed).unwrap());
    }
}

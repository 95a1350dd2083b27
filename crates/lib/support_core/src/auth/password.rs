//! Password hashing via bcrypt.

use super::AuthError;

/// bcrypt cost factor.
const BCRYPT_COST: u32 = 12;

/// Minimum accepted password length at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Hash a password with bcrypt (cost 12).
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    bcrypt::hash(password, BCRYPT_COST)
        .map_err(|e| AuthError::Internal(format!("bcrypt hash: {e}")))
}

/// Verify a password against a bcrypt hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AuthError> {
    bcrypt::verify(password, hash).map_err(|e| AuthError::Internal(format!("bcrypt verify: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifies() {
        let a = hash_password("hunter22").expect("hash");
        let b = hash_password("hunter22").expect("hash");
        assert_ne!(a, b, "two hashes of the same password must differ");
        assert!(!a.contains("hunter22"));
        assert!(verify_password("hunter22", &a).expect("verify"));
        assert!(!verify_password("hunter23", &a).expect("verify"));
    }

    #[test]
    fn malformed_hash_is_an_internal_error() {
        let err = verify_password("pw", "not-a-bcrypt-hash").unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
    }
}

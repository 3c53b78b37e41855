use crate::errors::AppError;
use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};

// Hashes a password using bcrypt
pub fn hash_password(password: &str) -> Result<String, BcryptError> {
    hash(password, DEFAULT_COST)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, BcryptError> {
    verify(password, hash)
}

impl From<BcryptError> for AppError {
    fn from(err: BcryptError) -> Self {
        AppError::HashingError(format!("bcrypt error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_salted_and_verifiable() {
        let first = hash_password("admin123").unwrap();
        let second = hash_password("admin123").unwrap();

        assert_ne!(first, "admin123");
        assert_ne!(first, second);
        assert!(verify_password("admin123", &first).unwrap());
        assert!(!verify_password("admin124", &first).unwrap());
    }

    #[test]
    fn malformed_hash_is_an_error() {
        let err = verify_password("admin123", "not-a-hash").unwrap_err();
        assert!(matches!(AppError::from(err), AppError::HashingError(_)));
    }
}

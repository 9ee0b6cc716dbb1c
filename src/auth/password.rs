use crate::error::{AppError, AppResult};

pub fn hash(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AppError::Internal(format!("bcrypt hash failed: {e}")))
}

pub fn verify(password: &str, hashed: &str) -> AppResult<bool> {
    bcrypt::verify(password, hashed)
        .map_err(|e| AppError::Internal(format!("bcrypt verify failed: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 测试里用最低 cost，避免拖慢测试
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_then_verify() {
        let hashed = hash("secret123", TEST_COST).unwrap();
        assert_ne!(hashed, "secret123");
        assert!(verify("secret123", &hashed).unwrap());
        assert!(!verify("wrong", &hashed).unwrap());
    }

    #[test]
    fn same_password_hashes_differently() {
        let a = hash("secret123", TEST_COST).unwrap();
        let b = hash("secret123", TEST_COST).unwrap();
        assert_ne!(a, b);
    }
}

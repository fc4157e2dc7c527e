//! 密码哈希与密码策略

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use crate::utils::validation::MAX_PASSWORD_LEN;

/// 策略允许的特殊字符
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&";

/// 使用 argon2 生成带盐哈希 (PHC 字符串)
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// 校验密码；哈希无法解析时返回错误
pub fn verify_password(password: &str, hash: &str) -> Result<bool, argon2::password_hash::Error> {
    let parsed_hash = PasswordHash::new(hash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 新密码策略
///
/// - 至少 8 位
/// - 至少一个小写字母、一个大写字母、一个数字、一个 `@$!%*?&`
/// - 只允许字母、数字和上述符号
pub fn meets_policy(password: &str) -> bool {
    if password.len() < 8 || password.len() > MAX_PASSWORD_LEN {
        return false;
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c);
    password.chars().all(allowed)
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| PASSWORD_SYMBOLS.contains(c))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("Secret@123").unwrap();
        assert_ne!(hash, "Secret@123");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("Secret@123", &hash).unwrap());
        assert!(!verify_password("secret@123", &hash).unwrap());
    }

    #[test]
    fn test_same_password_different_salt() {
        let a = hash_password("Secret@123").unwrap();
        let b = hash_password("Secret@123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_policy() {
        assert!(meets_policy("Secret@123"));
        assert!(meets_policy("Aa1&aaaa"));
        assert!(!meets_policy("Aa1&aaa"), "too short");
        assert!(!meets_policy("secret@123"), "no uppercase");
        assert!(!meets_policy("SECRET@123"), "no lowercase");
        assert!(!meets_policy("Secret@abc"), "no digit");
        assert!(!meets_policy("Secret1234"), "no symbol");
        assert!(!meets_policy("Secret@123#"), "symbol outside the set");
        assert!(!meets_policy("Secret@ 123"), "whitespace");
    }
}

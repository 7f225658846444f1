use std::sync::LazyLock;

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::config::Config;

pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password.as_bytes(), cost)
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, bcrypt::BcryptError> {
    verify(password.as_bytes(), hash)
}

// 与正常用户同等代价的占位哈希，首次使用时生成
static DUMMY_HASH: LazyLock<Option<String>> =
    LazyLock::new(|| hash_password("placeholder-credential", DEFAULT_COST).ok());

/// 用户不存在时执行一次等价的 bcrypt 校验，结果恒为 false
pub fn verify_against_dummy(password: &str) -> bool {
    match DUMMY_HASH.as_deref() {
        Some(dummy) => {
            let _ = verify_password(password, dummy);
        }
        None => tracing::warn!("Placeholder password hash unavailable"),
    }
    false
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // 用户ID
    pub sid: String, // 绑定的会话ID
    pub exp: i64,    // 过期时间
    pub iat: i64,    // 签发时间
}

/// 签发与会话绑定的访问令牌，有效期与会话一致
pub fn generate_token(
    user_id: i64,
    session_id: &str,
    config: &Config,
) -> Result<(String, i64), jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let ttl = TimeDelta::from_std(config.session_ttl()).unwrap_or(TimeDelta::MAX);
    let expiration = now
        .checked_add_signed(ttl)
        .map(|t| t.timestamp())
        .unwrap_or(i64::MAX);

    let claims = Claims {
        sub: user_id.to_string(),
        sid: session_id.to_string(),
        exp: expiration,
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )?;

    Ok((token, expiration))
}

pub fn verify_token(token: &str, config: &Config) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

pub mod error_codes {
    pub const VALIDATION_ERROR: i32 = 1000;
    pub const AUTH_FAILED: i32 = 1002;
    pub const NOT_FOUND: i32 = 1004;
    pub const INTERNAL_ERROR: i32 = 5000;
    pub const DEPENDENCY_ERROR: i32 = 5001;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_round_trip() {
        let hashed = hash_password("s3cret!", 4).unwrap();
        assert_ne!(hashed, "s3cret!");
        assert!(verify_password("s3cret!", &hashed).unwrap());
        assert!(!verify_password("admin", &hashed).unwrap());
    }

    #[test]
    fn dummy_verification_does_full_cost_work_and_never_matches() {
        let dummy = DUMMY_HASH.as_deref().unwrap();
        assert_eq!(dummy.split('$').nth(2), Some(DEFAULT_COST.to_string().as_str()));
        assert!(!verify_against_dummy("placeholder-credential"));
        assert!(!verify_against_dummy("anything"));
    }

    #[test]
    fn token_carries_user_and_session() {
        let config = Config::new("unit-test-secret");
        let (token, exp) = generate_token(42, "sess-abc", &config).unwrap();

        let claims = verify_token(&token, &config).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.sid, "sess-abc");
        assert_eq!(claims.exp, exp);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let issuer = Config::new("one-secret");
        let verifier = Config::new("another-secret");
        let (token, _) = generate_token(1, "sess", &issuer).unwrap();

        assert!(verify_token(&token, &verifier).is_err());
        assert!(verify_token("Bearer", &verifier).is_err());
    }
}

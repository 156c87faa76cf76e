//! Authentication utilities

use anyhow::{bail, Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;

const PBKDF2_ITERATIONS: u32 = 100_000;
const HASH_LENGTH: usize = 32;

/// Access tokens live for 30 days
pub const ACCESS_MAX_AGE: u64 = 30 * 24 * 3600;

/// user identity stored in the jwt sub claim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub id: i64,
    pub username: String,
}

/// `sub` is the user id as a string, the only form jsonwebtoken validates
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub username: String,
    pub iat: i64,
    pub exp: i64,
    pub token_type: String,
}

/// hash a password using pbkdf2-sha256, salted with the server id
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut hash = [0u8; HASH_LENGTH];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), PBKDF2_ITERATIONS, &mut hash);
    hex::encode(hash)
}

/// verify a password against a hash using constant-time comparison
pub fn verify_password(password: &str, hash: &str, salt: &str) -> bool {
    let computed_hash = hash_password(password, salt);
    computed_hash.as_bytes().ct_eq(hash.as_bytes()).into()
}

/// Sign a session token for `identity`, valid for `ttl_secs`
pub fn create_jwt(
    identity: UserIdentity,
    secret: &str,
    token_type: &str,
    ttl_secs: u64,
) -> Result<String> {
    let now = Utc::now().timestamp();
    let claims = Claims {
        sub: identity.id.to_string(),
        username: identity.username,
        iat: now,
        exp: now + i64::try_from(ttl_secs)?,
        token_type: token_type.to_string(),
    };

    let key = EncodingKey::from_secret(secret.as_bytes());
    Ok(encode(&Header::new(Algorithm::HS256), &claims, &key)?)
}

impl Claims {
    pub fn identity(&self) -> Result<UserIdentity> {
        let id = self
            .sub
            .parse()
            .with_context(|| format!("malformed subject {:?}", self.sub))?;
        Ok(UserIdentity {
            id,
            username: self.username.clone(),
        })
    }
}

/// Check signature and expiry. With `expected_type`, the token must carry
/// exactly that type.
pub fn verify_jwt(token: &str, secret: &str, expected_type: Option<&str>) -> Result<Claims> {
    let key = DecodingKey::from_secret(secret.as_bytes());
    let claims = decode::<Claims>(token, &key, &Validation::new(Algorithm::HS256))?.claims;

    match expected_type {
        Some(t) if claims.token_type != t => bail!("expected a {} token", t),
        _ => Ok(claims),
    }
}

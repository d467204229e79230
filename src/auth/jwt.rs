use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const SESSION_TTL_HOURS: i64 = 24;

/// Payload of the session cookie. `sub` is the user id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub exp: i64,
}

impl SessionClaims {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (Utc::now() + Duration::hours(SESSION_TTL_HOURS)).timestamp(),
        }
    }

    pub fn user_id(&self) -> Option<Uuid> {
        self.sub.parse().ok()
    }
}

pub fn encode_session<K: AsRef<[u8]>>(
    claims: &SessionClaims,
    key: K,
) -> jsonwebtoken::errors::Result<String> {
    let key = EncodingKey::from_secret(key.as_ref());
    jsonwebtoken::encode(&Header::default(), claims, &key)
}

pub fn decode_session<K: AsRef<[u8]>>(
    token: &str,
    key: K,
) -> jsonwebtoken::errors::Result<SessionClaims> {
    let key = DecodingKey::from_secret(key.as_ref());
    let data = jsonwebtoken::decode::<SessionClaims>(token, &key, &Validation::default())?;
    Ok(data.claims)
}

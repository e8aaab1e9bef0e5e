//! Session capability tokens.
//!
//! A capability token is a signed, self-contained bearer credential for
//! one occurrence and one acting user, minted when the user views today's
//! sessions and redeemed on join/cancel. The service keeps no record of
//! issued tokens; the signature plus the mandatory expiry are the whole
//! authorization story. Tokens expire at the end of the occurrence's
//! calendar date (UTC).

use chrono::{NaiveDate, NaiveTime};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use eduportal_core::error::CoreError;
use eduportal_core::types::DbId;
use eduportal_db::models::occurrence::TodaySessionRow;

/// Claims carried by a session capability token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CapabilityClaims {
    /// Acting user the capability was minted for.
    pub sub: DbId,
    pub occurrence_id: DbId,
    pub timetable_id: DbId,
    pub classroom_id: DbId,
    pub class_date: NaiveDate,
    pub class_time: NaiveTime,
    /// Meeting link handed back on a successful join.
    pub link: String,
    /// Expiration time (UTC Unix timestamp); always the end of `class_date`.
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
}

/// Configuration for capability token signing.
#[derive(Debug, Clone)]
pub struct CapabilityConfig {
    /// HMAC-SHA256 secret; distinct from the login-token secret.
    pub secret: String,
}

impl CapabilityConfig {
    /// Load capability-token configuration from the environment.
    ///
    /// # Panics
    ///
    /// Panics if `CAPABILITY_TOKEN_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret = std::env::var("CAPABILITY_TOKEN_SECRET")
            .expect("CAPABILITY_TOKEN_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "CAPABILITY_TOKEN_SECRET must not be empty");
        Self { secret }
    }
}

/// Mint a capability token for one of today's sessions.
pub fn mint(
    session: &TodaySessionRow,
    acting_user: DbId,
    config: &CapabilityConfig,
) -> Result<String, CoreError> {
    let iat = chrono::Utc::now().timestamp();
    let exp = session
        .class_date
        .and_hms_opt(23, 59, 59)
        .map(|dt| dt.and_utc().timestamp())
        .unwrap_or(iat);

    let claims = CapabilityClaims {
        sub: acting_user,
        occurrence_id: session.occurrence_id,
        timetable_id: session.timetable_id,
        classroom_id: session.classroom_id,
        class_date: session.class_date,
        class_time: session.class_time,
        link: session.join_link.clone(),
        exp,
        iat,
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|err| CoreError::Internal(format!("capability token signing failed: {err}")))
}

/// Verify a capability token and return its claims.
///
/// Signature, structure, and expiry failures all collapse into the one
/// `InvalidToken` kind; callers never learn which check failed.
pub fn redeem(token: &str, config: &CapabilityConfig) -> Result<CapabilityClaims, CoreError> {
    decode::<CapabilityClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(), // HS256, validates exp
    )
    .map(|data| data.claims)
    .map_err(|_| CoreError::InvalidToken("capability token is invalid or expired".into()))
}

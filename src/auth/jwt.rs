use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::debug;
use uuid::Uuid;

use super::claims::Claims;
use crate::{config::JwtConfig, state::AppState};

/// Holds JWT signing and verification keys with config data.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    audience: String,
    ttl: Duration,
}

impl JwtKeys {
    pub fn new(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            issuer: cfg.issuer.clone(),
            audience: cfg.audience.clone(),
            ttl: Duration::from_secs((cfg.ttl_minutes.max(0) as u64) * 60),
        }
    }

    /// Issues a session token carrying the user id and email.
    pub fn sign(&self, user_id: Uuid, email: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: user_id,
            email: email.to_owned(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(user_id = %user_id, "jwt signed");
        Ok(token)
    }

    /// Checks signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> anyhow::Result<Claims> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        let data = decode::<Claims>(token, &self.decoding, &validation)?;
        debug!(user_id = %data.claims.sub, "jwt verified");
        Ok(data.claims)
    }
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_keys(secret: &str, issuer: &str, audience: &str) -> JwtKeys {
        JwtKeys::new(&JwtConfig {
            secret: secret.into(),
            issuer: issuer.into(),
            audience: audience.into(),
            ttl_minutes: 60 * 24 * 7,
        })
    }

    #[test]
    fn sign_and_verify_token() {
        let keys = make_keys("dev-secret", "test-issuer", "test-aud");
        let user_id = Uuid::new_v4();
        let token = keys.sign(user_id, "someone@example.com").expect("sign");
        let claims = keys.verify(&token).expect("verify token");
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.email, "someone@example.com");
        assert_eq!(claims.iss, "test-issuer");
        assert_eq!(claims.aud, "test-aud");
    }

    #[test]
    fn token_is_valid_for_seven_days() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let token = keys.sign(Uuid::new_v4(), "a@b.co").unwrap();
        let claims = keys.verify(&token).unwrap();
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
    }

    #[test]
    fn verify_rejects_foreign_signature() {
        let ours = make_keys("secret-a", "iss", "aud");
        let theirs = make_keys("secret-b", "iss", "aud");
        let token = theirs.sign(Uuid::new_v4(), "a@b.co").unwrap();
        assert!(ours.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_wrong_issuer_or_audience() {
        let good_keys = make_keys("same-secret", "good-iss", "good-aud");
        let bad_keys = make_keys("same-secret", "bad-iss", "bad-aud");
        let token = good_keys.sign(Uuid::new_v4(), "a@b.co").unwrap();
        assert!(bad_keys.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        let keys = make_keys("dev-secret", "iss", "aud");
        let issued = OffsetDateTime::now_utc() - TimeDuration::days(8);
        let claims = Claims {
            sub: Uuid::new_v4(),
            email: "a@b.co".into(),
            iat: issued.unix_timestamp() as usize,
            exp: (issued + TimeDuration::days(7)).unix_timestamp() as usize,
            iss: "iss".into(),
            aud: "aud".into(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"dev-secret"),
        )
        .unwrap();
        assert!(keys.verify(&token).is_err());
    }
}

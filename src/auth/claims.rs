use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT payload identifying the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,     // user ID
    pub email: String, // user email at issuance
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
    pub iss: String,   // issuer
    pub aud: String,   // audience
}

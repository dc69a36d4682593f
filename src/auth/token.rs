use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tracing::debug;

use crate::config::JwtConfig;
use crate::error::{Error, Result};
use crate::model::User;

/// Claim set embedded in issued tokens. No `exp` claim: issued tokens never
/// expire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub password: String,
    pub iat: i64,
}

/// A freshly signed token plus the configured informational message.
#[derive(Debug, Serialize)]
pub struct IssuedToken {
    pub token: String,
    pub message: String,
}

/// Signs and verifies the HS256 tokens minted at login. The secret is loaded
/// once at startup and immutable afterwards.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    message: String,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            message: config.message.clone(),
        }
    }

    pub fn issue(&self, user: &User) -> Result<IssuedToken> {
        let claims = Claims {
            email: user.email.clone(),
            password: user.password.clone(),
            iat: OffsetDateTime::now_utc().unix_timestamp(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| Error::Store(e.into()))?;
        debug!(email = %claims.email, "token issued");
        Ok(IssuedToken {
            token,
            message: self.message.clone(),
        })
    }

    pub fn decode(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no exp claim, so expiry checks are disabled.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        let data =
            decode::<Claims>(token, &self.decoding, &validation).map_err(|e| match e.kind() {
                ErrorKind::InvalidSignature => Error::InvalidSignature,
                _ => Error::MalformedToken,
            })?;
        debug!(email = %data.claims.email, "token verified");
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec(secret: &str) -> TokenCodec {
        TokenCodec::new(&JwtConfig {
            secret: secret.into(),
            message: "Token generated successfully".into(),
        })
    }

    fn user() -> User {
        User {
            user_id: 1,
            name: "Jane Doe".into(),
            email: "jane@example.org".into(),
            password: "s3cret".into(),
            contact_number: "42".into(),
        }
    }

    #[test]
    fn issue_then_decode_recovers_the_claims() {
        let codec = codec("dev-secret");
        let issued = codec.issue(&user()).expect("issue");
        assert_eq!(issued.message, "Token generated successfully");

        let claims = codec.decode(&issued.token).expect("decode");
        assert_eq!(claims.email, "jane@example.org");
        assert_eq!(claims.password, "s3cret");
        assert!(claims.iat > 0);
    }

    #[test]
    fn decode_rejects_a_token_signed_with_another_secret() {
        let issued = codec("dev-secret").issue(&user()).expect("issue");
        let err = codec("other-secret").decode(&issued.token).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));
    }

    #[test]
    fn decode_rejects_a_tampered_signature() {
        let codec = codec("dev-secret");
        let issued = codec.issue(&user()).expect("issue");

        let mut tampered = issued.token;
        let replacement = if tampered.ends_with('A') { 'B' } else { 'A' };
        tampered.pop();
        tampered.push(replacement);

        let err = codec.decode(&tampered).unwrap_err();
        assert!(matches!(err, Error::InvalidSignature));
    }

    #[test]
    fn decode_rejects_garbage() {
        let codec = codec("dev-secret");
        let err = codec.decode("definitely-not-a-jwt").unwrap_err();
        assert!(matches!(err, Error::MalformedToken));
    }
}

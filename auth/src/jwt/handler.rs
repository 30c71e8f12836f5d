use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// Default token lifetime: 24 hours.
pub const DEFAULT_EXPIRES_IN_SECONDS: i64 = 86_400;

/// JWT issuer and verifier.
///
/// Signs with HS256 using a single shared secret. Expiry is checked here
/// rather than by `jsonwebtoken` so that a token is rejected exactly at its
/// `exp` instant, with no leeway.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
    expires_in_seconds: i64,
}

impl JwtHandler {
    /// Create a new JWT handler with a secret key.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing tokens
    /// * `expires_in_seconds` - Lifetime of every issued token
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Changing the secret invalidates every outstanding token
    pub fn new(secret: &[u8], expires_in_seconds: i64) -> Self {
        let algorithm = Algorithm::HS256;

        let mut validation = Validation::new(algorithm);
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
            expires_in_seconds,
        }
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.expires_in_seconds
    }

    /// Issue a token for `subject` starting now.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn issue(&self, subject: impl ToString) -> Result<String, JwtError> {
        self.issue_at(subject, Utc::now().timestamp())
    }

    /// Issue a token for `subject` as if signed at `issued_at`.
    pub fn issue_at(&self, subject: impl ToString, issued_at: i64) -> Result<String, JwtError> {
        let claims = Claims::for_subject(subject, issued_at, self.expires_in_seconds);
        self.encode(&claims)
    }

    /// Sign arbitrary claims.
    ///
    /// # Errors
    /// * `EncodingFailed` - Token encoding failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        let header = Header::new(self.algorithm);

        encode(&header, claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a token against the current time.
    ///
    /// # Errors
    /// * `InvalidSignature` - Token was not signed with this secret
    /// * `Malformed` - Token or payload could not be decoded
    /// * `Expired` - Current time is at or past `exp`
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        self.verify_at(token, Utc::now().timestamp())
    }

    /// Verify a token as of `now`.
    pub fn verify_at(&self, token: &str, now: i64) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)?.claims;

        if claims.is_expired(now) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

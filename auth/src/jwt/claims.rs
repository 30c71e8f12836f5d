use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

/// Session token payload.
///
/// A token asserts a single subject between `iat` and `exp`; it carries no
/// other identity data and is never mutated after signing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user identifier)
    pub sub: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Create claims for a subject valid for `ttl_seconds` after `issued_at`.
    pub fn for_subject(subject: impl ToString, issued_at: i64, ttl_seconds: i64) -> Self {
        Self {
            sub: subject.to_string(),
            iat: issued_at,
            exp: issued_at + ttl_seconds,
        }
    }

    /// Check if token is expired.
    ///
    /// A token is valid strictly before `exp` and expired from `exp` onwards.
    pub fn is_expired(&self, current_timestamp: i64) -> bool {
        current_timestamp >= self.exp
    }

    /// Parse the subject into a typed identifier.
    pub fn subject_as<T: FromStr>(&self) -> Option<T> {
        self.sub.parse().ok()
    }
}

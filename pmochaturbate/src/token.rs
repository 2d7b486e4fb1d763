//! Per-request anti-forgery token
//!
//! The edge API only checks that the `X-CSRFToken` header echoes the
//! `csrftoken` cookie, so any random 32-character uppercase hex value works.
//! A token lives for exactly one request.

use std::fmt;
use uuid::Uuid;

/// Name of the anti-forgery cookie
pub const CSRF_COOKIE_NAME: &str = "csrftoken";

/// Name of the anti-forgery header
pub const CSRF_HEADER_NAME: &str = "X-CSRFToken";

/// Length of a generated token
pub const CSRF_TOKEN_LEN: usize = 32;

/// Anti-forgery token sent both as a cookie and as a header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfToken(String);

impl CsrfToken {
    /// Generate a fresh token from a v4 UUID
    pub fn generate() -> Self {
        let hex = Uuid::new_v4().simple().to_string().to_uppercase();
        Self(hex)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for the `Cookie` request header
    pub fn cookie(&self) -> String {
        format!("{}={}", CSRF_COOKIE_NAME, self.0)
    }
}

impl fmt::Display for CsrfToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

//! Shared directory session identifier.

use std::fmt;

/// Opaque directory session identifier carried as the `JSESSIONID` cookie.
///
/// The empty token means no session has been established yet. Tokens are
/// replaced wholesale by a refresh, never edited.
///
/// # Examples
/// ```
/// use lookup_proxy::domain::SessionToken;
///
/// let token = SessionToken::new("abc123");
/// assert!(!token.is_empty());
/// assert!(SessionToken::empty().is_empty());
/// assert_eq!(format!("{token:?}"), "SessionToken(<redacted>)");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    /// Wrap a raw session cookie value.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The "no session yet" sentinel.
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// True before the first successful login.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str("SessionToken(<empty>)")
        } else {
            f.write_str("SessionToken(<redacted>)")
        }
    }
}

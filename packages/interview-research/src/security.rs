//! Provider API keys.
//!
//! Firecrawl and OpenAI keys travel through [`ResearchConfig`] and the HTTP
//! clients wrapped in [`SecretString`], which prints as `[REDACTED]` so a
//! logged config or client never leaks a key.
//!
//! [`ResearchConfig`]: crate::config::ResearchConfig

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

const REDACTED: &str = "[REDACTED]";

/// An API key held in a zeroize-on-drop box.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// The raw key, for request headers only.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }

    /// Blank keys count as missing credentials.
    pub fn is_empty(&self) -> bool {
        self.expose().trim().is_empty()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl From<String> for SecretString {
    fn from(key: String) -> Self {
        Self::new(key)
    }
}

impl From<&str> for SecretString {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_redacted() {
        let secret = SecretString::new("fc-super-secret-key");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(format!("{}", secret), "[REDACTED]");
        assert_eq!(secret.expose(), "fc-super-secret-key");
    }

    #[test]
    fn test_key_hidden_inside_derived_debug() {
        #[derive(Debug)]
        struct Holder {
            _key: SecretString,
        }

        let holder = Holder { _key: SecretString::from("sk-live-123") };
        let debug = format!("{:?}", holder);
        assert!(!debug.contains("sk-live-123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_blank_secret_is_empty() {
        assert!(SecretString::new("   ").is_empty());
        assert!(!SecretString::new("sk-1").is_empty());
    }
}

use secrecy::{ExposeSecret, SecretString};

/// Opaque session identifier carried by the session cookie
///
/// The value is a credential: it is kept behind a `SecretString` so that it
/// never shows up in `Debug` output or in tracing spans.
#[derive(Debug)]
pub struct SessionId(SecretString);

impl SessionId {
    /// Parse a session identifier from a raw cookie value
    pub fn parse(value: String) -> Result<Self, String> {
        if value.trim().is_empty() {
            Err("Session identifier is empty".to_string())
        } else {
            Ok(Self(SecretString::from(value)))
        }
    }

    /// Expose the raw identifier, e.g. to look it up in a store
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

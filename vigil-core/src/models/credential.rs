use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Platform access credential.
///
/// Opaque bearer value. It stays valid until the platform rejects it; no TTL
/// is tracked. Values are immutable and cloned per consumer, never shared
/// mutably.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credential {
    token: String,
    acquired_at: DateTime<Utc>,
}

impl Credential {
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self::with_acquired_at(token, Utc::now())
    }

    #[must_use]
    pub fn with_acquired_at(token: impl Into<String>, acquired_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            acquired_at,
        }
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Token safe for logs and terminal output
    #[must_use]
    pub fn masked_token(&self) -> String {
        mask(&self.token)
    }

    #[must_use]
    pub const fn acquired_at(&self) -> DateTime<Utc> {
        self.acquired_at
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token", &mask(&self.token))
            .field("acquired_at", &self.acquired_at)
            .finish()
    }
}

/// Keep the first four characters, hide the rest
pub(crate) fn mask(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 4 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

//! Per-player move credentials.

use tracing::instrument;
use uuid::Uuid;

/// Opaque secret a player presents to move on their own behalf.
///
/// Issued once at join time and handed back to the caller. `Debug` is
/// redacted so the value never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Issues a fresh random credential.
    #[instrument]
    pub fn issue() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    /// Checks a presented value against this credential.
    ///
    /// Accepts the bare token or the `Bearer <token>` form.
    pub fn matches(&self, presented: &str) -> bool {
        let presented = presented.trim();
        let token = presented.strip_prefix("Bearer ").unwrap_or(presented);
        token == self.0
    }

    /// The token text to return to the player.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issued_credentials_differ() {
        assert_ne!(Credential::issue(), Credential::issue());
    }

    #[test]
    fn test_matches_bare_and_bearer() {
        let cred = Credential::issue();
        let token = cred.expose().to_string();
        assert!(cred.matches(&token));
        assert!(cred.matches(&format!("Bearer {token}")));
        assert!(!cred.matches(""));
        assert!(!cred.matches("123"));
    }

    #[test]
    fn test_debug_is_redacted() {
        let cred = Credential::issue();
        assert!(!format!("{cred:?}").contains(cred.expose()));
    }
}

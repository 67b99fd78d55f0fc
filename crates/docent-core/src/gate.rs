//! Password gate that unlocks document upload.

use crate::session::SessionState;

/// Plaintext password comparison against the configured admin secret.
///
/// There is no hashing, lockout or rate limiting. With no secret configured
/// the gate never opens.
#[derive(Debug, Clone, Default)]
pub struct AccessGate {
    secret: Option<String>,
}

impl AccessGate {
    pub fn new(secret: Option<String>) -> Self {
        Self {
            secret: secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    pub fn verify(&self, submitted: &str) -> bool {
        matches!(&self.secret, Some(secret) if secret == submitted)
    }

    /// Marks the session as admin on a match. The flag is sticky: a later
    /// mismatch does not clear it.
    pub fn authenticate(&self, state: &mut SessionState, submitted: &str) -> bool {
        if self.verify(submitted) {
            state.admin_authenticated = true;
        }
        state.admin_authenticated
    }

    /// Whether the upload control is available. Depends only on the
    /// session's sticky flag, not on the currently configured secret.
    pub fn upload_allowed(state: &SessionState) -> bool {
        state.admin_authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matching_password_unlocks_upload() {
        let gate = AccessGate::new(Some("s3cret".to_string()));
        let mut state = SessionState::new();

        assert!(gate.authenticate(&mut state, "s3cret"));
        assert!(AccessGate::upload_allowed(&state));
    }

    #[test]
    fn test_wrong_password_never_unlocks() {
        let gate = AccessGate::new(Some("s3cret".to_string()));
        let mut state = SessionState::new();

        for attempt in ["", "S3CRET", "s3cret ", "admin", "s3cre"] {
            assert!(!gate.authenticate(&mut state, attempt));
        }
        assert!(!AccessGate::upload_allowed(&state));
    }

    #[test]
    fn test_flag_is_sticky() {
        let gate = AccessGate::new(Some("s3cret".to_string()));
        let mut state = SessionState::new();

        gate.authenticate(&mut state, "s3cret");
        assert!(gate.authenticate(&mut state, "wrong"));
        assert!(AccessGate::upload_allowed(&state));
    }

    #[test]
    fn test_unconfigured_gate_stays_closed() {
        let mut state = SessionState::new();
        for gate in [AccessGate::new(None), AccessGate::new(Some(String::new()))] {
            assert!(!gate.is_configured());
            assert!(!gate.authenticate(&mut state, ""));
        }
    }
}

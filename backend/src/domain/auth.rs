//! Static admin secret validation.
//!
//! The admin surface is guarded by a single process-wide shared password
//! supplied through configuration. No session or token is issued; callers
//! re-send the password whenever they want a protected action.

use constant_time_eq::constant_time_eq;

/// Process-wide admin password injected at startup.
///
/// Comparison is constant-time so response latency does not leak how much of
/// a candidate password matched.
///
/// # Examples
/// ```
/// use registration_backend::domain::AdminSecret;
///
/// let secret = AdminSecret::new("supersecret");
/// assert!(secret.verify("supersecret"));
/// assert!(!secret.verify("guess"));
/// ```
#[derive(Clone)]
pub struct AdminSecret(String);

impl AdminSecret {
    /// Wrap the configured secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Check a candidate password against the configured secret.
    #[must_use]
    pub fn verify(&self, candidate: &str) -> bool {
        constant_time_eq(self.0.as_bytes(), candidate.as_bytes())
    }
}

impl std::fmt::Debug for AdminSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AdminSecret").field(&"<redacted>").finish()
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("supersecret", "supersecret", true)]
    #[case("supersecret", "SUPERSECRET", false)]
    #[case("supersecret", "supersecret ", false)]
    #[case("supersecret", "", false)]
    fn verify_compares_exact_bytes(
        #[case] configured: &str,
        #[case] candidate: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(AdminSecret::new(configured).verify(candidate), expected);
    }

    #[rstest]
    fn debug_output_redacts_the_secret() {
        let rendered = format!("{:?}", AdminSecret::new("supersecret"));
        assert!(!rendered.contains("supersecret"));
    }
}

//! The gate secret.

use std::fmt;

/// Secret used when none is supplied at build time.
pub const FALLBACK_SECRET: &str = "HK-THANGO25";

/// The code that opens the gate. Compared verbatim and case-sensitively.
#[derive(Clone, PartialEq, Eq)]
pub struct GateSecret(String);

impl GateSecret {
    /// Wraps an explicit secret.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// The secret baked in through `JOURNEY_SECRET_CODE` at build time, or
    /// [`FALLBACK_SECRET`].
    #[must_use]
    pub fn built_in() -> Self {
        Self::new(
            option_env!("JOURNEY_SECRET_CODE")
                .filter(|code| !code.is_empty())
                .unwrap_or(FALLBACK_SECRET),
        )
    }

    /// Whether `candidate` is exactly the secret. No trimming, no case folding.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        candidate == self.0
    }
}

impl Default for GateSecret {
    fn default() -> Self {
        Self::built_in()
    }
}

impl fmt::Debug for GateSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("GateSecret(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_only_the_exact_code() {
        let secret = GateSecret::new("HK-THANGO25");

        assert!(secret.matches("HK-THANGO25"));
        for candidate in ["hk-thango25", " HK-THANGO25", "HK-THANGO25 ", "", "HK-THANGO2"] {
            assert!(!secret.matches(candidate), "{candidate:?}");
        }
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let secret = GateSecret::new("open sesame");
        assert!(!format!("{secret:?}").contains("sesame"));
    }
}

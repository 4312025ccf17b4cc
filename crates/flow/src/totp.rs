//! Time-based one-time codes and retry alignment with the rotation window.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use totp_rs::{Algorithm, Secret, TOTP};

use crate::error::TwoFactorError;

/// Rotation step the provider uses.
pub const STEP_SECS: u64 = 30;

/// Extra seconds past the window boundary before retrying, so the new code
/// is comfortably inside its window when it lands.
const WINDOW_BUFFER_SECS: u64 = 2;

/// Six-digit SHA-1 TOTP generator over a base32 seed.
///
/// GitHub seeds are shorter than the RFC 4226 minimum, so construction goes
/// through the unchecked path after the base32 decode has validated the seed.
pub struct TotpGenerator {
    inner: TOTP,
}

impl TotpGenerator {
    pub fn new(seed: &str) -> Result<Self, TwoFactorError> {
        let normalized = seed.trim().replace(' ', "").to_uppercase();
        let bytes = Secret::Encoded(normalized)
            .to_bytes()
            .map_err(|e| TwoFactorError::InvalidSecret(format!("{e:?}")))?;
        Ok(Self {
            inner: TOTP::new_unchecked(Algorithm::SHA1, 6, 1, STEP_SECS, bytes),
        })
    }

    pub fn code_at(&self, unix_secs: u64) -> String {
        self.inner.generate(unix_secs)
    }

    pub fn code_now(&self) -> String {
        self.code_at(now_unix_secs())
    }
}

/// How long to sleep so the next attempt lands just past the next 30-second
/// boundary: `32 - (now mod 30)` seconds, anywhere from 3 to 32 depending on
/// phase.
pub fn delay_to_next_window(now_unix_secs: u64) -> Duration {
    Duration::from_secs(STEP_SECS + WINDOW_BUFFER_SECS - (now_unix_secs % STEP_SECS))
}

pub fn next_window_delay() -> Duration {
    delay_to_next_window(now_unix_secs())
}

fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 6238 test seed: ASCII "12345678901234567890" in base32.
    const RFC_SEED: &str = "GEZDGNBVGY3TQOJQGEZDGNBVGY3TQOJQ";

    #[test]
    fn generates_rfc6238_vector() {
        let totp = TotpGenerator::new(RFC_SEED).unwrap();
        // T=59 is counter 1; the 8-digit RFC vector is 94287082.
        assert_eq!(totp.code_at(59), "287082");
    }

    #[test]
    fn codes_are_six_digits() {
        let totp = TotpGenerator::new(RFC_SEED).unwrap();
        let code = totp.code_now();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn accepts_lowercase_and_spaced_seeds() {
        let totp = TotpGenerator::new("gezd gnbv gy3t qojq gezd gnbv gy3t qojq").unwrap();
        assert_eq!(totp.code_at(59), "287082");
    }

    #[test]
    fn rejects_non_base32_seeds() {
        assert!(matches!(
            TotpGenerator::new("not!base32"),
            Err(TwoFactorError::InvalidSecret(_))
        ));
    }

    #[test]
    fn window_delay_tracks_wall_clock_phase() {
        assert_eq!(delay_to_next_window(0), Duration::from_secs(32));
        assert_eq!(delay_to_next_window(29), Duration::from_secs(3));
        assert_eq!(delay_to_next_window(30), Duration::from_secs(32));
        assert_eq!(delay_to_next_window(59), Duration::from_secs(3));
        for t in 0..120 {
            let d = delay_to_next_window(t).as_secs();
            assert!((3..=32).contains(&d), "t={t} d={d}");
        }
    }
}

//! URL-based page classification.
//!
//! The flow never keeps a state machine; it reclassifies the current location
//! fresh at every step, exactly like the checks it replaces. Classification
//! can race with an in-flight navigation, which is why every caller pairs it
//! with an explicit settle wait.

/// What kind of page the current location looks like.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// GitHub credential form.
    Login,
    /// Out-of-band device approval (email link or mobile app).
    DeviceVerification,
    /// TOTP / OTP prompt.
    TwoFactor,
    /// OAuth application consent screen.
    OauthConsent,
    /// Anything else, including the target console itself.
    Other,
}

/// Classify a location by its URL markers.
///
/// The consent marker is checked first since it also contains the login
/// marker (`github.com/login/oauth/authorize`).
pub fn classify(url: &str) -> PageKind {
    if url.contains("github.com/login/oauth/authorize") {
        PageKind::OauthConsent
    } else if url.contains("verified-device") || url.contains("device-verification") {
        PageKind::DeviceVerification
    } else if url.contains("two-factor") {
        PageKind::TwoFactor
    } else if url.contains("github.com/login") || url.contains("github.com/session") {
        PageKind::Login
    } else {
        PageKind::Other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_login_pages() {
        assert_eq!(classify("https://github.com/login"), PageKind::Login);
        assert_eq!(
            classify("https://github.com/login?return_to=%2Fsettings"),
            PageKind::Login
        );
        assert_eq!(classify("https://github.com/session"), PageKind::Login);
    }

    #[test]
    fn consent_wins_over_login_marker() {
        assert_eq!(
            classify("https://github.com/login/oauth/authorize?client_id=abc"),
            PageKind::OauthConsent
        );
    }

    #[test]
    fn classifies_two_factor_variants() {
        assert_eq!(
            classify("https://github.com/sessions/two-factor/app"),
            PageKind::TwoFactor
        );
        assert_eq!(
            classify("https://github.com/sessions/two-factor"),
            PageKind::TwoFactor
        );
    }

    #[test]
    fn classifies_device_verification() {
        assert_eq!(
            classify("https://github.com/sessions/verified-device"),
            PageKind::DeviceVerification
        );
        assert_eq!(
            classify("https://github.com/device-verification"),
            PageKind::DeviceVerification
        );
    }

    #[test]
    fn console_urls_are_other() {
        assert_eq!(
            classify("https://ap-northeast-1.run.claw.cloud/"),
            PageKind::Other
        );
        assert_eq!(classify(""), PageKind::Other);
    }
}

use flow::Credentials;

pub const USERNAME_VAR: &str = "GH_USERNAME";
pub const PASSWORD_VAR: &str = "GH_PASSWORD";
pub const TOTP_SECRET_VAR: &str = "GH_2FA_SECRET";

/// Read credentials from the environment. Fails with
/// [`flow::FlowError::MissingCredentials`] before any browser is launched
/// when either required value is absent or empty.
pub fn credentials_from_env() -> flow::Result<Credentials> {
    let username = std::env::var(USERNAME_VAR).unwrap_or_default();
    let password = std::env::var(PASSWORD_VAR).unwrap_or_default();
    let totp_seed = std::env::var(TOTP_SECRET_VAR).ok();
    Credentials::new(username, password, totp_seed)
}

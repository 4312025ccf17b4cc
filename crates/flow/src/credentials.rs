use std::fmt;

use crate::error::{FlowError, Result};

/// Login inputs, read once at startup and never mutated afterwards.
#[derive(Clone)]
pub struct Credentials {
    username: String,
    password: String,
    totp_seed: Option<String>,
}

impl Credentials {
    /// Both username and password must be non-empty; the TOTP seed is only
    /// needed if the provider actually asks for a code.
    pub fn new(username: String, password: String, totp_seed: Option<String>) -> Result<Self> {
        if username.is_empty() || password.is_empty() {
            return Err(FlowError::MissingCredentials);
        }
        Ok(Self {
            username,
            password,
            totp_seed: totp_seed.filter(|s| !s.is_empty()),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn totp_seed(&self) -> Option<&str> {
        self.totp_seed.as_deref()
    }

    pub fn has_totp_seed(&self) -> bool {
        self.totp_seed.is_some()
    }

    /// First three characters of the username, for progress logs.
    pub fn masked_username(&self) -> String {
        let head: String = self.username.chars().take(3).collect();
        format!("{head}***")
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.masked_username())
            .field("password", &"********")
            .field("totp_seed", &self.totp_seed.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_missing_username() {
        assert!(matches!(
            Credentials::new(String::new(), "pw".into(), None),
            Err(FlowError::MissingCredentials)
        ));
    }

    #[test]
    fn rejects_missing_password() {
        assert!(matches!(
            Credentials::new("user".into(), String::new(), None),
            Err(FlowError::MissingCredentials)
        ));
    }

    #[test]
    fn empty_seed_counts_as_absent() {
        let creds = Credentials::new("user".into(), "pw".into(), Some(String::new())).unwrap();
        assert!(!creds.has_totp_seed());
    }

    #[test]
    fn masks_username_in_logs() {
        let creds = Credentials::new("octocat".into(), "pw".into(), None).unwrap();
        assert_eq!(creds.masked_username(), "oct***");
        assert!(!format!("{creds:?}").contains("pw"));
    }
}

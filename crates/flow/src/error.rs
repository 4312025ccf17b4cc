use thiserror::Error;

pub type Result<T> = std::result::Result<T, FlowError>;

/// Fatal outcomes of a login run. Each variant maps to a distinct exit code
/// so CI can tell the failure classes apart.
#[derive(Debug, Error)]
pub enum FlowError {
    #[error("GH_USERNAME and GH_PASSWORD must both be set and non-empty")]
    MissingCredentials,

    #[error("could not parse target URL: {0}")]
    InvalidTarget(String),

    #[error("no GitHub login control found on {url}")]
    ProviderButtonNotFound { url: String },

    #[error("credential form has no submit control")]
    SubmitControlNotFound,

    #[error("device verification was not approved within {waited_secs} seconds")]
    DeviceVerificationTimeout { waited_secs: u32 },

    #[error("two-factor verification failed: {0}")]
    TwoFactorFailed(#[from] TwoFactorError),

    #[error("could not confirm a logged-in session")]
    LoginUnconfirmed,

    #[error("interrupted by user")]
    Interrupted,

    #[error("browser automation error: {0}")]
    Automation(String),
}

#[derive(Debug, Error)]
pub enum TwoFactorError {
    #[error("GH_2FA_SECRET is not set but the provider asked for a code")]
    MissingSecret,

    #[error("GH_2FA_SECRET is not valid base32: {0}")]
    InvalidSecret(String),

    #[error("provider rejected the code {attempts} times")]
    RetriesExhausted { attempts: u32 },
}

impl FlowError {
    /// Process exit code for this failure. 130 on interrupt follows the
    /// usual shell convention for SIGINT.
    pub fn exit_code(&self) -> i32 {
        match self {
            FlowError::MissingCredentials => 2,
            FlowError::ProviderButtonNotFound { .. } => 3,
            FlowError::SubmitControlNotFound => 4,
            FlowError::DeviceVerificationTimeout { .. } => 5,
            FlowError::TwoFactorFailed(_) => 6,
            FlowError::LoginUnconfirmed => 7,
            FlowError::Interrupted => 130,
            FlowError::InvalidTarget(_) | FlowError::Automation(_) => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_failure_class() {
        let errors = [
            FlowError::MissingCredentials,
            FlowError::ProviderButtonNotFound { url: "x".into() },
            FlowError::SubmitControlNotFound,
            FlowError::DeviceVerificationTimeout { waited_secs: 60 },
            FlowError::TwoFactorFailed(TwoFactorError::MissingSecret),
            FlowError::LoginUnconfirmed,
            FlowError::Interrupted,
        ];
        let mut codes: Vec<i32> = errors.iter().map(FlowError::exit_code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), errors.len());
        assert!(!codes.contains(&0));
    }

    #[test]
    fn interrupt_uses_sigint_convention() {
        assert_eq!(FlowError::Interrupted.exit_code(), 130);
    }
}

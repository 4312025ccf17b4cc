use std::time::Duration;

use url::Url;

use crate::error::{FlowError, Result};

/// Console the tool logs into when no `--url` override is given.
pub const DEFAULT_TARGET_URL: &str = "https://ap-northeast-1.run.claw.cloud/";

/// Identity provider host. Leaving it is one of the success signals.
pub const PROVIDER_HOST: &str = "github.com";

/// Every wait, retry count and URL marker the flow uses. All durations are
/// configuration, not logic; the defaults are the values the flow was tuned
/// with against the real console.
#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Console URL to load first.
    pub target_url: String,
    /// Host marker the final URL must contain to count as "on the console".
    pub target_host: String,
    /// Verification-code attempts before giving up.
    pub max_2fa_retries: u32,
    /// Pause right after a page load before inspecting it.
    pub post_load_pause: Duration,
    /// Pause after clicks that trigger a navigation.
    pub settle: Duration,
    /// Pause after submitting a verification code.
    pub wait_after_2fa: Duration,
    /// Pause before the final success check, covering the OAuth redirect.
    pub final_wait: Duration,
    /// Network-idle wait after ordinary navigations.
    pub idle_timeout: Duration,
    /// Shorter idle wait inside the two-factor retry loop.
    pub idle_timeout_short: Duration,
    /// Idle wait before the success heuristic runs.
    pub final_idle_timeout: Duration,
    /// One-second ticks to wait for out-of-band device approval.
    pub device_poll_ticks: u32,
    /// One-second ticks to wait for the credential form to appear.
    pub form_wait_ticks: u32,
    /// Pause before retrying when no code input is visible.
    pub input_retry_pause: Duration,
    /// Navigation timeout for the initial page load.
    pub nav_timeout: Duration,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            target_url: DEFAULT_TARGET_URL.to_string(),
            target_host: "claw.cloud".to_string(),
            max_2fa_retries: 3,
            post_load_pause: Duration::from_secs(2),
            settle: Duration::from_secs(3),
            wait_after_2fa: Duration::from_secs(5),
            final_wait: Duration::from_secs(25),
            idle_timeout: Duration::from_secs(30),
            idle_timeout_short: Duration::from_secs(10),
            final_idle_timeout: Duration::from_secs(15),
            device_poll_ticks: 60,
            form_wait_ticks: 10,
            input_retry_pause: Duration::from_secs(3),
            nav_timeout: Duration::from_secs(60),
        }
    }
}

impl FlowConfig {
    /// Build a config for an arbitrary console URL, deriving the host marker
    /// used by the success heuristic from it.
    pub fn for_target(url: &str) -> Result<Self> {
        let parsed =
            Url::parse(url).map_err(|e| FlowError::InvalidTarget(format!("{url}: {e}")))?;
        let host = parsed
            .host_str()
            .ok_or_else(|| FlowError::InvalidTarget(format!("{url}: no host")))?
            .to_string();
        Ok(Self {
            target_url: url.to_string(),
            target_host: host,
            ..Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_host_marker_from_target() {
        let config = FlowConfig::for_target("https://eu-west-1.run.claw.cloud/").unwrap();
        assert_eq!(config.target_host, "eu-west-1.run.claw.cloud");
        assert_eq!(config.max_2fa_retries, 3);
    }

    #[test]
    fn rejects_unparseable_targets() {
        assert!(matches!(
            FlowConfig::for_target("not a url"),
            Err(FlowError::InvalidTarget(_))
        ));
    }
}

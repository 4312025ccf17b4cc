//! The login-flow sequencer: a strict linear sequence of conditional steps,
//! each gated on a fresh classification of the current location.

use std::time::Duration;

use tokio::time::sleep;
use tracing::{info, warn};

use crate::classify::{PageKind, classify};
use crate::config::FlowConfig;
use crate::credentials::Credentials;
use crate::driver::PageDriver;
use crate::error::{FlowError, Result};
use crate::{heuristic, selectors, two_factor};

pub struct LoginSequencer<'a, D: PageDriver + ?Sized> {
    driver: &'a D,
    config: &'a FlowConfig,
}

impl<'a, D: PageDriver + ?Sized> LoginSequencer<'a, D> {
    pub fn new(driver: &'a D, config: &'a FlowConfig) -> Self {
        Self { driver, config }
    }

    /// Run the whole flow once. There is no outer retry; only the 2FA loop
    /// and the device-approval poll retry internally.
    pub async fn run(&self, credentials: &Credentials) -> Result<()> {
        let config = self.config;

        info!(target = "clawlogin", url = %config.target_url, "loading console");
        self.driver.navigate(&config.target_url).await?;
        if !self.driver.wait_for_idle(config.idle_timeout).await {
            warn!(target = "clawlogin", "initial load never went idle, continuing");
        }
        sleep(config.post_load_pause).await;
        self.driver.capture("00_console_home").await;

        info!(target = "clawlogin", "looking for the GitHub login control");
        if !self.driver.click_first(selectors::PROVIDER_BUTTONS).await {
            let url = self.driver.current_url().await;
            if url.to_lowercase().contains("signin") {
                self.driver.capture("error_no_github_button").await;
                return Err(FlowError::ProviderButtonNotFound { url });
            }
            warn!(
                target = "clawlogin",
                %url,
                "no provider button and not on a sign-in page, assuming an existing session"
            );
        }

        sleep(config.settle).await;
        if !self.driver.wait_for_idle(config.idle_timeout).await {
            warn!(target = "clawlogin", "provider redirect never went idle, continuing");
        }

        let mut url = self.driver.current_url().await;
        info!(target = "clawlogin", %url, "after provider hand-off");

        if classify(&url) == PageKind::Login {
            self.submit_credentials(credentials).await?;
            sleep(config.settle).await;
            if !self.driver.wait_for_idle(config.idle_timeout).await {
                warn!(target = "clawlogin", "post-login load never went idle, continuing");
            }
            url = self.driver.current_url().await;
            info!(target = "clawlogin", %url, "after credential submit");
        }

        if classify(&url) == PageKind::DeviceVerification {
            self.wait_for_device_approval().await?;
            url = self.driver.current_url().await;
        }

        if classify(&url) == PageKind::TwoFactor {
            if let Err(err) = two_factor::verify(self.driver, credentials.totp_seed(), config).await
            {
                self.driver.capture("final_error_2fa").await;
                return Err(FlowError::TwoFactorFailed(err));
            }
        }

        sleep(config.post_load_pause).await;
        url = self.driver.current_url().await;
        if classify(&url) == PageKind::OauthConsent {
            self.approve_consent().await;
        }

        info!(
            target = "clawlogin",
            secs = config.final_wait.as_secs(),
            "waiting for the final redirect"
        );
        sleep(config.final_wait).await;
        if !self.driver.wait_for_idle(config.final_idle_timeout).await {
            warn!(target = "clawlogin", "final load never went idle, verifying anyway");
        }

        self.driver.capture("99_final_result").await;
        let signals = heuristic::gather(self.driver, config).await;
        info!(
            target = "clawlogin",
            score = signals.score(),
            signals = %signals.summary(),
            "success heuristic"
        );
        if signals.confirmed() {
            Ok(())
        } else {
            Err(FlowError::LoginUnconfirmed)
        }
    }

    /// Fill and submit the provider's credential form. The form is given a
    /// bounded number of one-second ticks to become visible.
    async fn submit_credentials(&self, credentials: &Credentials) -> Result<()> {
        info!(
            target = "clawlogin",
            username = %credentials.masked_username(),
            "filling GitHub credentials"
        );

        let mut filled = false;
        for _ in 0..self.config.form_wait_ticks {
            if self
                .driver
                .fill_first(selectors::USERNAME_FIELD, credentials.username())
                .await
            {
                filled = true;
                break;
            }
            sleep(Duration::from_secs(1)).await;
        }
        if !filled {
            self.driver.capture("error_fill_credentials").await;
            return Err(FlowError::Automation(
                "credential form never became visible".to_string(),
            ));
        }

        if !self
            .driver
            .fill_first(selectors::PASSWORD_FIELD, credentials.password())
            .await
        {
            self.driver.capture("error_fill_credentials").await;
            return Err(FlowError::Automation(
                "password field never became visible".to_string(),
            ));
        }

        self.driver.capture("01_credentials_filled").await;

        if !self.driver.click_first(selectors::CREDENTIAL_SUBMIT).await {
            self.driver.capture("error_no_submit_button").await;
            return Err(FlowError::SubmitControlNotFound);
        }
        info!(target = "clawlogin", "credential form submitted");
        Ok(())
    }

    /// Poll once per second until the location leaves the device-verification
    /// pattern, up to the configured budget. Approval happens out of band.
    pub async fn wait_for_device_approval(&self) -> Result<()> {
        let ticks = self.config.device_poll_ticks;
        warn!(target = "clawlogin", "device verification requested");
        self.driver.capture("device_verification").await;
        info!(target = "clawlogin", secs = ticks, "approve within the wait window by either:");
        info!(target = "clawlogin", "  1. clicking the verification link sent by email");
        info!(target = "clawlogin", "  2. approving the device in the GitHub mobile app");

        for tick in 0..ticks {
            sleep(Duration::from_secs(1)).await;
            if tick % 10 == 0 {
                info!(target = "clawlogin", "waiting for device approval ({tick}/{ticks}s)");
            }
            let url = self.driver.current_url().await;
            if classify(&url) != PageKind::DeviceVerification {
                info!(target = "clawlogin", %url, "device approved");
                return Ok(());
            }
        }

        // One last look in case the approval landed on the final tick.
        let url = self.driver.current_url().await;
        if classify(&url) != PageKind::DeviceVerification {
            info!(target = "clawlogin", %url, "device approved");
            return Ok(());
        }
        Err(FlowError::DeviceVerificationTimeout { waited_secs: ticks })
    }

    /// Click through the OAuth consent screen. The provider skips consent for
    /// already-authorized apps, so a missing control is not an error.
    async fn approve_consent(&self) {
        info!(target = "clawlogin", "authorization prompt detected");
        self.driver.capture("05_oauth_authorize").await;
        if self.driver.click_first(selectors::AUTHORIZE_BUTTONS).await {
            sleep(self.config.settle).await;
            if !self.driver.wait_for_idle(self.config.idle_timeout).await {
                warn!(target = "clawlogin", "consent redirect never went idle, continuing");
            }
        } else {
            warn!(target = "clawlogin", "no authorize control, provider may have skipped consent");
        }
    }
}

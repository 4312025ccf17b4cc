//! Two-factor sub-protocol: bounded code retries aligned with the TOTP
//! rotation window.

use tokio::time::sleep;
use tracing::{info, warn};

use crate::classify::{PageKind, classify};
use crate::config::FlowConfig;
use crate::driver::PageDriver;
use crate::error::TwoFactorError;
use crate::selectors;
use crate::totp::{self, TotpGenerator};

/// Drive the provider's 2FA prompt until the location leaves the two-factor
/// pattern or the attempts run out.
///
/// Each attempt burns one code generation, whether or not an input field was
/// found; a missing field is treated the same as a rejected code.
pub async fn verify<D: PageDriver + ?Sized>(
    driver: &D,
    seed: Option<&str>,
    config: &FlowConfig,
) -> Result<(), TwoFactorError> {
    driver.capture("02_2fa_page").await;

    let seed = seed.ok_or(TwoFactorError::MissingSecret)?;
    let totp = TotpGenerator::new(seed)?;
    let max = config.max_2fa_retries;

    for attempt in 1..=max {
        let code = totp.code_now();
        info!(target = "clawlogin", attempt, max, "submitting verification code");

        if !driver.fill_first(selectors::TWO_FACTOR_INPUTS, &code).await {
            warn!(target = "clawlogin", "no visible verification-code input");
            driver.capture("error_no_2fa_input").await;
            if attempt == max {
                break;
            }
            sleep(config.input_retry_pause).await;
            continue;
        }

        driver.capture(&format!("03_2fa_code_entered_{attempt}")).await;

        if !driver.click_first(selectors::TWO_FACTOR_SUBMIT).await {
            // No submit control is not an error; the field takes Enter.
            warn!(target = "clawlogin", "no submit control, sending Enter to the code field");
            driver.press_enter(selectors::TWO_FACTOR_INPUTS).await;
        }

        sleep(config.wait_after_2fa).await;
        if !driver.wait_for_idle(config.idle_timeout_short).await {
            warn!(target = "clawlogin", "page never went idle after code submit, checking anyway");
        }

        let url = driver.current_url().await;
        if classify(&url) != PageKind::TwoFactor {
            info!(target = "clawlogin", %url, "verification code accepted");
            driver.capture("04_2fa_success").await;
            return Ok(());
        }

        if let Some(flash) = driver.read_text(selectors::ERROR_FLASH).await {
            warn!(target = "clawlogin", %flash, "provider rejected the code");
        }

        if attempt < max {
            let delay = totp::next_window_delay();
            info!(
                target = "clawlogin",
                secs = delay.as_secs(),
                "waiting for the next code window"
            );
            sleep(delay).await;
        }
    }

    Err(TwoFactorError::RetriesExhausted { attempts: max })
}

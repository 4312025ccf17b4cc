//! Ordered locator candidate lists for every control the flow touches.
//!
//! Order matters: the first visible match wins, so the most specific and most
//! common patterns come first.

use crate::driver::Locator;

/// "Log in with GitHub" control on the console's sign-in page.
pub const PROVIDER_BUTTONS: &[Locator] = &[
    Locator::text("button", "GitHub"),
    Locator::text("a", "GitHub"),
    Locator::css("[data-provider='github']"),
    Locator::css("button[data-test='github-login']"),
    Locator::css(".github-login-button"),
];

pub const USERNAME_FIELD: &[Locator] = &[Locator::css("#login_field")];

pub const PASSWORD_FIELD: &[Locator] = &[Locator::css("#password")];

pub const CREDENTIAL_SUBMIT: &[Locator] = &[
    Locator::css("input[name='commit']"),
    Locator::css("input[type='submit']"),
    Locator::css("button[type='submit']"),
    Locator::text("button", "Sign in"),
];

/// Code inputs across the provider's 2FA page variants (app, standard OTP,
/// SMS), most common first.
pub const TWO_FACTOR_INPUTS: &[Locator] = &[
    Locator::css("#app_totp"),
    Locator::css("#otp"),
    Locator::css("#sms_otp"),
    Locator::css("input[name='otp']"),
    Locator::css("input[name='app_otp']"),
    Locator::css("input[autocomplete='one-time-code']"),
    Locator::css("input[type='text'][inputmode='numeric']"),
    Locator::css("input[aria-label*='code' i]"),
    Locator::css("input[placeholder*='code' i]"),
    Locator::css("input.form-control[type='text']"),
];

pub const TWO_FACTOR_SUBMIT: &[Locator] = &[
    Locator::css("button[type='submit']"),
    Locator::css("input[type='submit']"),
    Locator::text("button", "Verify"),
    Locator::css("button.btn-primary"),
];

/// Inline rejection banners on the 2FA page. Read for logging only.
pub const ERROR_FLASH: &[Locator] = &[
    Locator::css(".flash-error"),
    Locator::css(".js-flash-alert"),
    Locator::css("[role='alert']"),
];

pub const AUTHORIZE_BUTTONS: &[Locator] = &[
    Locator::css("button[name='authorize']"),
    Locator::text("button", "Authorize"),
    Locator::css("input[name='authorize']"),
];

/// Elements that only exist once a console session is established.
pub const USER_MENU: &[Locator] = &[
    Locator::css("[data-testid='user-menu']"),
    Locator::css("button[aria-label*='user' i]"),
    Locator::css(".user-avatar"),
    Locator::css("[class*='avatar']"),
];

/// Post-login landmark phrases on the console. First match short-circuits.
pub const LANDMARK_PHRASES: &[&str] =
    &["App Launchpad", "Devbox", "Dashboard", "Create", "Workspace"];

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

/// One candidate for finding an element. Plain CSS covers most of the
/// provider's markup; text matching covers the controls that have no stable
/// attribute (`button` labelled "GitHub", "Sign in", "Authorize", ...).
///
/// Serializes to `{"css": ...}` or `{"tag": ..., "text": ...}` so drivers can
/// hand candidate lists straight to in-page JavaScript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Locator {
    Css { css: &'static str },
    Text { tag: &'static str, text: &'static str },
}

impl Locator {
    pub const fn css(css: &'static str) -> Self {
        Self::Css { css }
    }

    pub const fn text(tag: &'static str, text: &'static str) -> Self {
        Self::Text { tag, text }
    }
}

/// The browser seam the sequencer runs against.
///
/// Absence of an element is ordinary control flow here, never an error:
/// lookup methods return `false`/`None` when nothing matched. The only
/// fallible operation is navigation. [`capture`] is best-effort by contract;
/// implementations log and swallow their own failures.
///
/// [`capture`]: PageDriver::capture
#[async_trait]
pub trait PageDriver: Send + Sync {
    async fn navigate(&self, url: &str) -> Result<()>;

    /// Current location, empty string when it cannot be read.
    async fn current_url(&self) -> String;

    /// Wait for the network to go idle. `false` means the wait timed out,
    /// which callers treat as non-fatal.
    async fn wait_for_idle(&self, timeout: Duration) -> bool;

    /// Click the first currently-visible candidate.
    async fn click_first(&self, candidates: &[Locator]) -> bool;

    /// Clear then fill the first currently-visible candidate.
    async fn fill_first(&self, candidates: &[Locator], value: &str) -> bool;

    /// Submit by sending Enter to the first currently-visible candidate.
    async fn press_enter(&self, candidates: &[Locator]) -> bool;

    /// Inner text of the first currently-visible candidate.
    async fn read_text(&self, candidates: &[Locator]) -> Option<String>;

    /// Whether the page body contains the given text.
    async fn has_text(&self, needle: &str) -> bool;

    /// Whether any element matches any candidate. Visibility not required.
    async fn matches_any(&self, candidates: &[Locator]) -> bool;

    /// Best-effort full-page screenshot at a named checkpoint.
    async fn capture(&self, name: &str);
}

//! Post-login success heuristic.
//!
//! Four independent signals, one point each, success at two or more. This is
//! deliberately permissive: the tool confirms that a login *probably* worked,
//! it does not make a security decision.

use crate::config::{FlowConfig, PROVIDER_HOST};
use crate::driver::PageDriver;
use crate::selectors;

#[derive(Debug, Clone, Copy, Default)]
pub struct SuccessSignals {
    /// Final URL is on the console host and carries no sign-in marker.
    pub on_target_host: bool,
    /// Final URL is not on the provider's host.
    pub left_provider: bool,
    /// A post-login landmark phrase appears in the page text.
    pub landmark_text: bool,
    /// A user-menu / avatar element exists.
    pub user_menu: bool,
}

impl SuccessSignals {
    pub fn score(&self) -> u32 {
        [
            self.on_target_host,
            self.left_provider,
            self.landmark_text,
            self.user_menu,
        ]
        .iter()
        .filter(|s| **s)
        .count() as u32
    }

    pub fn confirmed(&self) -> bool {
        self.score() >= 2
    }

    /// Comma-separated list of the signals that fired, for the final log line.
    pub fn summary(&self) -> String {
        let mut hits = Vec::new();
        if self.on_target_host {
            hits.push("console url");
        }
        if self.left_provider {
            hits.push("left provider");
        }
        if self.landmark_text {
            hits.push("landmark text");
        }
        if self.user_menu {
            hits.push("user menu");
        }
        if hits.is_empty() {
            "none".to_string()
        } else {
            hits.join(", ")
        }
    }
}

/// Evaluate all four signals against the current page.
pub async fn gather<D: PageDriver + ?Sized>(driver: &D, config: &FlowConfig) -> SuccessSignals {
    let url = driver.current_url().await.to_lowercase();

    let mut signals = SuccessSignals {
        on_target_host: url.contains(&config.target_host) && !url.contains("signin"),
        left_provider: !url.contains(PROVIDER_HOST),
        ..SuccessSignals::default()
    };

    for phrase in selectors::LANDMARK_PHRASES {
        if driver.has_text(phrase).await {
            signals.landmark_text = true;
            break;
        }
    }

    signals.user_menu = driver.matches_any(selectors::USER_MENU).await;
    signals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_signals_confirm() {
        let signals = SuccessSignals {
            on_target_host: true,
            left_provider: true,
            ..SuccessSignals::default()
        };
        assert_eq!(signals.score(), 2);
        assert!(signals.confirmed());
    }

    #[test]
    fn one_signal_does_not_confirm() {
        let signals = SuccessSignals {
            left_provider: true,
            ..SuccessSignals::default()
        };
        assert_eq!(signals.score(), 1);
        assert!(!signals.confirmed());
    }

    #[test]
    fn any_pair_of_signals_confirms() {
        let all = [true, false];
        for a in all {
            for b in all {
                for c in all {
                    for d in all {
                        let signals = SuccessSignals {
                            on_target_host: a,
                            left_provider: b,
                            landmark_text: c,
                            user_menu: d,
                        };
                        assert_eq!(signals.confirmed(), signals.score() >= 2);
                    }
                }
            }
        }
    }

    #[test]
    fn summary_names_fired_signals() {
        let signals = SuccessSignals {
            on_target_host: true,
            user_menu: true,
            ..SuccessSignals::default()
        };
        assert_eq!(signals.summary(), "console url, user menu");
        assert_eq!(SuccessSignals::default().summary(), "none");
    }
}

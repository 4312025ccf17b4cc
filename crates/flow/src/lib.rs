//! Login-flow logic for the `clawlogin` tool.
//!
//! Everything browser-shaped goes through the [`PageDriver`] trait so the
//! sequencer, the two-factor sub-protocol and the success heuristic can be
//! exercised against an in-memory page in tests. The real driver lives in the
//! CLI crate.

pub mod classify;
pub mod config;
pub mod credentials;
pub mod driver;
pub mod error;
pub mod heuristic;
pub mod selectors;
pub mod sequencer;
pub mod totp;
pub mod two_factor;

pub use classify::{PageKind, classify};
pub use config::FlowConfig;
pub use credentials::Credentials;
pub use driver::{Locator, PageDriver};
pub use error::{FlowError, Result, TwoFactorError};
pub use sequencer::LoginSequencer;

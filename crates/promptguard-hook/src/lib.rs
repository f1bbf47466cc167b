//! # promptguard-hook
//!
//! The `UserPromptSubmit` hook boundary for promptguard.
//!
//! The host writes one JSON request to stdin and reads one JSON reply from
//! stdout. This crate owns that exchange:
//!
//! - [`protocol`]: the request and reply shapes.
//! - [`advisory`]: turning violations into the advisory text.
//! - [`runner`]: reading, evaluating, and emitting, with every failure
//!   folded into [`HookOutcome::Failed`] so the host is never blocked.

pub mod advisory;
pub mod error;
pub mod protocol;
pub mod runner;

pub use advisory::{compose, CHECKLIST, REMINDER};
pub use error::HookError;
pub use protocol::{HookInput, HookOutput, HookSpecificOutput, HOOK_EVENT_NAME};
pub use runner::{run, run_with_rules, HookOutcome};

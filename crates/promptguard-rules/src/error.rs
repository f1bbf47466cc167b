// error.rs - Error types for the rules subsystem.

use thiserror::Error;

/// Errors that can occur while building a rule set.
#[derive(Debug, Error)]
pub enum RulesError {
    /// A rule pattern failed to compile as a regular expression.
    #[error("invalid pattern '{pattern}' in rule '{rule}': {source}")]
    InvalidPattern {
        rule: String,
        pattern: String,
        source: regex::Error,
    },
}

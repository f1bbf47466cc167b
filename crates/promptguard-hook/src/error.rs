// error.rs - Error types for the hook boundary.
//
// Every variant ends up as a "Hook error: ..." diagnostic; none of them
// reach the host as a failure status.

use thiserror::Error;

/// Errors that can occur while handling one hook invocation.
#[derive(Debug, Error)]
pub enum HookError {
    /// Reading the request from stdin failed.
    #[error("failed to read hook input: {0}")]
    Read(#[source] std::io::Error),

    /// The request is not valid JSON.
    #[error("invalid hook input: {0}")]
    Parse(#[from] serde_json::Error),

    /// The request is valid JSON but not an object.
    #[error("hook input must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },

    /// The `prompt` field is present but is not a string.
    #[error("'prompt' must be a string, got {found}")]
    InvalidPrompt { found: &'static str },

    /// The rule set could not be built.
    #[error("rules unavailable: {0}")]
    Rules(#[from] promptguard_rules::RulesError),

    /// The reply could not be encoded as JSON.
    #[error("failed to encode hook output: {0}")]
    Encode(#[source] serde_json::Error),

    /// Writing the reply failed.
    #[error("failed to write hook output: {0}")]
    Write(#[source] std::io::Error),
}

// runner.rs - One hook invocation, end to end.
//
// read stdin -> parse -> evaluate -> compose -> emit
//
// Any failure along the way becomes HookOutcome::Failed. Emitting a Failed
// outcome writes `{}` to stdout first and then "Hook error: ..." to stderr, so
// the host gets valid JSON even when stderr is gone, and the process can
// always exit 0.

use std::io::{Read, Write};

use promptguard_rules::RuleSet;

use crate::advisory;
use crate::error::HookError;
use crate::protocol::{HookInput, HookOutput};

/// Result of one hook invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HookOutcome {
    /// The prompt was evaluated; the reply carries the advisory.
    Advisory(HookOutput),
    /// Something went wrong before a reply could be built.
    Failed { diagnostic: String },
}

impl HookOutcome {
    pub fn from_result(result: Result<HookOutput, HookError>) -> Self {
        match result {
            Ok(output) => HookOutcome::Advisory(output),
            Err(e) => {
                tracing::warn!("hook failed: {}", e);
                HookOutcome::Failed {
                    diagnostic: e.to_string(),
                }
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, HookOutcome::Failed { .. })
    }

    /// Write this outcome to the host.
    ///
    /// The returned error only reports that stdout or stderr could not be
    /// written; it never changes what the process should exit with.
    pub fn emit<W: Write, E: Write>(
        &self,
        stdout: &mut W,
        stderr: &mut E,
    ) -> Result<(), HookError> {
        match self {
            HookOutcome::Advisory(output) => match serde_json::to_string(output) {
                Ok(json) => {
                    writeln!(stdout, "{}", json).map_err(HookError::Write)?;
                    stdout.flush().map_err(HookError::Write)
                }
                Err(e) => emit_failure(&HookError::Encode(e).to_string(), stdout, stderr),
            },
            HookOutcome::Failed { diagnostic } => emit_failure(diagnostic, stdout, stderr),
        }
    }
}

fn emit_failure<W: Write, E: Write>(
    diagnostic: &str,
    stdout: &mut W,
    stderr: &mut E,
) -> Result<(), HookError> {
    writeln!(stdout, "{{}}").map_err(HookError::Write)?;
    stdout.flush().map_err(HookError::Write)?;
    writeln!(stderr, "Hook error: {}", diagnostic).map_err(HookError::Write)
}

/// Run the hook with the built-in rules.
pub fn run<R: Read>(reader: R) -> HookOutcome {
    match RuleSet::builtin() {
        Ok(rules) => run_with_rules(reader, &rules),
        Err(e) => HookOutcome::from_result(Err(e.into())),
    }
}

/// Run the hook with a given rule set.
pub fn run_with_rules<R: Read>(reader: R, rules: &RuleSet) -> HookOutcome {
    HookOutcome::from_result(handle(reader, rules))
}

fn handle<R: Read>(mut reader: R, rules: &RuleSet) -> Result<HookOutput, HookError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw).map_err(HookError::Read)?;

    let input = HookInput::parse(&raw)?;
    tracing::debug!(prompt_len = input.prompt.len(), "hook input parsed");

    let trace = rules.evaluate_with_trace(&input.prompt);
    tracing::debug!(violations = trace.violations.len(), "prompt evaluated");

    Ok(HookOutput::with_context(advisory::compose(&trace.violations)))
}

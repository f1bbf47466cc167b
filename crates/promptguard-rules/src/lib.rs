//! # promptguard-rules
//!
//! Project policy rules for user prompts, and the evaluator that applies them.
//!
//! A [`RuleSet`] is compiled once from the static [`BUILTIN_RULES`] table and
//! then evaluated against each prompt. Evaluation is pure: it performs no I/O
//! and returns the same [`Violation`]s for the same prompt every time.
//!
//! ## Key invariants
//!
//! - **Fixed order**: violations come back in table order, never sorted or
//!   deduplicated.
//! - **Independent checks**: no rule looks at another rule's result.
//! - **Substring search**: patterns are case-insensitive regex searches, not
//!   whole-word matches. "filesystem" satisfies a pattern looking for "file".
//!
//! ## Quick Example
//!
//! ```rust
//! use promptguard_rules::RuleSet;
//!
//! let rules = RuleSet::builtin().unwrap();
//! let violations = rules.evaluate("please commit this");
//! assert_eq!(violations.len(), 1);
//! assert_eq!(violations[0].rule, "Commit Message Format");
//! ```

pub mod engine;
pub mod error;
pub mod rule;

pub use engine::{EvaluationStep, EvaluationTrace, RuleOutcome, RuleSet};
pub use error::RulesError;
pub use rule::{CompiledRule, RuleSpec, Violation, BUILTIN_RULES};

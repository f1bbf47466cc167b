// engine.rs - Rule evaluation.
//
// Every rule is checked against the prompt on its own:
//
// 1. Does the trigger pattern occur? No -> not matched
// 2. Does the exemption pattern occur? Yes -> exempted
// 3. Otherwise -> violated
//
// A prompt can violate any subset of the rules, from none to all of them.
// Results keep table order.

use serde::{Deserialize, Serialize};

use crate::error::RulesError;
use crate::rule::{CompiledRule, RuleSpec, Violation, BUILTIN_RULES};

/// What happened when one rule was checked against a prompt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RuleOutcome {
    /// The trigger pattern was not found.
    NotMatched,
    /// The trigger matched, but so did the exemption.
    Exempted,
    /// The trigger matched and nothing exempted it.
    Violated,
}

/// One rule's result inside an [`EvaluationTrace`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationStep {
    pub rule: String,
    pub outcome: RuleOutcome,
}

/// Full record of an evaluation: the violations plus the outcome of every
/// rule, including the ones that did not fire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EvaluationTrace {
    pub violations: Vec<Violation>,
    pub steps: Vec<EvaluationStep>,
}

/// An ordered, immutable set of compiled rules.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<CompiledRule>,
}

impl RuleSet {
    /// Compile the built-in rule table.
    pub fn builtin() -> Result<Self, RulesError> {
        Self::from_specs(BUILTIN_RULES)
    }

    /// Compile an ordered list of rule specs.
    pub fn from_specs(specs: &[RuleSpec]) -> Result<Self, RulesError> {
        let rules = specs
            .iter()
            .copied()
            .map(CompiledRule::compile)
            .collect::<Result<Vec<_>, _>>()?;
        tracing::debug!(count = rules.len(), "compiled rule set");
        Ok(Self { rules })
    }

    /// The compiled rules, in evaluation order.
    pub fn rules(&self) -> &[CompiledRule] {
        &self.rules
    }

    /// Evaluate a prompt and return every violation, in rule order.
    ///
    /// Never fails. An empty prompt yields no violations.
    pub fn evaluate(&self, prompt: &str) -> Vec<Violation> {
        self.rules
            .iter()
            .filter(|rule| check(rule, prompt) == RuleOutcome::Violated)
            .map(CompiledRule::violation)
            .collect()
    }

    /// Same as [`evaluate`](Self::evaluate), but also records the outcome
    /// of each rule.
    pub fn evaluate_with_trace(&self, prompt: &str) -> EvaluationTrace {
        let mut violations = Vec::new();
        let mut steps = Vec::with_capacity(self.rules.len());

        for rule in &self.rules {
            let outcome = check(rule, prompt);
            tracing::debug!(rule = rule.name(), ?outcome, "rule checked");
            if outcome == RuleOutcome::Violated {
                violations.push(rule.violation());
            }
            steps.push(EvaluationStep {
                rule: rule.name().to_string(),
                outcome,
            });
        }

        EvaluationTrace { violations, steps }
    }
}

fn check(rule: &CompiledRule, prompt: &str) -> RuleOutcome {
    if !rule.is_triggered(prompt) {
        RuleOutcome::NotMatched
    } else if rule.is_exempt(prompt) {
        RuleOutcome::Exempted
    } else {
        RuleOutcome::Violated
    }
}

// check.rs - Evaluate a prompt from the command line.
//
// Shows every rule's outcome, not just the violations, so it is easy to see
// why a prompt did or did not trip a rule.

use promptguard_rules::{RuleOutcome, RuleSet};

pub fn execute(prompt: &str, json: bool) -> anyhow::Result<()> {
    let rules = RuleSet::builtin()?;
    let trace = rules.evaluate_with_trace(prompt);

    if json {
        println!("{}", serde_json::to_string_pretty(&trace)?);
        return Ok(());
    }

    for step in &trace.steps {
        let (marker, label) = match step.outcome {
            RuleOutcome::Violated => ("x", "violated"),
            RuleOutcome::Exempted => ("~", "exempted"),
            RuleOutcome::NotMatched => ("-", "not matched"),
        };
        println!("  {} {:<30} {}", marker, step.rule, label);
    }

    println!();
    match trace.violations.len() {
        0 => println!("No violations."),
        1 => println!("1 violation."),
        n => println!("{} violations.", n),
    }
    Ok(())
}

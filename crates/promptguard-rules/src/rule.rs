// rule.rs - Static rule definitions and their compiled form.
//
// Each rule is a trigger pattern, an optional exemption pattern, and the
// message shown when the trigger matches but the exemption does not. The
// table below is the whole policy; it is compiled once and never mutated.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::error::RulesError;

/// A rule as written in source, before its patterns are compiled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSpec {
    /// Display name, used as the `rule` field of a violation.
    pub name: &'static str,
    /// Pattern that must be found in the prompt for the rule to fire.
    pub trigger: &'static str,
    /// Pattern that, when found, suppresses the rule.
    pub exemption: Option<&'static str>,
    /// Human-readable guidance attached to the violation.
    pub message: &'static str,
}

/// The built-in rules, in evaluation order.
pub const BUILTIN_RULES: &[RuleSpec] = &[
    RuleSpec {
        name: "MANDATORY Test Verification",
        trigger: r"(add|create|update|modify|change|refactor|fix).*(file|code|function|class|component)",
        exemption: Some(r"(test|lint|build)"),
        message: "Code changes must include testing verification. Run: pnpm api test, pnpm api lint, pnpm api build",
    },
    RuleSpec {
        name: "EnvConfig Usage",
        trigger: r"process\.env",
        exemption: None,
        message: "ALWAYS use EnvConfig class instead of process.env directly",
    },
    RuleSpec {
        name: "File Creation Policy",
        trigger: r"create.*new.*file",
        exemption: Some(r"(necessary|required|needed)"),
        message: "NEVER create files unless absolutely necessary. ALWAYS prefer editing existing files.",
    },
    RuleSpec {
        name: "Documentation Policy",
        trigger: r"create.*(README|\.md|documentation)",
        exemption: None,
        message: "NEVER proactively create documentation files. Only create if explicitly requested.",
    },
    RuleSpec {
        name: "README Update Reminder",
        trigger: r"(add|create|update|modify|change|refactor|fix).*(feature|module|endpoint|api)",
        exemption: Some(r"readme"),
        message: "Consider updating README.md when adding new features or changing architecture",
    },
    RuleSpec {
        name: "Commit Message Format",
        trigger: r"commit",
        exemption: None,
        message: "Use conventional commits: <type>: <description> (feat/fix/refactor/etc), imperative mood, <72 chars, no period",
    },
];

/// A rule whose patterns have been compiled.
#[derive(Debug, Clone)]
pub struct CompiledRule {
    spec: RuleSpec,
    trigger: Regex,
    exemption: Option<Regex>,
}

impl CompiledRule {
    /// Compile a rule spec. Patterns are matched case-insensitively.
    pub fn compile(spec: RuleSpec) -> Result<Self, RulesError> {
        let trigger = compile_pattern(spec.name, spec.trigger)?;
        let exemption = spec
            .exemption
            .map(|pattern| compile_pattern(spec.name, pattern))
            .transpose()?;
        Ok(Self {
            spec,
            trigger,
            exemption,
        })
    }

    pub fn name(&self) -> &'static str {
        self.spec.name
    }

    /// The source rule this was compiled from.
    pub fn spec(&self) -> &RuleSpec {
        &self.spec
    }

    /// Whether the trigger pattern occurs anywhere in the prompt.
    pub fn is_triggered(&self, prompt: &str) -> bool {
        self.trigger.is_match(prompt)
    }

    /// Whether the exemption pattern occurs anywhere in the prompt.
    /// Rules without an exemption are never exempt.
    pub fn is_exempt(&self, prompt: &str) -> bool {
        self.exemption
            .as_ref()
            .is_some_and(|exemption| exemption.is_match(prompt))
    }

    /// Build the violation this rule reports.
    pub fn violation(&self) -> Violation {
        Violation {
            rule: self.spec.name.to_string(),
            message: self.spec.message.to_string(),
        }
    }
}

fn compile_pattern(rule: &str, pattern: &str) -> Result<Regex, RulesError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|source| RulesError::InvalidPattern {
            rule: rule.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// One matched rule: its name and the guidance to show the user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Violation {
    pub rule: String,
    pub message: String,
}

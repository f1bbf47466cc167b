// advisory.rs - Composing the advisory text from violations.
//
// With violations, the advisory lists one warning line per violation and
// then the fixed checklist. Without violations it is a one-line reminder.

use promptguard_rules::Violation;

/// Shown when no rule fired.
pub const REMINDER: &str =
    "📋 CLAUDE.md rules are active. Remember: test → lint → build for all code changes.";

/// Appended to every non-empty advisory, whatever fired. Item 2 keeps its
/// two trailing spaces.
pub const CHECKLIST: [&str; 7] = [
    "1. Run tests: pnpm api test",
    "2. Run linting: pnpm api lint  ",
    "3. Run build: pnpm api build",
    "4. Use EnvConfig for environment variables",
    "5. Edit existing files instead of creating new ones",
    "6. Update README.md when adding features or changing architecture",
    "7. Commit format: <type>: <description> (imperative, <72 chars, no period)",
];

/// Format one violation as a warning line.
pub fn warning_line(violation: &Violation) -> String {
    format!("⚠️ {}: {}", violation.rule, violation.message)
}

/// Build the advisory text for a set of violations.
pub fn compose(violations: &[Violation]) -> String {
    if violations.is_empty() {
        return REMINDER.to_string();
    }

    let warnings = violations
        .iter()
        .map(warning_line)
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n🔒 CLAUDE.md Rule Enforcement Active:\n\n{}\n\n📋 Remember these MANDATORY requirements:\n{}\n\nContinue with your request, but ensure compliance with these rules.\n",
        warnings,
        CHECKLIST.join("\n")
    )
}

// rules.rs - List the built-in rules.

use promptguard_rules::RuleSet;

pub fn execute() -> anyhow::Result<()> {
    let rules = RuleSet::builtin()?;

    println!("Built-in rules (evaluated in this order):");
    for (index, rule) in rules.rules().iter().enumerate() {
        let spec = rule.spec();
        println!();
        println!("  {}. {}", index + 1, spec.name);
        println!("     trigger:   {}", spec.trigger);
        if let Some(exemption) = spec.exemption {
            println!("     exemption: {}", exemption);
        }
        println!("     message:   {}", spec.message);
    }
    Ok(())
}

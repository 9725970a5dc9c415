//! List rules command implementation.

use typewalk_rules::{all_rules, typedef};

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<12} {:<28} Description", "Name", "Failure");
    println!("{}", "-".repeat(80));

    for rule in all_rules() {
        println!(
            "{:<12} {:<28} {}",
            rule.name(),
            rule.failure_string(),
            rule.description()
        );
    }

    println!("\nOptions for {}:", typedef::NAME);
    for option in typedef::OPTIONS {
        println!("  {option}");
    }

    println!("\nPresets:");
    println!("  recommended  - typedef: call-signature, parameter (default)");
    println!("  strict       - typedef: every option");
    println!("  minimal      - typedef: call-signature only");

    println!("\nUse --rules to filter specific rules, e.g.:");
    println!("  typewalk check --rules typedef");
}

//! Init command implementation.

use anyhow::{bail, Context, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# typewalk configuration

[linter]
# Root directory to lint, relative to the checked path (default: ".")
# root = "./src"

# Glob patterns to exclude from linting
exclude = [
    "**/node_modules/**",
    "**/*.d.ts",
    "**/dist/**",
]

# Respect .gitignore files
respect_gitignore = true

# Rule configurations
# Each rule can be enabled/disabled and given options.
# Options are flags; `name = false` turns one off again.

[rules.typedef]
enabled = true
options = ["call-signature", "parameter"]
# member-variable-declaration = true
# property-declaration = true
# variable-declaration = true
"#;

/// Name of the file written by `init`.
const CONFIG_FILE: &str = "typewalk.toml";

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    write_config(Path::new(CONFIG_FILE), force)?;

    println!("Created {CONFIG_FILE}");
    println!("\nNext steps:");
    println!("  1. Edit {CONFIG_FILE} to configure rules");
    println!("  2. Run: typewalk check");

    Ok(())
}

fn write_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)
        .with_context(|| format!("Failed to write {}", config_path.display()))
}

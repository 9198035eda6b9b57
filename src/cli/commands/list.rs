//! The `list` command: the resolved step plan for this platform.

use serde_json::json;

use crate::cli::args::ListArgs;
use crate::environment::CondaEnvSpec;
use crate::error::Result;
use crate::platform::Platform;
use crate::registry::{Resolution, ToolRegistry};
use crate::ui::Output;

pub fn execute(args: &ListArgs, output: &Output) -> Result<i32> {
    let platform = Platform::detect();
    let registry = ToolRegistry::new();
    let env_spec = CondaEnvSpec::default();

    if args.json {
        let steps: Vec<_> = registry
            .tools()
            .iter()
            .map(|spec| match spec.resolve(platform) {
                Resolution::Action(action) => json!({
                    "tool": spec.name,
                    "supported": true,
                    "requires": action.requires,
                    "commands": action.commands,
                }),
                Resolution::Unsupported => json!({
                    "tool": spec.name,
                    "supported": false,
                }),
            })
            .collect();
        let payload = json!({
            "platform": platform,
            "steps": steps,
            "environment": {
                "name": env_spec.name,
                "python_version": env_spec.python_version,
                "packages": env_spec.packages,
            },
        });
        let rendered = serde_json::to_string_pretty(&payload).map_err(anyhow::Error::new)?;
        println!("{}", rendered);
        return Ok(0);
    }

    output.header(&format!("Provisioning plan for {}", platform));
    for spec in registry.tools() {
        match spec.resolve(platform) {
            Resolution::Action(action) => {
                let requires = if action.requires.is_empty() {
                    String::new()
                } else {
                    format!(" (requires: {})", action.requires.join(", "))
                };
                output.message(&format!("  {}{}", spec.name, requires));
                for command in &action.commands {
                    output.message(&format!("      $ {}", command));
                }
            }
            Resolution::Unsupported => {
                output.message(&format!("  {} (unsupported)", spec.name));
            }
        }
    }
    output.message(&format!(
        "  {} (python={}, packages: {})",
        env_spec.step_name(),
        env_spec.python_version,
        env_spec.packages.join(", ")
    ));

    Ok(0)
}

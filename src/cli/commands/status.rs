//! The `status` command: read-only presence report.
//!
//! Probes every registry tool and the provisioned environment without
//! mutating anything, so it is safe to run at any time.

use serde_json::json;

use crate::cli::args::StatusArgs;
use crate::detection::PresenceChecker;
use crate::environment::{env_exists, CondaEnvSpec};
use crate::error::Result;
use crate::platform::Platform;
use crate::registry::ToolRegistry;
use crate::shell::{CommandExecutor, SystemExecutor};
use crate::ui::Output;

struct ToolStatus {
    name: String,
    present: bool,
    version: Option<String>,
}

pub fn execute(args: &StatusArgs, output: &Output) -> Result<i32> {
    let platform = Platform::detect();
    let registry = ToolRegistry::new();
    let executor = SystemExecutor;
    let checker = PresenceChecker::new(&executor);

    let mut rows: Vec<ToolStatus> = Vec::new();
    for spec in registry.tools() {
        let exe = spec.probe_executable(platform);
        let present = checker.is_present(exe);
        rows.push(ToolStatus {
            name: spec.name.to_string(),
            present,
            version: if present { checker.probe_version(exe) } else { None },
        });
    }

    let env_spec = CondaEnvSpec::default();
    let env_present = checker.is_present("conda")
        && executor
            .run("conda env list")
            .map(|r| r.success && env_exists(&r.stdout, &env_spec.name))
            .unwrap_or(false);

    if args.json {
        let payload = json!({
            "platform": platform,
            "tools": rows.iter().map(|row| json!({
                "name": row.name,
                "present": row.present,
                "version": row.version,
            })).collect::<Vec<_>>(),
            "environment": {
                "name": env_spec.name,
                "present": env_present,
            },
        });
        let rendered = serde_json::to_string_pretty(&payload).map_err(anyhow::Error::new)?;
        println!("{}", rendered);
        return Ok(0);
    }

    output.header(&format!("Status on {}", platform));
    for row in &rows {
        let state = if row.present {
            match &row.version {
                Some(v) => format!("present ({})", v),
                None => "present".to_string(),
            }
        } else {
            "absent".to_string()
        };
        output.message(&format!("  {:<16} {}", row.name, state));
    }
    output.message(&format!(
        "  {:<16} {}",
        env_spec.step_name(),
        if env_present { "present" } else { "absent" }
    ));

    Ok(0)
}

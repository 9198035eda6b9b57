//! End-to-end pipeline tests against a scripted executor.
//!
//! No test here touches the real system: every probe and install command is
//! answered by `ScriptedExecutor`.

use rigup::environment::CondaEnvSpec;
use rigup::pipeline::report::{RunOutcome, StepOutcome};
use rigup::pipeline::ProvisioningPipeline;
use rigup::platform::{LinuxDistro, Platform};
use rigup::registry::ToolRegistry;
use rigup::shell::mock::ScriptedExecutor;

const UBUNTU: Platform = Platform::Linux(LinuxDistro::Ubuntu);

const ENV_LIST_WITH_J: &str =
    "# conda environments:\n#\nbase   /home/u/miniconda3\nJ      /home/u/miniconda3/envs/J\n";
const ENV_LIST_WITHOUT_J: &str = "# conda environments:\n#\nbase   /home/u/miniconda3\n";
const FULL_PACKAGE_LIST: &str = "# packages in environment at /home/u/miniconda3/envs/J:\n#\n\
numpy 1.24\npandas 2.0\nmatplotlib 3.7\nseaborn 0.12\ngradio 4.0\nnotebook 7.0\npip 23.1\npython 3.9\n";

/// A fresh ubuntu box: only apt-get exists; installs take effect.
fn fresh_ubuntu_executor() -> ScriptedExecutor {
    ScriptedExecutor::new()
        .with_present(&["apt-get"])
        .with_effect("apt-get install -y curl", "curl")
        .with_effect("apt-get install -y wget", "wget")
        .with_effect("miniconda.sh -b", "conda")
        .with_effect("install -y /tmp/vscode.deb", "code")
        .with_effect("apt-get install -y git", "git")
        .with_effect("install -y build-essential", "gcc")
        .with_output("conda env list", ENV_LIST_WITHOUT_J)
        .with_output("conda list -n J", FULL_PACKAGE_LIST)
}

#[test]
fn fresh_ubuntu_installs_everything_in_fixed_order() {
    let registry = ToolRegistry::new();
    let executor = fresh_ubuntu_executor();
    let pipeline = ProvisioningPipeline::new(&registry, &executor, UBUNTU);

    let report = pipeline.run();

    let outcomes: Vec<(&str, StepOutcome)> = report
        .steps
        .iter()
        .map(|s| (s.tool.as_str(), s.outcome))
        .collect();
    assert_eq!(
        outcomes,
        vec![
            ("package-manager", StepOutcome::AlreadyPresent),
            ("curl", StepOutcome::Installed),
            ("wget", StepOutcome::Installed),
            ("miniconda", StepOutcome::Installed),
            ("vscode", StepOutcome::Installed),
            ("git", StepOutcome::Installed),
            ("gcc", StepOutcome::Installed),
            ("env:J", StepOutcome::Installed),
        ]
    );
    assert_eq!(report.outcome, RunOutcome::Success);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn second_run_skips_every_tool() {
    // A system where the first run fully succeeded
    let registry = ToolRegistry::new();
    let executor = ScriptedExecutor::new()
        .with_present(&["apt-get", "curl", "wget", "conda", "code", "git", "gcc"])
        .with_output("conda env list", ENV_LIST_WITH_J)
        .with_output("conda list -n J", FULL_PACKAGE_LIST);
    let pipeline = ProvisioningPipeline::new(&registry, &executor, UBUNTU);

    let report = pipeline.run();

    for step in report.steps.iter().filter(|s| s.tool != "env:J") {
        assert_eq!(
            step.outcome,
            StepOutcome::AlreadyPresent,
            "{} should be skipped on the second run",
            step.tool
        );
    }
    // The environment is recreated on every run by design
    assert_eq!(report.step("env:J").unwrap().outcome, StepOutcome::Installed);
    assert!(executor.ran("conda env remove -n J"));
    assert_eq!(report.outcome, RunOutcome::Success);
    // No installer ever ran
    assert!(!executor.ran("apt-get install"));
}

#[test]
fn unknown_platform_aborts_with_no_side_effects() {
    let registry = ToolRegistry::new();
    let executor = ScriptedExecutor::new();
    let pipeline = ProvisioningPipeline::new(&registry, &executor, Platform::Unknown);

    let report = pipeline.run();

    assert_eq!(report.outcome, RunOutcome::Fatal);
    assert_eq!(report.exit_code(), 1);
    assert!(report.steps.is_empty());
    assert!(executor.commands().is_empty());
}

#[test]
fn windows_bootstrap_failure_poisons_every_dependent() {
    let registry = ToolRegistry::new();
    // Nothing installed; the chocolatey bootstrap itself fails
    let executor = ScriptedExecutor::new().with_failure("powershell");
    let pipeline = ProvisioningPipeline::new(&registry, &executor, Platform::Windows);

    let report = pipeline.run();

    assert_eq!(report.outcome, RunOutcome::Fatal);
    assert_eq!(report.exit_code(), 1);

    for tool in ["curl", "wget", "miniconda", "vscode", "git", "gcc"] {
        let step = report.step(tool).unwrap();
        assert_eq!(step.outcome, StepOutcome::Failed, "{} should fail", tool);
        let diag = step.diagnostic.as_deref().unwrap();
        assert!(
            diag.contains("missing dependency"),
            "{} diagnostic should name the missing dependency, got: {}",
            tool,
            diag
        );
    }

    // Dependent install actions were never invoked
    assert!(!executor.ran("choco install"));
    assert!(!executor.ran("conda create"));
}

#[test]
fn optional_tool_failure_is_partial_and_exits_zero() {
    let registry = ToolRegistry::new();
    let executor = fresh_ubuntu_executor().with_failure("apt-get install -y git");
    let pipeline = ProvisioningPipeline::new(&registry, &executor, UBUNTU);

    let report = pipeline.run();

    assert_eq!(report.step("git").unwrap().outcome, StepOutcome::Failed);
    // Git failing must not block the compiler toolchain
    assert_eq!(report.step("gcc").unwrap().outcome, StepOutcome::Installed);
    assert_eq!(report.outcome, RunOutcome::Partial);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn miniconda_failure_is_fatal_and_blocks_environment() {
    let registry = ToolRegistry::new();
    let executor = ScriptedExecutor::new()
        .with_present(&["apt-get", "curl", "wget", "code", "git", "gcc"])
        .with_failure("miniconda.sh");
    let pipeline = ProvisioningPipeline::new(&registry, &executor, UBUNTU);

    let report = pipeline.run();

    assert_eq!(report.step("miniconda").unwrap().outcome, StepOutcome::Failed);
    let env_step = report.step("env:J").unwrap();
    assert_eq!(env_step.outcome, StepOutcome::Failed);
    assert!(env_step
        .diagnostic
        .as_deref()
        .unwrap()
        .contains("missing dependency"));
    assert!(!executor.ran("conda create"));
    assert_eq!(report.outcome, RunOutcome::Fatal);
    assert_eq!(report.exit_code(), 1);
}

#[test]
fn existing_environment_is_destroyed_then_recreated() {
    let registry = ToolRegistry::new();
    let executor = ScriptedExecutor::new()
        .with_present(&["apt-get", "curl", "wget", "conda", "code", "git", "gcc"])
        .with_output("conda env list", ENV_LIST_WITH_J)
        .with_output("conda list -n J", FULL_PACKAGE_LIST);
    let pipeline = ProvisioningPipeline::new(&registry, &executor, UBUNTU);

    let report = pipeline.run();
    assert_eq!(report.outcome, RunOutcome::Success);

    let commands = executor.commands();
    let remove = commands
        .iter()
        .position(|c| c.contains("conda env remove -n J -y"))
        .expect("existing environment must be removed");
    let create = commands
        .iter()
        .position(|c| c.contains("conda create -n J python=3.9 -y"))
        .expect("environment must be recreated");
    let install = commands
        .iter()
        .position(|c| {
            c.contains(
                "pip install numpy pandas matplotlib seaborn gradio notebook pip",
            )
        })
        .expect("packages must be batch installed");
    let verify = commands
        .iter()
        .position(|c| c.contains("conda list -n J"))
        .expect("package list must be verified");
    assert!(remove < create && create < install && install < verify);
}

#[test]
fn failed_package_verification_names_the_missing_package() {
    let partial_list = "# packages:\nnumpy 1.24\npandas 2.0\nmatplotlib 3.7\nseaborn 0.12\ngradio 4.0\npip 23.1\n";
    let registry = ToolRegistry::new();
    let executor = ScriptedExecutor::new()
        .with_present(&["apt-get", "curl", "wget", "conda", "code", "git", "gcc"])
        .with_output("conda env list", ENV_LIST_WITHOUT_J)
        .with_output("conda list -n J", partial_list);
    let pipeline = ProvisioningPipeline::new(&registry, &executor, UBUNTU);

    let report = pipeline.run();

    let env_step = report.step("env:J").unwrap();
    assert_eq!(env_step.outcome, StepOutcome::Failed);
    assert!(env_step.diagnostic.as_deref().unwrap().contains("notebook"));
    // A failed package batch is not a prerequisite failure
    assert_eq!(report.outcome, RunOutcome::Partial);
    assert_eq!(report.exit_code(), 0);
}

#[test]
fn custom_env_spec_flows_through() {
    let registry = ToolRegistry::new();
    let executor = ScriptedExecutor::new()
        .with_present(&["apt-get", "curl", "wget", "conda", "code", "git", "gcc"])
        .with_output("conda env list", ENV_LIST_WITHOUT_J)
        .with_output("conda list -n lab", "numpy 1.24\npip 23.1\n");
    let spec = CondaEnvSpec {
        name: "lab".to_string(),
        python_version: "3.11".to_string(),
        packages: vec!["numpy".to_string(), "pip".to_string()],
    };
    let pipeline =
        ProvisioningPipeline::new(&registry, &executor, UBUNTU).with_env_spec(spec);

    let report = pipeline.run();

    assert!(executor.ran("conda create -n lab python=3.11 -y"));
    assert_eq!(report.step("env:lab").unwrap().outcome, StepOutcome::Installed);
}

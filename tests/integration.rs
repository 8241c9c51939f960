//! End-to-end tests for the ci-prepare binary
//!
//! These tests populate a temporary scripts directory with one shell script
//! per setup step, run the compiled binary against it and check the console
//! transcript, the exit code and which scripts actually ran.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use ci_prepare::STEPS;
use tempfile::TempDir;

/// Test context with a scripts directory and an isolated config home
struct TestContext {
    temp_dir: TempDir,
    scripts_dir: PathBuf,
    config_home: PathBuf,
}

impl TestContext {
    /// Create a context where every step script succeeds silently
    fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let scripts_dir = temp_dir.path().join("scripts");
        let config_home = temp_dir.path().join("config");
        fs::create_dir_all(&scripts_dir).expect("Failed to create scripts dir");
        fs::create_dir_all(&config_home).expect("Failed to create config dir");

        let ctx = Self {
            temp_dir,
            scripts_dir,
            config_home,
        };
        for step in STEPS {
            ctx.script(step.script, "");
        }
        ctx
    }

    /// (Re)write a step script; it records its name before running `body`
    fn script(&self, name: &str, body: &str) {
        let path = self.scripts_dir.join(name);
        let content = format!(
            "#!/bin/sh\necho {name} >> '{}'\n{body}\n",
            self.ran_log().display()
        );
        fs::write(&path, content).expect("Failed to write script");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755))
            .expect("Failed to make script executable");
    }

    fn ran_log(&self) -> PathBuf {
        self.temp_dir.path().join("ran.log")
    }

    /// Scripts that ran, in order
    fn ran(&self) -> Vec<String> {
        fs::read_to_string(self.ran_log())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ci-prepare"));
        cmd.stdin(Stdio::null())
            .env("NO_COLOR", "1")
            .env("XDG_CONFIG_HOME", &self.config_home)
            .env_remove("CI_PREPARE_SCRIPTS_DIR")
            .env_remove("RUST_LOG");
        cmd
    }

    fn run_with_dir(&self, dir: &Path) -> Output {
        self.command()
            .arg("--scripts-dir")
            .arg(dir)
            .output()
            .expect("Failed to run ci-prepare")
    }

    fn run(&self) -> Output {
        self.run_with_dir(&self.scripts_dir)
    }
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_all_steps_succeed() {
    let ctx = TestContext::new();

    let output = ctx.run();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let expected: Vec<String> = STEPS.iter().map(|s| s.script.to_string()).collect();
    assert_eq!(ctx.ran(), expected);

    let out = stdout(&output);
    for step in STEPS {
        assert!(out.contains(&format!("==== {} ====\n", step.name)));
        assert!(out.contains(&format!("==== success: {} ====\n\n", step.name)));
    }
    assert!(!out.contains("failure"));
}

#[test]
fn test_failing_step_propagates_exit_code() {
    let ctx = TestContext::new();
    ctx.script("install-clang.sh", "echo 'clang download failed' >&2\nexit 7");

    let output = ctx.run();
    assert_eq!(output.status.code(), Some(7));
    assert_eq!(
        ctx.ran(),
        vec!["dump-environment.sh", "install-sccache.sh", "install-clang.sh"]
    );

    let out = stdout(&output);
    assert!(out.contains("clang download failed\n"));
    assert!(out.contains("==== failure: Install clang ====\nexit code: 7\n"));
    assert!(!out.contains("==== Switch to Xcode 9.3 ===="));
}

#[test]
fn test_log_commands_reach_later_steps() {
    let ctx = TestContext::new();
    ctx.script(
        "dump-environment.sh",
        "echo '##vso[task.prependpath]/extra/bin'\n\
         echo '##vso[task.setvariable variable=SCCACHE_DIR]/cache/sccache'",
    );
    ctx.script(
        "install-awscli.sh",
        "echo \"path: $PATH\"\necho \"sccache: $SCCACHE_DIR\"",
    );

    let output = ctx.run();
    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));

    let out = stdout(&output);
    assert!(out.contains("path: /extra/bin:"));
    assert!(out.contains("sccache: /cache/sccache\n"));
    assert!(!out.contains("##vso["));
}

#[test]
fn test_unsupported_log_command_aborts() {
    let ctx = TestContext::new();
    ctx.script("install-sccache.sh", "echo '##vso[task.unknowncmd]xyz'");

    let output = ctx.run();
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(ctx.ran(), vec!["dump-environment.sh", "install-sccache.sh"]);

    let out = stdout(&output);
    assert!(out.contains("ERROR: unsupported log command: ##vso[task.unknowncmd]xyz"));
    assert!(!out.contains("==== Install clang ===="));
    assert!(!stderr(&output).contains("ERROR"));
}

#[test]
fn test_missing_scripts_dir_fails() {
    let ctx = TestContext::new();

    let output = ctx.run_with_dir(&ctx.temp_dir.path().join("nowhere"));
    assert_eq!(output.status.code(), Some(1));
    assert!(ctx.ran().is_empty());

    let err = stderr(&output);
    assert!(err.contains("ERROR: failed to run script"));
    assert!(err.contains("dump-environment.sh"));
}

#[test]
fn test_scripts_dir_from_config_file() {
    let ctx = TestContext::new();
    let config = ctx.temp_dir.path().join("ci-prepare.toml");
    fs::write(&config, "scripts_dir = \"scripts\"\n").expect("Failed to write config");

    let output = ctx
        .command()
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run ci-prepare");

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(ctx.ran().len(), STEPS.len());
}

#[test]
fn test_invalid_config_file_fails() {
    let ctx = TestContext::new();
    let config = ctx.temp_dir.path().join("broken.toml");
    fs::write(&config, "scripts_dir = [").expect("Failed to write config");

    let output = ctx
        .command()
        .arg("--config")
        .arg(&config)
        .output()
        .expect("Failed to run ci-prepare");

    assert_eq!(output.status.code(), Some(1));
    assert!(ctx.ran().is_empty());
    assert!(stderr(&output).contains("Invalid configuration file"));
}

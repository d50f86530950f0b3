// Shared helpers for integration tests.
//
// Provides a temporary-directory deployment fixture (config file plus a
// `files/` source tree) and a scriptable executor, so each test can drive a
// full operation without touching the real system.
//
// Used by every integration test binary that declares `mod common;`.
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use dotdeploy::exec::{ExecResult, Executor};

/// A deployment rooted in a temporary directory.
///
/// Holds the config file and `files/` source tree the operation reads from,
/// and a separate base directory for it to copy into. The base directory is
/// not created up front; tests that care assert on its (non-)existence.
pub struct DeployFixture {
    root: tempfile::TempDir,
    base_dir: PathBuf,
}

impl DeployFixture {
    /// Path to the fixture's config file (which may not exist yet).
    pub fn config_path(&self) -> PathBuf {
        self.root.path().join("dotfiles.json")
    }

    /// Path to the fixture's `files/` source tree.
    pub fn source_root(&self) -> PathBuf {
        self.root.path().join("files")
    }

    /// Destination root for copied dotfiles.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Builds an operation context backed by this fixture.
    pub fn context<'a>(
        &self,
        executor: &'a dyn Executor,
        log: &'a dotdeploy::logging::Logger,
    ) -> dotdeploy::commands::Context<'a> {
        dotdeploy::commands::Context {
            config_path: self.config_path(),
            source_root: self.source_root(),
            executor,
            log,
        }
    }
}

/// Fluent builder for [`DeployFixture`].
pub struct FixtureBuilder {
    fixture: DeployFixture,
}

impl FixtureBuilder {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("failed to create fixture directory");
        let base_dir = root.path().join("home");
        fs::create_dir_all(root.path().join("files")).expect("failed to create source tree");
        Self {
            fixture: DeployFixture { root, base_dir },
        }
    }

    /// Writes the config file with the given JSON content.
    pub fn with_config(self, content: &str) -> Self {
        fs::write(self.fixture.config_path(), content).expect("failed to write config");
        self
    }

    /// Writes a file into the `files/` source tree, creating parents.
    pub fn with_source_file(self, name: &str, content: &str) -> Self {
        let path = self.fixture.source_root().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("failed to create source subdirectory");
        }
        fs::write(path, content).expect("failed to write source file");
        self
    }

    /// Creates a directory (not a regular file) inside the source tree.
    pub fn with_source_directory(self, name: &str) -> Self {
        fs::create_dir_all(self.fixture.source_root().join(name))
            .expect("failed to create source directory");
        self
    }

    pub fn build(self) -> DeployFixture {
        self.fixture
    }
}

/// Executor double that records every call and answers from a script.
///
/// Programs listed as available are reported present by `which`. Checked runs
/// of a failing program return an error; unchecked runs whose arguments name
/// a missing package report failure without an error. Everything else
/// succeeds with empty output.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    calls: Mutex<Vec<(String, Vec<String>)>>,
    available: Vec<String>,
    missing_packages: Vec<String>,
    failing_programs: Vec<String>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a program as present on the PATH.
    pub fn with_available(mut self, program: &str) -> Self {
        self.available.push(program.to_string());
        self
    }

    /// Marks a package as absent from the repositories, so an unchecked
    /// query naming it reports failure.
    pub fn with_missing_package(mut self, package: &str) -> Self {
        self.missing_packages.push(package.to_string());
        self
    }

    /// Makes every checked run of the given program fail.
    pub fn with_failing_program(mut self, program: &str) -> Self {
        self.failing_programs.push(program.to_string());
        self
    }

    /// All recorded calls, in order, as (program, args) pairs.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().expect("executor mutex poisoned").clone()
    }

    /// The programs run, in order, without their arguments.
    pub fn programs_run(&self) -> Vec<String> {
        self.calls().into_iter().map(|(program, _)| program).collect()
    }

    fn record(&self, program: &str, args: &[&str]) {
        self.calls
            .lock()
            .expect("executor mutex poisoned")
            .push((
                program.to_string(),
                args.iter().map(ToString::to_string).collect(),
            ));
    }

    fn checked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args);
        if self.failing_programs.iter().any(|p| p == program) {
            anyhow::bail!("{program} failed (exit 1): scripted failure");
        }
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: true,
            code: Some(0),
        })
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.checked(program, args)
    }

    fn run_in(&self, dir: &Path, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        let _ = dir;
        self.checked(program, args)
    }

    fn run_in_with_env(
        &self,
        dir: &Path,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> anyhow::Result<ExecResult> {
        let _ = (dir, env);
        self.checked(program, args)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
        self.record(program, args);
        let missing = args
            .iter()
            .any(|arg| self.missing_packages.iter().any(|p| p == arg));
        Ok(ExecResult {
            stdout: String::new(),
            stderr: String::new(),
            success: !missing,
            code: Some(if missing { 1 } else { 0 }),
        })
    }

    fn which(&self, program: &str) -> bool {
        self.available.iter().any(|p| p == program)
    }
}

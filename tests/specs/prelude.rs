//! Test helpers for behavioral specifications.
//!
//! Provides high-level DSL for testing acstream CLI behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Returns a Command configured to run the acstream binary, isolated from
/// the caller's color, config and logging environment.
pub fn acstream_cmd() -> assert_cmd::Command {
    let mut cmd = assert_cmd::Command::new(assert_cmd::cargo::cargo_bin!("acstream"));
    cmd.env_remove("COLOR")
        .env_remove("NO_COLOR")
        .env_remove("ACSTREAM_CONFIG")
        .env_remove("ACSTREAM_LOG");
    cmd
}

/// Create a `search` command builder
pub fn search() -> CmdBuilder {
    CmdBuilder::new("search")
}

/// Create a `replace` command builder
pub fn replace() -> CmdBuilder {
    CmdBuilder::new("replace")
}

/// Create a `dump` command builder
pub fn dump() -> CmdBuilder {
    CmdBuilder::new("dump")
}

/// Subcommand builder for fluent test assertions
pub struct CmdBuilder {
    subcommand: &'static str,
    dir: Option<PathBuf>,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: Option<Vec<u8>>,
}

#[allow(dead_code)]
impl CmdBuilder {
    fn new(subcommand: &'static str) -> Self {
        Self {
            subcommand,
            dir: None,
            args: Vec::new(),
            envs: Vec::new(),
            stdin: None,
        }
    }

    /// Run in the given directory
    pub fn pwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.dir = Some(path.into());
        self
    }

    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|a| a.to_string()));
        self
    }

    /// Add `-e PATTERN` for each pattern
    pub fn patterns(mut self, patterns: &[&str]) -> Self {
        for pattern in patterns {
            self.args.push("-e".to_string());
            self.args.push(pattern.to_string());
        }
        self
    }

    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    pub fn stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    /// Expect exit code 0
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Expect the given exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.command().output().unwrap();
        assert_eq!(
            output.status.code(),
            Some(code),
            "unexpected exit code\nstdout: {}\nstderr: {}",
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    fn command(self) -> assert_cmd::Command {
        let mut cmd = acstream_cmd();
        cmd.arg(self.subcommand);
        cmd.args(&self.args);

        if let Some(dir) = self.dir {
            cmd.current_dir(dir);
        }
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }
        if let Some(stdin) = self.stdin {
            cmd.write_stdin(stdin);
        }

        cmd
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }

    /// Assert stderr does not match predicate.
    pub fn stderr_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            !predicate.into_predicate().eval(&stderr),
            "stderr should NOT match predicate:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Project
// =============================================================================

/// Temporary directory holding inputs and rules files.
///
/// # Examples
///
/// ```ignore
/// let temp = Project::empty();
/// temp.config("[[pattern]]\nsearch = \"cat\"");
/// temp.file("in.txt", "concatenate");
/// search().pwd(temp.path()).args(&["-C", "acstream.toml", "in.txt"]).passes();
/// ```
pub struct Project {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Project {
    /// Create an empty project with no files
    pub fn empty() -> Self {
        Self {
            dir: tempfile::tempdir().unwrap(),
        }
    }

    /// Get the project path
    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write acstream.toml (auto-prefixes with `version = 1` if not present)
    pub fn config(&self, content: &str) -> PathBuf {
        let content = if content.contains("version") {
            content.to_string()
        } else {
            format!("version = 1\n{}", content)
        };
        self.file("acstream.toml", &content)
    }

    /// Write a file, creating parent directories
    pub fn file(&self, path: &str, content: &str) -> PathBuf {
        let full = self.dir.path().join(path);
        if let Some(parent) = full.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(&full, content).unwrap();
        full
    }
}

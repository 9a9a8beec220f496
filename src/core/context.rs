use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::commands::CommandError;
use crate::path::PathExpander;

/// Per-session mutable state: working directory and input history.
pub struct ExecutionContext {
    current_dir: PathBuf,
    history: Vec<String>,
    expander: PathExpander,
}

impl ExecutionContext {
    /// Starts in the process's working directory.
    pub fn new() -> io::Result<Self> {
        Self::in_dir(env::current_dir()?)
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> io::Result<Self> {
        Self::with_expander(dir, PathExpander::new())
    }

    pub fn with_expander(dir: impl AsRef<Path>, expander: PathExpander) -> io::Result<Self> {
        let current_dir = fs::canonicalize(dir)?;
        if !current_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} is not a directory", current_dir.display()),
            ));
        }
        Ok(Self {
            current_dir,
            history: Vec::new(),
            expander,
        })
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn home_dir(&self) -> Option<&Path> {
        self.expander.home_dir()
    }

    /// Resolves a user-supplied path against the current directory.
    pub fn resolve(&self, path: &str) -> PathBuf {
        self.expander.resolve(&self.current_dir, path)
    }

    /// Validates `target` and only then makes it the current directory.
    pub fn change_dir(&mut self, target: &Path) -> Result<(), CommandError> {
        let shown = target.display().to_string();
        let canonical = fs::canonicalize(target)
            .map_err(|e| CommandError::from_io(format!("cd: {}", shown), e))?;

        if !canonical.is_dir() {
            return Err(CommandError::NotADirectory(format!("cd: {}", shown)));
        }
        fs::read_dir(&canonical).map_err(|e| CommandError::from_io(format!("cd: {}", shown), e))?;

        self.current_dir = canonical;
        Ok(())
    }

    pub fn record(&mut self, line: impl Into<String>) {
        self.history.push(line.into());
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }
}

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::compare::{Actual, compare};
use crate::error::Error;
use crate::model::{CheckMode, CheckReport};
use crate::parser::parse_file;

pub const DEFAULT_ENV_FILE: &str = ".env";
pub const DEFAULT_EXAMPLE_FILE: &str = ".env.example";

/// Check `.env` against `.env.example` in the current working directory.
pub fn check_env() -> Result<CheckReport, Error> {
    EnvChecker::new().check()
}

/// Builder-style env file checker.
#[derive(Debug, Clone)]
pub struct EnvChecker {
    env_path: PathBuf,
    example_path: PathBuf,
    mode: CheckMode,
}

impl EnvChecker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn env_path(mut self, path: impl AsRef<Path>) -> Self {
        self.env_path = path.as_ref().to_path_buf();
        self
    }

    pub fn example_path(mut self, path: impl AsRef<Path>) -> Self {
        self.example_path = path.as_ref().to_path_buf();
        self
    }

    pub fn mode(mut self, mode: CheckMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn strict(self, strict: bool) -> Self {
        self.mode(CheckMode::from_strict(strict))
    }

    pub fn env_file(&self) -> &Path {
        &self.env_path
    }

    pub fn example_file(&self) -> &Path {
        &self.example_path
    }

    pub fn check_mode(&self) -> CheckMode {
        self.mode
    }

    /// Read both files and compare them.
    ///
    /// A missing env file is reported in [`CheckReport::error`]; a missing
    /// example file switches to single-file mode. Other read failures are
    /// returned as errors.
    pub fn check(&self) -> Result<CheckReport, Error> {
        let actual = parse_file(&self.env_path)?;
        let template = parse_file(&self.example_path)?;
        if template.is_none() {
            debug!(
                example = %self.example_path.display(),
                "no example file, checking env file on its own"
            );
        }

        let actual = match &actual {
            Some(map) => Actual::Loaded(map),
            None => Actual::NotFound(&self.env_path),
        };
        let report = compare(actual, template.as_ref(), self.mode);
        debug!(
            valid = report.valid,
            missing = report.missing.len(),
            empty = report.empty.len(),
            extra = report.extra.len(),
            "env check finished"
        );
        Ok(report)
    }
}

impl Default for EnvChecker {
    fn default() -> Self {
        Self {
            env_path: PathBuf::from(DEFAULT_ENV_FILE),
            example_path: PathBuf::from(DEFAULT_EXAMPLE_FILE),
            mode: CheckMode::Advisory,
        }
    }
}

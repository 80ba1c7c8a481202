//! Run mode and base directory detection

use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable selecting the run mode.
pub const MODE_ENV_VAR: &str = "APP_ENV";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunMode {
    Dev,
    #[default]
    Prod,
}

impl FromStr for RunMode {
    type Err = std::convert::Infallible;

    /// `dev`, `development` and `local` (any case) select development;
    /// everything else is production.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" | "local" => RunMode::Dev,
            _ => RunMode::Prod,
        })
    }
}

/// Where the application runs from and in which mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runtime {
    pub mode: RunMode,
    pub base_dir: PathBuf,
}

impl Runtime {
    pub fn new(mode: RunMode, base_dir: impl Into<PathBuf>) -> Self {
        Self { mode, base_dir: base_dir.into() }
    }

    /// Detect from `APP_ENV`, the working directory and the executable path.
    ///
    /// In development the base directory is the working directory (the
    /// project checkout). In production it is the directory holding the
    /// executable, falling back to the working directory.
    pub fn detect() -> Self {
        let mode = env::var(MODE_ENV_VAR)
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();
        Self::detect_with_mode(mode)
    }

    pub fn detect_with_mode(mode: RunMode) -> Self {
        let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        let base_dir = match mode {
            RunMode::Dev => cwd,
            RunMode::Prod => env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or(cwd),
        };
        Self { mode, base_dir }
    }

    pub fn is_dev(&self) -> bool {
        self.mode == RunMode::Dev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_mode_parsing() {
        assert_eq!("dev".parse::<RunMode>(), Ok(RunMode::Dev));
        assert_eq!(" Development ".parse::<RunMode>(), Ok(RunMode::Dev));
        assert_eq!("LOCAL".parse::<RunMode>(), Ok(RunMode::Dev));
        assert_eq!("prod".parse::<RunMode>(), Ok(RunMode::Prod));
        assert_eq!("staging".parse::<RunMode>(), Ok(RunMode::Prod));
    }

    #[test]
    fn test_detect_reads_mode_variable() {
        temp_env::with_var(MODE_ENV_VAR, Some("dev"), || {
            let runtime = Runtime::detect();
            assert!(runtime.is_dev());
            assert_eq!(runtime.base_dir, env::current_dir().expect("cwd"));
        });
    }

    #[test]
    fn test_detect_defaults_to_prod() {
        temp_env::with_var_unset(MODE_ENV_VAR, || {
            let runtime = Runtime::detect();
            assert_eq!(runtime.mode, RunMode::Prod);
            assert!(!runtime.base_dir.as_os_str().is_empty());
        });
    }
}

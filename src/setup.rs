//! setup.rs
//!
//! Locates the binaries under test before any suite starts.
//! push_swap and the checker are required; the bonus checker is optional.

use std::path::Path;

use crate::config::Config;
use crate::error::{HarnessError, HarnessResult};
use crate::logger::{log, RunLog};
use crate::state::LogLevel;
use crate::testgen::runner::Binaries;

pub fn discover(cfg: &Config, run: &mut RunLog) -> HarnessResult<Binaries> {
    let push_swap = require("push_swap", &cfg.push_swap)?;

    let checker_path = cfg
        .checker
        .as_deref()
        .ok_or_else(|| HarnessError::UnsupportedPlatform(std::env::consts::OS.to_string()))?;
    let checker = require("checker", checker_path)?;
    log(run, LogLevel::Info, format!("checker: {}", checker));

    let bonus_checker = if cfg.bonus_checker.is_file() {
        log(run, LogLevel::Success, "Bonus Checker found");
        Some(cfg.bonus_checker.display().to_string())
    } else {
        log(run, LogLevel::Warn, "⚠️  Bonus checker not found");
        None
    };

    Ok(Binaries {
        push_swap,
        checker,
        bonus_checker,
    })
}

fn require(what: &'static str, path: &Path) -> HarnessResult<String> {
    if !path.is_file() {
        return Err(HarnessError::MissingBinary {
            what,
            path: path.to_path_buf(),
        });
    }
    Ok(path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn cfg_in(dir: &Path) -> Config {
        Config {
            push_swap: dir.join("push_swap"),
            checker: Some(dir.join("checker_linux")),
            bonus_checker: dir.join("checker"),
            ..Config::default()
        }
    }

    #[test]
    fn missing_push_swap_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let mut run = RunLog::silent();

        let err = discover(&cfg_in(dir.path()), &mut run).unwrap_err();
        assert!(matches!(err, HarnessError::MissingBinary { what: "push_swap", .. }));
    }

    #[test]
    fn missing_checker_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("push_swap"), "").unwrap();
        let mut run = RunLog::silent();

        let err = discover(&cfg_in(dir.path()), &mut run).unwrap_err();
        assert!(matches!(err, HarnessError::MissingBinary { what: "checker", .. }));
    }

    #[test]
    fn no_checker_for_platform_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("push_swap"), "").unwrap();
        let cfg = Config {
            checker: None,
            ..cfg_in(dir.path())
        };
        let mut run = RunLog::silent();

        let err = discover(&cfg, &mut run).unwrap_err();
        assert!(matches!(err, HarnessError::UnsupportedPlatform(_)));
    }

    #[test]
    fn bonus_checker_is_optional() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("push_swap"), "").unwrap();
        fs::write(dir.path().join("checker_linux"), "").unwrap();
        let mut run = RunLog::silent();

        let bins = discover(&cfg_in(dir.path()), &mut run).unwrap();
        assert_eq!(bins.bonus_checker, None);
        assert!(run.contains("Bonus checker not found"));

        fs::write(dir.path().join("checker"), "").unwrap();
        let bins = discover(&cfg_in(dir.path()), &mut run).unwrap();
        assert!(bins.bonus_checker.is_some());
    }
}

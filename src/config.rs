use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{HarnessError, HarnessResult};

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileConfig {
    push_swap: Option<PathBuf>,
    checker: Option<PathBuf>,
    bonus_checker: Option<PathBuf>,
    memory_check: Option<bool>,
    memory_timeout_secs: Option<u64>,
    /// 0 disables the per-case bound.
    case_timeout_secs: Option<u64>,
    max_test_size: Option<usize>,
    test_count: Option<usize>,
    seed: Option<u64>,
    jobs: Option<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub push_swap: PathBuf,
    /// `None` on platforms without a stock checker binary.
    pub checker: Option<PathBuf>,
    pub bonus_checker: PathBuf,
    pub memory_check: bool,
    pub memory_timeout: Duration,
    pub case_timeout: Option<Duration>,
    pub max_test_size: usize,
    pub test_count: usize,
    pub seed: u64,
    pub jobs: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            push_swap: PathBuf::from("./push_swap"),
            checker: default_checker(std::env::consts::OS),
            bonus_checker: PathBuf::from("./checker"),
            memory_check: true,
            memory_timeout: Duration::from_secs(30),
            case_timeout: Some(Duration::from_secs(20)),
            max_test_size: 500,
            test_count: 5,
            seed: 42,
            jobs: 1,
        }
    }
}

pub fn config_path() -> PathBuf {
    let mut dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    dir.push("yapst");
    dir.push("config.toml");
    dir
}

/// Loads `explicit`, or the per-user config file when none is given.
/// A missing per-user file means defaults; a missing explicit file is an error.
pub fn load(explicit: Option<&Path>) -> HarnessResult<Config> {
    let path = explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(config_path);

    match fs::read_to_string(&path) {
        Ok(raw) => parse(&raw, &path),
        Err(e) if e.kind() == ErrorKind::NotFound && explicit.is_none() => Ok(Config::default()),
        Err(e) => Err(HarnessError::Config {
            path,
            message: e.to_string(),
        }),
    }
}

pub fn parse(raw: &str, path: &Path) -> HarnessResult<Config> {
    let file: FileConfig = toml::from_str(raw).map_err(|e| HarnessError::Config {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut cfg = Config::default();
    if let Some(p) = file.push_swap {
        cfg.push_swap = p;
    }
    if let Some(p) = file.checker {
        cfg.checker = Some(p);
    }
    if let Some(p) = file.bonus_checker {
        cfg.bonus_checker = p;
    }
    if let Some(b) = file.memory_check {
        cfg.memory_check = b;
    }
    if let Some(secs) = file.memory_timeout_secs {
        cfg.memory_timeout = Duration::from_secs(secs.max(1));
    }
    if let Some(secs) = file.case_timeout_secs {
        cfg.case_timeout = (secs > 0).then(|| Duration::from_secs(secs));
    }
    if let Some(n) = file.max_test_size {
        cfg.max_test_size = n;
    }
    if let Some(n) = file.test_count {
        cfg.test_count = n;
    }
    if let Some(seed) = file.seed {
        cfg.seed = seed;
    }
    if let Some(jobs) = file.jobs {
        cfg.jobs = jobs.max(1);
    }
    Ok(cfg)
}

pub fn default_checker(os: &str) -> Option<PathBuf> {
    match os {
        "macos" => Some(PathBuf::from("./checker_Mac")),
        "linux" => Some(PathBuf::from("./checker_linux")),
        _ => None,
    }
}

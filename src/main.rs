mod config;
mod error;
mod executor;
mod logger;
mod report;
mod setup;
mod state;
mod testgen;

use std::{error::Error, path::PathBuf, process::ExitCode, time::Duration};

use clap::Parser;
use crossterm::style::{style, Color, Stylize};

use crate::{
    config::Config,
    executor::{resolve_memory_tool, ProcessInvoker, ToolPrefix},
    logger::{log, log_header, RunLog},
    report::{print_summary, RunReport},
    state::LogLevel,
    testgen::{
        fixtures::{all_suites, select, FixtureSettings},
        runner::{RunSettings, SuiteRunner},
    },
};

#[derive(Parser)]
#[command(
    name = "yapst",
    version,
    about = "Conformance and benchmark tester for push_swap."
)]
struct Cli {
    #[arg(long, help = "Config file (default: <config dir>/yapst/config.toml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "push_swap binary")]
    push_swap: Option<PathBuf>,

    #[arg(long, help = "Checker binary (default depends on platform)")]
    checker: Option<PathBuf>,

    #[arg(long, help = "Bonus checker binary, used when present")]
    bonus_checker: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Skip valgrind/leaks even if installed")]
    no_memcheck: bool,

    #[arg(long, help = "Per-invocation timeout in seconds (0 disables)")]
    timeout: Option<u64>,

    #[arg(long, help = "Worker threads for benchmark suites")]
    jobs: Option<usize>,

    #[arg(long, help = "Seed for generated inputs")]
    seed: Option<u64>,

    #[arg(long, help = "Largest random input size")]
    max_size: Option<usize>,

    #[arg(long, help = "Random inputs per size")]
    count: Option<usize>,

    #[arg(long = "suite", help = "Only run suites whose name contains this (repeatable)")]
    suites: Vec<String>,

    #[arg(long, help = "Write the JSON report to this file")]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = false, help = "Only print the JSON report")]
    json: bool,
}

impl Cli {
    fn apply(&self, cfg: &mut Config) {
        if let Some(p) = &self.push_swap {
            cfg.push_swap = p.clone();
        }
        if let Some(p) = &self.checker {
            cfg.checker = Some(p.clone());
        }
        if let Some(p) = &self.bonus_checker {
            cfg.bonus_checker = p.clone();
        }
        if self.no_memcheck {
            cfg.memory_check = false;
        }
        if let Some(secs) = self.timeout {
            cfg.case_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }
        if let Some(jobs) = self.jobs {
            cfg.jobs = jobs.max(1);
        }
        if let Some(seed) = self.seed {
            cfg.seed = seed;
        }
        if let Some(n) = self.max_size {
            cfg.max_test_size = n;
        }
        if let Some(n) = self.count {
            cfg.test_count = n;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}", style(format!("⚠️  {}", e)).with(Color::Red));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode, Box<dyn Error>> {
    let mut cfg = config::load(cli.config.as_deref())?;
    cli.apply(&mut cfg);

    let mut run = RunLog::new(!cli.json);

    let binaries = setup::discover(&cfg, &mut run)?;
    let memory = if cfg.memory_check {
        resolve_memory_tool(&mut run)
    } else {
        log(&mut run, LogLevel::Info, "Memory checking disabled");
        ToolPrefix::none()
    };
    if memory.is_enabled() {
        log(
            &mut run,
            LogLevel::Info,
            format!("memory tester: {}", memory.tokens().join(" ")),
        );
    }

    let fixtures = FixtureSettings {
        seed: cfg.seed,
        max_test_size: cfg.max_test_size,
        test_count: cfg.test_count,
    };
    let suites = select(all_suites(&fixtures), &cli.suites);
    if suites.is_empty() {
        log(&mut run, LogLevel::Warn, "No suite matches the given --suite filters");
    }

    let invoker = ProcessInvoker::new();
    let settings = RunSettings {
        case_timeout: cfg.case_timeout,
        memory_timeout: cfg.memory_timeout,
        jobs: cfg.jobs,
    };
    let runner = SuiteRunner::new(&invoker, &binaries, &memory, settings);

    log_header(&mut run, "Starting tests...");
    let mut results = Vec::with_capacity(suites.len());
    for suite in &suites {
        results.push(runner.run_suite(&suite.name, &suite.cases, suite.mode, &mut run)?);
    }

    let report = RunReport::new(&binaries, &memory, results);
    print_summary(&report, &mut run);

    if let Some(path) = &cli.out {
        report.write_json(path)?;
        log(&mut run, LogLevel::Info, format!("Report written to {}", path.display()));
    }
    if cli.json {
        println!("{}", report.to_json()?);
    }

    Ok(if report.passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

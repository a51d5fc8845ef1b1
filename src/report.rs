use std::fs;
use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::error::{HarnessError, HarnessResult};
use crate::executor::{MemTool, ToolPrefix};
use crate::logger::{log, log_header, RunLog};
use crate::state::{LogLevel, SuiteMode};
use crate::testgen::runner::{Binaries, SuiteResult};
use crate::testgen::stats::StatsSummary;

#[derive(Debug, Serialize)]
pub struct SuiteEntry {
    #[serde(flatten)]
    pub result: SuiteResult,
    pub summary: StatsSummary,
}

#[derive(Debug, Serialize)]
pub struct RunReport {
    pub generated_at: String,
    pub binaries: Binaries,
    pub memory_tool: Option<MemTool>,
    pub passed: bool,
    pub suites: Vec<SuiteEntry>,
}

impl RunReport {
    pub fn new(binaries: &Binaries, memory: &ToolPrefix, suites: Vec<SuiteResult>) -> Self {
        // Benchmark suites are informational; only error-handling suites gate.
        let passed = suites
            .iter()
            .filter(|s| s.mode == SuiteMode::Error)
            .all(|s| s.verdict);

        Self {
            generated_at: Utc::now().to_rfc3339(),
            binaries: binaries.clone(),
            memory_tool: memory.tool(),
            passed,
            suites: suites
                .into_iter()
                .map(|result| SuiteEntry {
                    summary: result.stats.finalize(),
                    result,
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> HarnessResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| HarnessError::Report(e.to_string()))
    }

    pub fn write_json(&self, path: &Path) -> HarnessResult<()> {
        let text = self.to_json()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| HarnessError::Report(e.to_string()))?;
        }
        fs::write(path, text).map_err(|e| HarnessError::Report(e.to_string()))
    }
}

/// One line per suite after everything has run.
pub fn print_summary(report: &RunReport, run: &mut RunLog) {
    log_header(run, "Summary");

    for entry in &report.suites {
        let r = &entry.result;
        let c = &r.counts;
        let line = format!(
            "{} {}: {}/{} passed, {} failed, {} crashed, {} memory faults, {} timed out",
            if r.verdict && r.failures.is_empty() { "✅" } else { "❌" },
            r.name,
            c.passed,
            r.total,
            c.failed,
            c.crashed,
            c.memory_faults,
            c.timed_out
        );
        let level = match (r.mode, r.verdict, r.failures.is_empty()) {
            (_, true, true) => LogLevel::Success,
            (SuiteMode::Standard, true, false) => LogLevel::Warn,
            _ => LogLevel::Error,
        };
        log(run, level, line);
    }

    if let Some(first) = run.lines.front() {
        let elapsed = first.at.elapsed();
        log(
            run,
            LogLevel::Info,
            format!("Finished in {:.2}s", elapsed.as_secs_f64()),
        );
    }
}

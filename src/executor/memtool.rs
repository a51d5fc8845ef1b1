//! executor/memtool.rs
//!
//! Memory checker discovery and report interpretation.
//!
//! The host platform is looked at exactly once, here. Everything
//! downstream works with the resolved `ToolPrefix`.

use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::logger::{log, RunLog};
use crate::state::{LogLevel, ProcessResult};

const VALGRIND_PATH: &str = "/usr/bin/valgrind";
const LEAKS_PATH: &str = "/usr/bin/leaks";

const VALGRIND_ALL_FREED: &str = "All heap blocks were freed";
const LEAKS_CLEAN: &str = "0 leaks for 0 total leaked bytes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemTool {
    /// Linux. Judged by exit code and the error summary.
    Valgrind,
    /// macOS. Judged by the report text only.
    Leaks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolPrefix {
    tool: Option<MemTool>,
    tokens: Vec<String>,
}

impl ToolPrefix {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn for_tool(tool: MemTool, path: &str) -> Self {
        let mut tokens = vec![path.to_string()];
        match tool {
            MemTool::Valgrind => tokens.push("--leak-check=full".into()),
            MemTool::Leaks => {
                tokens.push("-atExit".into());
                tokens.push("--".into());
            }
        }
        Self {
            tool: Some(tool),
            tokens,
        }
    }

    pub fn tool(&self) -> Option<MemTool> {
        self.tool
    }

    pub fn is_enabled(&self) -> bool {
        self.tool.is_some()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn wrap(&self, command: &[String]) -> Vec<String> {
        self.tokens.iter().chain(command).cloned().collect()
    }
}

/* ============================================================
   Resolution
   ============================================================ */

pub fn resolve_memory_tool(run: &mut RunLog) -> ToolPrefix {
    resolve_for(std::env::consts::OS, |p| p.is_file(), run)
}

pub fn resolve_for(os: &str, exists: impl Fn(&Path) -> bool, run: &mut RunLog) -> ToolPrefix {
    let (tool, path) = match os {
        "linux" => (MemTool::Valgrind, VALGRIND_PATH),
        "macos" => (MemTool::Leaks, LEAKS_PATH),
        other => {
            log(
                run,
                LogLevel::Warn,
                format!("⚠️  Unsupported platform `{}`, no memory leak check", other),
            );
            return ToolPrefix::none();
        }
    };

    if !exists(Path::new(path)) {
        log(
            run,
            LogLevel::Warn,
            format!("⚠️  {} not found, memory checking disabled", tool.label()),
        );
        return ToolPrefix::none();
    }

    log(run, LogLevel::Success, format!("{} found", tool.label()));
    ToolPrefix::for_tool(tool, path)
}

/* ============================================================
   Report interpretation
   ============================================================ */

impl MemTool {
    pub fn label(self) -> &'static str {
        match self {
            MemTool::Valgrind => "Valgrind",
            MemTool::Leaks => "Leaks",
        }
    }

    /// Returns a short fault description, or `None` when the run is clean.
    ///
    /// `expects_error` matters for valgrind: it forwards the program's
    /// own exit code, so a non-zero exit is only suspicious when the
    /// program was not supposed to reject its input.
    pub fn inspect(self, report: &ProcessResult, expects_error: bool) -> Option<String> {
        match self {
            MemTool::Valgrind => inspect_valgrind(report, expects_error),
            MemTool::Leaks => inspect_leaks(report),
        }
    }
}

fn inspect_valgrind(report: &ProcessResult, expects_error: bool) -> Option<String> {
    let text = &report.stderr_text;

    if let Some(errors) = error_count(text) {
        if errors > 0 {
            return Some(excerpt(text, "ERROR SUMMARY").unwrap_or_else(|| {
                format!("{} memory errors", errors)
            }));
        }
    }

    if !text.contains(VALGRIND_ALL_FREED) {
        return Some(
            excerpt(text, "definitely lost")
                .or_else(|| excerpt(text, "in use at exit"))
                .unwrap_or_else(|| "heap blocks not freed".to_string()),
        );
    }

    if !expects_error && !report.success() {
        return Some(format!("valgrind {}", report.status_label()));
    }

    None
}

fn inspect_leaks(report: &ProcessResult) -> Option<String> {
    if report.stdout.contains(LEAKS_CLEAN) {
        return None;
    }
    Some(excerpt(&report.stdout, "leaks for").unwrap_or_else(|| "leaks report not clean".into()))
}

fn error_summary_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"ERROR SUMMARY: ([\d,]+) errors").ok())
        .as_ref()
}

fn error_count(text: &str) -> Option<u64> {
    let caps = error_summary_re()?.captures_iter(text).last()?;
    caps.get(1)?.as_str().replace(',', "").parse().ok()
}

fn excerpt(text: &str, needle: &str) -> Option<String> {
    text.lines()
        .find(|l| l.contains(needle))
        .map(|l| strip_pid(l).trim().to_string())
}

/// `==1234== ERROR SUMMARY: ...` -> `ERROR SUMMARY: ...`
fn strip_pid(line: &str) -> &str {
    if let Some(rest) = line.strip_prefix("==") {
        if let Some(idx) = rest.find("== ") {
            return &rest[idx + 3..];
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_stderr(code: Option<i32>, stderr: &str) -> ProcessResult {
        ProcessResult::new(code, String::new(), stderr.to_string())
    }

    const CLEAN: &str = "==42== HEAP SUMMARY:\n\
        ==42==     in use at exit: 0 bytes in 0 blocks\n\
        ==42== All heap blocks were freed -- no leaks are possible\n\
        ==42== ERROR SUMMARY: 0 errors from 0 contexts (suppressed: 0 from 0)\n";

    const LEAKY: &str = "==42== HEAP SUMMARY:\n\
        ==42==     in use at exit: 24 bytes in 1 blocks\n\
        ==42==    definitely lost: 24 bytes in 1 blocks\n\
        ==42== ERROR SUMMARY: 1 errors from 1 contexts (suppressed: 0 from 0)\n";

    #[test]
    fn linux_with_valgrind_wraps_command() {
        let mut run = RunLog::silent();
        let prefix = resolve_for("linux", |_| true, &mut run);

        assert_eq!(prefix.tool(), Some(MemTool::Valgrind));
        let wrapped = prefix.wrap(&["./push_swap".to_string(), "1".to_string()]);
        assert_eq!(
            wrapped,
            vec!["/usr/bin/valgrind", "--leak-check=full", "./push_swap", "1"]
        );
        assert!(run.contains("Valgrind found"));
    }

    #[test]
    fn macos_uses_leaks_at_exit() {
        let mut run = RunLog::silent();
        let prefix = resolve_for("macos", |p| p == Path::new(LEAKS_PATH), &mut run);
        assert_eq!(prefix.tool(), Some(MemTool::Leaks));
        assert_eq!(prefix.tokens(), ["/usr/bin/leaks", "-atExit", "--"]);
    }

    #[test]
    fn missing_tool_degrades_to_empty_prefix() {
        let mut run = RunLog::silent();
        let prefix = resolve_for("linux", |_| false, &mut run);

        assert!(!prefix.is_enabled());
        assert!(prefix.tokens().is_empty());
        assert_eq!(run.count(LogLevel::Warn), 1);
        assert!(run.contains("memory checking disabled"));
    }

    #[test]
    fn unknown_platform_is_a_warning_not_an_error() {
        let mut run = RunLog::silent();
        let prefix = resolve_for("windows", |_| true, &mut run);
        assert_eq!(prefix, ToolPrefix::none());
        assert!(run.contains("Unsupported platform"));
    }

    #[test]
    fn clean_valgrind_report_passes() {
        assert_eq!(MemTool::Valgrind.inspect(&with_stderr(Some(0), CLEAN), false), None);
        // Program rejected the input on purpose.
        assert_eq!(MemTool::Valgrind.inspect(&with_stderr(Some(1), CLEAN), true), None);
    }

    #[test]
    fn valgrind_nonzero_exit_without_expected_error_is_a_fault() {
        let fault = MemTool::Valgrind.inspect(&with_stderr(Some(1), CLEAN), false);
        assert_eq!(fault.as_deref(), Some("valgrind exit 1"));
    }

    #[test]
    fn valgrind_error_summary_is_reported() {
        let fault = MemTool::Valgrind.inspect(&with_stderr(Some(0), LEAKY), true).unwrap();
        assert!(fault.starts_with("ERROR SUMMARY: 1 errors"));
    }

    #[test]
    fn error_count_takes_the_last_summary() {
        let text = "==1== ERROR SUMMARY: 0 errors from 0 contexts\n\
            ==1== ERROR SUMMARY: 1,024 errors from 3 contexts\n";
        assert_eq!(error_count(text), Some(1024));
        assert_eq!(error_count("no summary here"), None);
    }

    #[test]
    fn leaks_marker_decides_on_macos() {
        let clean = ProcessResult::new(
            Some(0),
            "Process 7: 0 leaks for 0 total leaked bytes.\n".into(),
            String::new(),
        );
        assert_eq!(MemTool::Leaks.inspect(&clean, false), None);

        let dirty = ProcessResult::new(
            Some(1),
            "Process 7: 2 leaks for 64 total leaked bytes.\n".into(),
            String::new(),
        );
        assert_eq!(
            MemTool::Leaks.inspect(&dirty, true).as_deref(),
            Some("Process 7: 2 leaks for 64 total leaked bytes.")
        );
    }
}

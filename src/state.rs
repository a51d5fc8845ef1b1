use std::fmt;
use std::time::Instant;

use serde::Serialize;

pub const MAX_LOGS: usize = 1000;

/// Marker the program under test prints on stderr for invalid input.
pub const ERROR_MARKER: &str = "Error";

/// Marker a checker prints on stdout when the claimed sort is wrong.
pub const KO_MARKER: &str = "KO";

/* ---------- logging ---------- */

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Success,
    Warn,
    Error,
}

#[derive(Clone, Debug)]
pub struct LogLine {
    pub level: LogLevel,
    pub text: String,
    pub at: Instant,
}

/* ---------- test cases ---------- */

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaseInput {
    /// One argv entry per number.
    Numbers(Vec<i32>),
    /// Split on whitespace, one argv entry per token.
    Raw(String),
    /// Passed verbatim as a single argv entry (`./push_swap "3 1 2"`).
    Quoted(String),
}

impl CaseInput {
    pub fn args(&self) -> Vec<String> {
        match self {
            CaseInput::Numbers(values) => values.iter().map(|v| v.to_string()).collect(),
            CaseInput::Raw(text) => text.split_whitespace().map(str::to_string).collect(),
            CaseInput::Quoted(text) => vec![text.clone()],
        }
    }
}

impl fmt::Display for CaseInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseInput::Numbers(values) if values.len() > 12 => {
                write!(f, "[{} values]", values.len())
            }
            CaseInput::Numbers(values) => {
                let joined: Vec<String> = values.iter().map(|v| v.to_string()).collect();
                write!(f, "{}", joined.join(" "))
            }
            CaseInput::Raw(text) => write!(f, "{}", text),
            CaseInput::Quoted(text) => write!(f, "\"{}\"", text),
        }
    }
}

#[derive(Clone, Debug)]
pub struct TestCase {
    pub name: String,
    pub input: CaseInput,
    pub expects_error: bool,
}

impl TestCase {
    pub fn standard(name: impl Into<String>, input: CaseInput) -> Self {
        Self {
            name: name.into(),
            input,
            expects_error: false,
        }
    }

    pub fn error(name: impl Into<String>, input: CaseInput, expects_error: bool) -> Self {
        Self {
            name: name.into(),
            input,
            expects_error,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuiteMode {
    Standard,
    Error,
}

/* ---------- process results ---------- */

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProcessResult {
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub signal: Option<i32>,
    pub stdout: String,
    pub stdout_lines: Vec<String>,
    pub stderr_text: String,
    pub timed_out: bool,
}

impl ProcessResult {
    pub fn new(exit_code: Option<i32>, stdout: String, stderr_text: String) -> Self {
        let stdout_lines = stdout.lines().map(str::to_string).collect();
        Self {
            exit_code,
            signal: None,
            stdout,
            stdout_lines,
            stderr_text,
            timed_out: false,
        }
    }

    /// Killed by something other than our own timeout.
    pub fn crashed(&self) -> bool {
        !self.timed_out && self.exit_code.is_none()
    }

    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn reports_error(&self) -> bool {
        self.stderr_text.contains(ERROR_MARKER)
    }

    pub fn status_label(&self) -> String {
        if self.timed_out {
            return "timed out".to_string();
        }
        match (self.exit_code, self.signal) {
            (Some(code), _) => format!("exit {}", code),
            (None, Some(sig)) => format!("signal {}", sig),
            (None, None) => "terminated".to_string(),
        }
    }
}

/* ---------- outcomes ---------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CaseOutcome {
    Passed { op_count: u64 },
    Failed { reason: String },
    Crashed,
    MemoryFault { detail: String },
    TimedOut,
}

impl CaseOutcome {
    pub fn passed(op_count: u64) -> Self {
        CaseOutcome::Passed { op_count }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        CaseOutcome::Failed {
            reason: reason.into(),
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, CaseOutcome::Passed { .. })
    }

    pub fn op_count(&self) -> Option<u64> {
        match self {
            CaseOutcome::Passed { op_count } => Some(*op_count),
            _ => None,
        }
    }
}

impl fmt::Display for CaseOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CaseOutcome::Passed { op_count } => write!(f, "passed ({} ops)", op_count),
            CaseOutcome::Failed { reason } => write!(f, "failed: {}", reason),
            CaseOutcome::Crashed => write!(f, "crashed"),
            CaseOutcome::MemoryFault { detail } => write!(f, "memory fault: {}", detail),
            CaseOutcome::TimedOut => write!(f, "timed out"),
        }
    }
}

//! testgen/classify.rs
//!
//! Turns raw process results into a `CaseOutcome`.
//!
//! Responsibilities:
//! - Decide crash / timeout / validator rejection for sort cases
//! - Compare the stderr error marker against the case expectation
//! - Apply memory checker verdicts on top of a passing result
//!
//! Non-responsibilities:
//! - Running processes (see `runner.rs`)
//! - Knowing which platform we are on

use crate::executor::memtool::MemTool;
use crate::executor::validator::rejected;
use crate::state::{CaseOutcome, ProcessResult, SuiteMode, TestCase};

/// Everything observed while running one case.
#[derive(Debug, Clone, Copy)]
pub struct Evidence<'a> {
    pub primary: &'a ProcessResult,
    pub checker: Option<&'a ProcessResult>,
    pub bonus: Option<&'a ProcessResult>,
    pub memory: Option<(MemTool, &'a ProcessResult)>,
}

impl<'a> Evidence<'a> {
    pub fn primary(primary: &'a ProcessResult) -> Self {
        Self {
            primary,
            checker: None,
            bonus: None,
            memory: None,
        }
    }
}

pub fn classify(mode: SuiteMode, case: &TestCase, ev: &Evidence<'_>) -> CaseOutcome {
    match mode {
        SuiteMode::Standard => classify_standard(ev),
        SuiteMode::Error => classify_error(case, ev),
    }
}

/* ============================================================
   Sort cases
   ============================================================ */

fn classify_standard(ev: &Evidence<'_>) -> CaseOutcome {
    let primary = ev.primary;

    if primary.timed_out {
        return CaseOutcome::TimedOut;
    }
    if primary.crashed() {
        return CaseOutcome::Crashed;
    }

    let op_count = primary.stdout_lines.len() as u64;

    if let Some(checker) = ev.checker {
        if let Some(outcome) = verdict(checker, "validator") {
            return outcome;
        }
    }
    if let Some(bonus) = ev.bonus {
        if let Some(outcome) = verdict(bonus, "bonus validator") {
            return outcome;
        }
    }

    CaseOutcome::passed(op_count)
}

/// A checker that never finished has not accepted anything.
fn verdict(checker: &ProcessResult, label: &str) -> Option<CaseOutcome> {
    if checker.timed_out {
        return Some(CaseOutcome::TimedOut);
    }
    if checker.crashed() {
        return Some(CaseOutcome::failed(format!("{} did not complete", label)));
    }
    if rejected(checker) {
        return Some(CaseOutcome::failed(format!("{} rejected output", label)));
    }
    None
}

/* ============================================================
   Error-handling cases
   ============================================================ */

fn classify_error(case: &TestCase, ev: &Evidence<'_>) -> CaseOutcome {
    let primary = ev.primary;

    if primary.timed_out {
        return CaseOutcome::TimedOut;
    }
    if primary.reports_error() != case.expects_error {
        return CaseOutcome::failed("error expectation mismatch");
    }
    // Printing "Error" and then dying on a signal is still a crash.
    if primary.crashed() {
        return CaseOutcome::Crashed;
    }
    if let Some(bonus) = ev.bonus {
        if bonus.timed_out {
            return CaseOutcome::TimedOut;
        }
        if bonus.crashed() {
            return CaseOutcome::failed("checker did not complete");
        }
        if bonus.reports_error() != case.expects_error {
            return CaseOutcome::failed("checker error expectation mismatch");
        }
    }

    if let Some((tool, report)) = ev.memory {
        if report.timed_out {
            return CaseOutcome::TimedOut;
        }
        if let Some(detail) = tool.inspect(report, case.expects_error) {
            return CaseOutcome::MemoryFault { detail };
        }
    }

    CaseOutcome::passed(0)
}

// Executes suites of push_swap cases and folds the results.
// Processes are launched through `Invoke`; judging happens in classify.rs.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::error::HarnessResult;
use crate::executor::{Invoke, ToolPrefix, Validator};
use crate::logger::{log, log_header, RunLog};
use crate::state::{CaseOutcome, LogLevel, ProcessResult, SuiteMode, TestCase};
use crate::testgen::classify::{classify, Evidence};
use crate::testgen::stats::SuiteStats;

/// Resolved executables, after discovery.
#[derive(Debug, Clone, Serialize)]
pub struct Binaries {
    pub push_swap: String,
    pub checker: String,
    pub bonus_checker: Option<String>,
}

#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub case_timeout: Option<Duration>,
    pub memory_timeout: Duration,
    pub jobs: usize,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            case_timeout: None,
            memory_timeout: Duration::from_secs(30),
            jobs: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub passed: usize,
    pub failed: usize,
    pub crashed: usize,
    pub memory_faults: usize,
    pub timed_out: usize,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: &CaseOutcome) {
        match outcome {
            CaseOutcome::Passed { .. } => self.passed += 1,
            CaseOutcome::Failed { .. } => self.failed += 1,
            CaseOutcome::Crashed => self.crashed += 1,
            CaseOutcome::MemoryFault { .. } => self.memory_faults += 1,
            CaseOutcome::TimedOut => self.timed_out += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CaseFailure {
    pub name: String,
    pub input: String,
    pub outcome: CaseOutcome,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuiteResult {
    pub name: String,
    pub mode: SuiteMode,
    pub verdict: bool,
    pub total: usize,
    pub executed: usize,
    pub counts: OutcomeCounts,
    pub stats: SuiteStats,
    pub failures: Vec<CaseFailure>,
}

pub struct SuiteRunner<'a> {
    invoker: &'a dyn Invoke,
    binaries: &'a Binaries,
    memory: &'a ToolPrefix,
    settings: RunSettings,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(
        invoker: &'a dyn Invoke,
        binaries: &'a Binaries,
        memory: &'a ToolPrefix,
        settings: RunSettings,
    ) -> Self {
        Self {
            invoker,
            binaries,
            memory,
            settings,
        }
    }

    //
    // -------- Suite --------
    //

    pub fn run_suite(
        &self,
        name: &str,
        cases: &[TestCase],
        mode: SuiteMode,
        run: &mut RunLog,
    ) -> HarnessResult<SuiteResult> {
        log_header(run, format!("Running {} tests...", name));

        let mut result = SuiteResult {
            name: name.to_string(),
            mode,
            verdict: true,
            total: cases.len(),
            executed: 0,
            counts: OutcomeCounts::default(),
            stats: SuiteStats::default(),
            failures: Vec::new(),
        };

        match mode {
            SuiteMode::Error => self.run_error_suite(cases, &mut result, run)?,
            SuiteMode::Standard => self.run_standard_suite(cases, &mut result, run)?,
        }

        Ok(result)
    }

    /// All-or-nothing: the first violation stops the suite.
    fn run_error_suite(
        &self,
        cases: &[TestCase],
        result: &mut SuiteResult,
        run: &mut RunLog,
    ) -> HarnessResult<()> {
        for case in cases {
            let outcome = self.run_case(case, SuiteMode::Error)?;
            result.executed += 1;
            result.counts.record(&outcome);

            if !outcome.is_pass() {
                log(
                    run,
                    LogLevel::Error,
                    format!("❌ Error test failed: {} - {} ({})", case.name, case.input, outcome),
                );
                result.failures.push(failure(case, outcome));
                result.verdict = false;
                return Ok(());
            }
        }

        log(run, LogLevel::Success, "✅ All error-handling tests passed");
        Ok(())
    }

    /// Failures are reported and left out of the statistics; the suite
    /// itself always runs to completion.
    fn run_standard_suite(
        &self,
        cases: &[TestCase],
        result: &mut SuiteResult,
        run: &mut RunLog,
    ) -> HarnessResult<()> {
        let outcomes = if self.settings.jobs > 1 && cases.len() > 1 {
            self.run_parallel(cases)?
        } else {
            cases
                .iter()
                .map(|case| self.run_case(case, SuiteMode::Standard))
                .collect::<HarnessResult<Vec<_>>>()?
        };

        for (case, outcome) in cases.iter().zip(outcomes) {
            result.executed += 1;
            result.counts.record(&outcome);

            if let Some(op_count) = outcome.op_count() {
                result.stats = result.stats.accumulate(op_count);
                continue;
            }
            match &outcome {
                CaseOutcome::Crashed => {
                    log(run, LogLevel::Warn, format!("⚠️  Crash on: {}", case.input));
                }
                CaseOutcome::TimedOut => {
                    log(run, LogLevel::Warn, format!("⚠️  Timed out on: {}", case.input));
                }
                other => {
                    log(run, LogLevel::Error, format!("❌ {} on: {}", other, case.input));
                }
            }
            log(run, LogLevel::Error, format!("❌ Test failed: {}", case.name));
            result.failures.push(failure(case, outcome));
        }

        let summary = result.stats.finalize();
        match (summary.low, summary.high) {
            (Some(low), Some(high)) => log(
                run,
                LogLevel::Info,
                format!("LOW: {} HIGH: {} AVG: {:.2}", low, high, summary.mean),
            ),
            _ => log(
                run,
                LogLevel::Error,
                "⚠️  No successful tests to calculate statistics",
            ),
        }
        log(run, LogLevel::Success, format!("✅ \"{}\" passed", result.name));
        Ok(())
    }

    /// Workers pull case indices off a channel; results are put back into
    /// fixture order before anything is logged or folded. The first fatal
    /// error stops every worker from picking up further cases.
    fn run_parallel(&self, cases: &[TestCase]) -> HarnessResult<Vec<CaseOutcome>> {
        let (job_tx, job_rx) = crossbeam_channel::unbounded::<usize>();
        let (done_tx, done_rx) = crossbeam_channel::unbounded();

        for idx in 0..cases.len() {
            let _ = job_tx.send(idx);
        }
        drop(job_tx);

        let workers = self.settings.jobs.min(cases.len());
        let aborted = AtomicBool::new(false);
        thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let done_tx = done_tx.clone();
                let aborted = &aborted;
                scope.spawn(move || {
                    for idx in job_rx.iter() {
                        if aborted.load(Ordering::Acquire) {
                            break;
                        }
                        let outcome = self.run_case(&cases[idx], SuiteMode::Standard);
                        if outcome.is_err() {
                            aborted.store(true, Ordering::Release);
                        }
                        if done_tx.send((idx, outcome)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(done_tx);

        let mut slots: Vec<Option<HarnessResult<CaseOutcome>>> =
            (0..cases.len()).map(|_| None).collect();
        for (idx, outcome) in done_rx.iter() {
            slots[idx] = Some(outcome);
        }

        slots
            .into_iter()
            .map(|slot| slot.unwrap_or(Ok(CaseOutcome::Crashed)))
            .collect()
    }

    //
    // -------- Single case --------
    //

    pub fn run_case(&self, case: &TestCase, mode: SuiteMode) -> HarnessResult<CaseOutcome> {
        match mode {
            SuiteMode::Standard => self.run_sort_case(case),
            SuiteMode::Error => self.run_error_case(case),
        }
    }

    fn run_sort_case(&self, case: &TestCase) -> HarnessResult<CaseOutcome> {
        let args = case.input.args();
        let primary = self.launch(&args)?;

        if primary.timed_out || primary.crashed() {
            return Ok(classify(
                SuiteMode::Standard,
                case,
                &Evidence::primary(&primary),
            ));
        }

        let ops = ops_input(&primary);
        let checker = self.validator(&self.binaries.checker).validate(&args, &ops)?;

        let mut ev = Evidence {
            checker: Some(&checker),
            ..Evidence::primary(&primary)
        };
        let outcome = classify(SuiteMode::Standard, case, &ev);
        if !outcome.is_pass() {
            return Ok(outcome);
        }

        let Some(bonus_path) = &self.binaries.bonus_checker else {
            return Ok(outcome);
        };
        let bonus = self.validator(bonus_path).validate(&args, &ops)?;
        ev.bonus = Some(&bonus);
        Ok(classify(SuiteMode::Standard, case, &ev))
    }

    fn run_error_case(&self, case: &TestCase) -> HarnessResult<CaseOutcome> {
        let args = case.input.args();
        let primary = self.launch(&args)?;

        let mut ev = Evidence::primary(&primary);
        let outcome = classify(SuiteMode::Error, case, &ev);
        if !outcome.is_pass() {
            return Ok(outcome);
        }

        let bonus = match &self.binaries.bonus_checker {
            Some(path) => Some(self.validator(path).validate(&args, &primary.stdout)?),
            None => None,
        };
        ev.bonus = bonus.as_ref();
        let outcome = classify(SuiteMode::Error, case, &ev);
        if !outcome.is_pass() {
            return Ok(outcome);
        }

        // Memory results only ever override a functional pass.
        let Some(tool) = self.memory.tool() else {
            return Ok(outcome);
        };
        let wrapped = self.memory.wrap(&self.command(&args));
        let report = self
            .invoker
            .invoke(&wrapped, None, Some(self.settings.memory_timeout))?;
        ev.memory = Some((tool, &report));
        Ok(classify(SuiteMode::Error, case, &ev))
    }

    fn launch(&self, args: &[String]) -> HarnessResult<ProcessResult> {
        self.invoker
            .invoke(&self.command(args), None, self.settings.case_timeout)
    }

    fn command(&self, args: &[String]) -> Vec<String> {
        let mut cmd = Vec::with_capacity(args.len() + 1);
        cmd.push(self.binaries.push_swap.clone());
        cmd.extend_from_slice(args);
        cmd
    }

    fn validator(&self, executable: &str) -> Validator<'a> {
        Validator::new(self.invoker, executable).with_timeout(self.settings.case_timeout)
    }
}

/// The program's operations, one per line, as the checker expects them.
fn ops_input(primary: &ProcessResult) -> String {
    let mut ops = String::with_capacity(primary.stdout.len() + 1);
    for line in &primary.stdout_lines {
        ops.push_str(line);
        ops.push('\n');
    }
    ops
}

fn failure(case: &TestCase, outcome: CaseOutcome) -> CaseFailure {
    CaseFailure {
        name: case.name.clone(),
        input: case.input.to_string(),
        outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HarnessError;
    use crate::executor::MemTool;
    use crate::state::CaseInput;
    use std::io;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;

    /// Stands in for real processes: replies are chosen from the command.
    struct Scripted<F> {
        reply: F,
        calls: Mutex<Vec<Vec<String>>>,
    }

    impl<F> Scripted<F>
    where
        F: Fn(&[String], Option<&str>) -> ProcessResult + Send + Sync,
    {
        fn new(reply: F) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<Vec<String>> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl<F> Invoke for Scripted<F>
    where
        F: Fn(&[String], Option<&str>) -> ProcessResult + Send + Sync,
    {
        fn invoke(
            &self,
            command: &[String],
            stdin: Option<&str>,
            _timeout: Option<Duration>,
        ) -> HarnessResult<ProcessResult> {
            self.calls.lock().unwrap().push(command.to_vec());
            Ok((self.reply)(command, stdin))
        }
    }

    fn ok(stdout: &str) -> ProcessResult {
        ProcessResult::new(Some(0), stdout.to_string(), String::new())
    }

    fn bins(bonus: bool) -> Binaries {
        Binaries {
            push_swap: "./push_swap".into(),
            checker: "./checker_linux".into(),
            bonus_checker: bonus.then(|| "./checker".to_string()),
        }
    }

    fn raw(name: &str, input: &str) -> TestCase {
        TestCase::standard(name, CaseInput::Raw(input.into()))
    }

    #[test]
    fn sorted_case_passes_with_op_count() {
        let inv = Scripted::new(|cmd: &[String], stdin: Option<&str>| match cmd[0].as_str() {
            "./push_swap" => ok("sa\nrra\n"),
            _ => {
                assert_eq!(stdin, Some("sa\nrra\n"));
                ok("OK\n")
            }
        });
        let b = bins(false);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let outcome = runner
            .run_case(&raw("three", "3 1 2"), SuiteMode::Standard)
            .unwrap();

        assert_eq!(outcome, CaseOutcome::passed(2));
        assert_eq!(
            inv.calls()[1],
            vec!["./checker_linux", "3", "1", "2"]
        );
    }

    #[test]
    fn checker_ko_fails_and_skips_bonus() {
        let inv = Scripted::new(|cmd: &[String], _: Option<&str>| match cmd[0].as_str() {
            "./push_swap" => ok("sa\nrra\n"),
            _ => ok("KO\n"),
        });
        let b = bins(true);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let outcome = runner
            .run_case(&raw("three", "3 1 2"), SuiteMode::Standard)
            .unwrap();

        assert_eq!(outcome, CaseOutcome::failed("validator rejected output"));
        assert_eq!(inv.calls().len(), 2);
    }

    #[test]
    fn bonus_checker_runs_after_main_checker() {
        let inv = Scripted::new(|cmd: &[String], _: Option<&str>| match cmd[0].as_str() {
            "./push_swap" => ok("pb\npa\n"),
            "./checker_linux" => ok("OK\n"),
            _ => ok("KO\n"),
        });
        let b = bins(true);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let outcome = runner
            .run_case(&raw("two", "2 1"), SuiteMode::Standard)
            .unwrap();

        assert_eq!(outcome, CaseOutcome::failed("bonus validator rejected output"));
        assert_eq!(inv.calls()[2][0], "./checker");
    }

    fn checker_replies(checker: ProcessResult) -> impl Fn(&[String], Option<&str>) -> ProcessResult + Send + Sync {
        move |cmd: &[String], _: Option<&str>| match cmd[0].as_str() {
            "./push_swap" => ok("sa\n"),
            _ => checker.clone(),
        }
    }

    #[test]
    fn hung_checker_is_a_timeout() {
        let mut hung = ProcessResult::new(None, String::new(), String::new());
        hung.timed_out = true;
        let inv = Scripted::new(checker_replies(hung));
        let b = bins(false);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let mut run = RunLog::silent();
        let result = runner
            .run_suite("Edge Cases", &[raw("two", "2 1")], SuiteMode::Standard, &mut run)
            .unwrap();

        assert_eq!(result.counts.timed_out, 1);
        assert_eq!(result.stats.count, 0);
        assert_eq!(result.failures[0].outcome, CaseOutcome::TimedOut);
    }

    #[test]
    fn crashed_checker_fails_the_case() {
        let mut segv = ProcessResult::new(None, String::new(), String::new());
        segv.signal = Some(11);
        let inv = Scripted::new(checker_replies(segv));
        let b = bins(true);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let outcome = runner.run_case(&raw("two", "2 1"), SuiteMode::Standard).unwrap();

        assert_eq!(outcome, CaseOutcome::failed("validator did not complete"));
        // The bonus checker is never consulted after the main one gave no verdict.
        assert_eq!(inv.calls().len(), 2);
    }

    #[test]
    fn hung_bonus_checker_in_error_case_is_a_timeout() {
        let inv = Scripted::new(|cmd: &[String], _: Option<&str>| match cmd[0].as_str() {
            "./push_swap" => ProcessResult::new(Some(1), String::new(), "Error\n".into()),
            _ => {
                let mut hung = ProcessResult::new(None, String::new(), String::new());
                hung.timed_out = true;
                hung
            }
        });
        let b = bins(true);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());
        let case = TestCase::error("letters", CaseInput::Raw("abc".into()), true);

        assert_eq!(
            runner.run_case(&case, SuiteMode::Error).unwrap(),
            CaseOutcome::TimedOut
        );
    }

    #[test]
    fn crash_skips_the_checker() {
        let inv = Scripted::new(|_: &[String], _: Option<&str>| {
            ProcessResult::new(None, String::new(), String::new())
        });
        let b = bins(false);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let outcome = runner.run_case(&raw("x", "2 1"), SuiteMode::Standard).unwrap();
        assert_eq!(outcome, CaseOutcome::Crashed);
        assert_eq!(inv.calls().len(), 1);
    }

    #[test]
    fn error_suite_stops_at_first_failure() {
        let inv = Scripted::new(|cmd: &[String], _: Option<&str>| {
            // Case B ("b") never prints Error although it should.
            if cmd.get(1).map(String::as_str) == Some("b") {
                ProcessResult::new(Some(0), String::new(), String::new())
            } else {
                ProcessResult::new(Some(1), String::new(), "Error\n".into())
            }
        });
        let b = bins(false);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());
        let cases = vec![
            TestCase::error("A", CaseInput::Raw("a".into()), true),
            TestCase::error("B", CaseInput::Raw("b".into()), true),
            TestCase::error("C", CaseInput::Raw("c".into()), true),
        ];

        let mut run = RunLog::silent();
        let result = runner
            .run_suite("Error Handling", &cases, SuiteMode::Error, &mut run)
            .unwrap();

        assert!(!result.verdict);
        assert_eq!(result.executed, 2);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "B");
        assert!(inv.calls().iter().all(|c| c.get(1).map(String::as_str) != Some("c")));
        assert!(run.contains("Error test failed: B"));
    }

    #[test]
    fn error_suite_runs_memory_check_through_prefix() {
        let inv = Scripted::new(|cmd: &[String], _: Option<&str>| {
            if cmd[0] == "/usr/bin/valgrind" {
                ProcessResult::new(
                    Some(1),
                    String::new(),
                    "==1== in use at exit: 16 bytes in 1 blocks\n\
                     ==1== ERROR SUMMARY: 0 errors from 0 contexts\n"
                        .into(),
                )
            } else {
                ProcessResult::new(Some(1), String::new(), "Error\n".into())
            }
        });
        let b = bins(false);
        let mem = ToolPrefix::for_tool(MemTool::Valgrind, "/usr/bin/valgrind");
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());
        let case = TestCase::error("dup", CaseInput::Raw("1 1".into()), true);

        let outcome = runner.run_case(&case, SuiteMode::Error).unwrap();

        assert_eq!(
            outcome,
            CaseOutcome::MemoryFault {
                detail: "in use at exit: 16 bytes in 1 blocks".into()
            }
        );
        assert_eq!(
            inv.calls()[1],
            vec!["/usr/bin/valgrind", "--leak-check=full", "./push_swap", "1", "1"]
        );
    }

    #[test]
    fn functional_failure_skips_memory_check() {
        let inv = Scripted::new(|_: &[String], _: Option<&str>| ok(""));
        let b = bins(false);
        let mem = ToolPrefix::for_tool(MemTool::Valgrind, "/usr/bin/valgrind");
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());
        let case = TestCase::error("dup", CaseInput::Raw("1 1".into()), true);

        let outcome = runner.run_case(&case, SuiteMode::Error).unwrap();

        assert_eq!(outcome, CaseOutcome::failed("error expectation mismatch"));
        assert_eq!(inv.calls().len(), 1);
    }

    fn five_with_one_crash() -> (Vec<TestCase>, impl Fn(&[String], Option<&str>) -> ProcessResult + Send + Sync) {
        let cases = vec![
            raw("one", "1"),
            raw("two", "2 1"),
            raw("crash", "9 9 9"),
            raw("four", "4 3 2 1"),
            raw("five", "5 4 3 2 1"),
        ];
        let reply = |cmd: &[String], _: Option<&str>| {
            if cmd[0] != "./push_swap" {
                return ok("OK\n");
            }
            if cmd.len() == 4 && cmd[1] == "9" {
                return ProcessResult::new(None, String::new(), String::new());
            }
            // One op per argument keeps the numbers easy to check.
            ok(&"ra\n".repeat(cmd.len() - 1))
        };
        (cases, reply)
    }

    #[test]
    fn standard_suite_excludes_crash_from_stats() {
        let (cases, reply) = five_with_one_crash();
        let inv = Scripted::new(reply);
        let b = bins(false);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let mut run = RunLog::silent();
        let result = runner
            .run_suite("Edge Cases", &cases, SuiteMode::Standard, &mut run)
            .unwrap();

        assert!(result.verdict);
        assert_eq!(result.executed, 5);
        assert_eq!(result.counts.crashed, 1);
        assert_eq!(result.stats.count, 4);
        assert_eq!(result.stats.total, 1 + 2 + 4 + 5);
        assert_eq!(result.stats.low, Some(1));
        assert_eq!(result.stats.high, Some(5));
        assert!(run.contains("Crash on: 9 9 9"));
        assert!(run.contains("LOW: 1 HIGH: 5 AVG: 3.00"));
    }

    #[test]
    fn parallel_run_matches_sequential() {
        let (cases, reply) = five_with_one_crash();
        let inv = Scripted::new(reply);
        let b = bins(false);
        let mem = ToolPrefix::none();
        let settings = RunSettings {
            jobs: 3,
            ..RunSettings::default()
        };
        let runner = SuiteRunner::new(&inv, &b, &mem, settings);

        let mut run = RunLog::silent();
        let result = runner
            .run_suite("Edge Cases", &cases, SuiteMode::Standard, &mut run)
            .unwrap();

        assert_eq!(result.stats.count, 4);
        assert_eq!(result.stats.total, 12);
        assert_eq!(result.failures.len(), 1);
        assert_eq!(result.failures[0].name, "crash");
    }

    /// Every launch fails as if the binary vanished mid-run.
    struct Vanished {
        calls: AtomicUsize,
    }

    impl Invoke for Vanished {
        fn invoke(
            &self,
            command: &[String],
            _stdin: Option<&str>,
            _timeout: Option<Duration>,
        ) -> HarnessResult<ProcessResult> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(HarnessError::Spawn {
                program: command[0].clone(),
                source: io::Error::from(io::ErrorKind::NotFound),
            })
        }
    }

    #[test]
    fn fatal_error_stops_parallel_workers() {
        let inv = Vanished {
            calls: AtomicUsize::new(0),
        };
        let b = bins(false);
        let mem = ToolPrefix::none();
        let settings = RunSettings {
            jobs: 2,
            ..RunSettings::default()
        };
        let runner = SuiteRunner::new(&inv, &b, &mem, settings);
        let cases: Vec<TestCase> = (0..20).map(|i| raw(&format!("c{}", i), "2 1")).collect();

        let mut run = RunLog::silent();
        let err = runner
            .run_suite("Benchmarks: 5", &cases, SuiteMode::Standard, &mut run)
            .unwrap_err();

        assert!(matches!(err, HarnessError::Spawn { .. }));
        assert!(inv.calls.load(Ordering::SeqCst) <= 2);
    }

    #[test]
    fn empty_standard_suite_reports_no_stats() {
        let inv = Scripted::new(|_: &[String], _: Option<&str>| ok(""));
        let b = bins(false);
        let mem = ToolPrefix::none();
        let runner = SuiteRunner::new(&inv, &b, &mem, RunSettings::default());

        let mut run = RunLog::silent();
        let result = runner
            .run_suite("Nothing", &[], SuiteMode::Standard, &mut run)
            .unwrap();

        assert!(result.verdict);
        assert_eq!(result.stats.finalize().mean, 0.0);
        assert!(run.contains("No successful tests"));
    }
}

//src/executor/run.rs
//
// Launches one child process, feeds its stdin, captures both output
// streams and enforces a wall-clock bound. No interpretation here.

use std::io::{Read, Write};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::Receiver;

use crate::error::{HarnessError, HarnessResult};
use crate::state::ProcessResult;

const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// How long to keep reading after a timeout kill. Anything the killed
/// child spawned may still hold the pipes open.
const DRAIN_GRACE: Duration = Duration::from_millis(500);

pub trait Invoke: Send + Sync {
    fn invoke(
        &self,
        command: &[String],
        stdin: Option<&str>,
        timeout: Option<Duration>,
    ) -> HarnessResult<ProcessResult>;
}

#[derive(Debug, Clone)]
pub struct ProcessInvoker {
    poll: Duration,
}

impl ProcessInvoker {
    pub fn new() -> Self {
        Self {
            poll: POLL_INTERVAL,
        }
    }
}

impl Default for ProcessInvoker {
    fn default() -> Self {
        Self::new()
    }
}

impl Invoke for ProcessInvoker {
    fn invoke(
        &self,
        command: &[String],
        stdin: Option<&str>,
        timeout: Option<Duration>,
    ) -> HarnessResult<ProcessResult> {
        let (program, args) = command.split_first().ok_or(HarnessError::EmptyCommand)?;

        let mut child = Command::new(program)
            .args(args)
            .stdin(if stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| HarnessError::Spawn {
                program: program.clone(),
                source,
            })?;

        // Detached: the thread ends once the pipe closes. A child that exits
        // without reading closes it on us; that's fine.
        if let (Some(mut pipe), Some(input)) = (child.stdin.take(), stdin) {
            let input = input.to_owned();
            thread::spawn(move || {
                let _ = pipe.write_all(input.as_bytes());
            });
        }
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let (status, timed_out) = wait_bounded(&mut child, timeout, self.poll).map_err(|source| {
            HarnessError::Io {
                program: program.clone(),
                source,
            }
        })?;

        let deadline = timed_out.then(|| Instant::now() + DRAIN_GRACE);
        let stdout = collect(stdout, deadline);
        let stderr = collect(stderr, deadline);

        let mut result = ProcessResult::new(status.and_then(|s| s.code()), stdout, stderr);
        result.signal = status.and_then(signal_of);
        result.timed_out = timed_out;
        Ok(result)
    }
}

/// Polls the child until it exits or `timeout` elapses. The child is
/// always reaped before returning, including on error.
fn wait_bounded(
    child: &mut Child,
    timeout: Option<Duration>,
    poll: Duration,
) -> std::io::Result<(Option<ExitStatus>, bool)> {
    let started = Instant::now();

    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok((Some(status), false)),
            Ok(None) => {}
            Err(e) => {
                reap(child);
                return Err(e);
            }
        }

        if let Some(limit) = timeout {
            if started.elapsed() >= limit {
                let _ = child.kill();
                return Ok((child.wait().ok(), true));
            }
        }

        thread::sleep(poll);
    }
}

fn reap(child: &mut Child) {
    let _ = child.kill();
    let _ = child.wait();
}

fn drain<R: Read + Send + 'static>(mut pipe: R) -> Receiver<Vec<u8>> {
    let (tx, rx) = crossbeam_channel::bounded(1);
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        let _ = tx.send(buf);
    });
    rx
}

/// Waits for a reader to hit EOF, or until `deadline` when the child was
/// killed. A reader that is still blocked is left behind.
fn collect(reader: Option<Receiver<Vec<u8>>>, deadline: Option<Instant>) -> String {
    let bytes = match (reader, deadline) {
        (None, _) => None,
        (Some(rx), None) => rx.recv().ok(),
        (Some(rx), Some(at)) => rx.recv_deadline(at).ok(),
    };
    bytes
        .map(|b| String::from_utf8_lossy(&b).into_owned())
        .unwrap_or_default()
}

#[cfg(unix)]
fn signal_of(status: ExitStatus) -> Option<i32> {
    use std::os::unix::process::ExitStatusExt;
    status.signal()
}

#[cfg(not(unix))]
fn signal_of(_status: ExitStatus) -> Option<i32> {
    None
}

// Checker process wrapper.
//
// A checker receives the original arguments on its command line and the
// claimed operation list on stdin. "KO" on stdout means the sort is wrong.

use std::time::Duration;

use crate::error::HarnessResult;
use crate::executor::run::Invoke;
use crate::state::{ProcessResult, KO_MARKER};

pub struct Validator<'a> {
    invoker: &'a dyn Invoke,
    executable: String,
    timeout: Option<Duration>,
}

impl<'a> Validator<'a> {
    pub fn new(invoker: &'a dyn Invoke, executable: impl Into<String>) -> Self {
        Self {
            invoker,
            executable: executable.into(),
            timeout: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn validate(&self, args: &[String], input: &str) -> HarnessResult<ProcessResult> {
        let mut command = Vec::with_capacity(args.len() + 1);
        command.push(self.executable.clone());
        command.extend_from_slice(args);
        self.invoker.invoke(&command, Some(input), self.timeout)
    }
}

pub fn rejected(result: &ProcessResult) -> bool {
    result.stdout.contains(KO_MARKER)
}

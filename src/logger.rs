use std::collections::VecDeque;
use std::time::Instant;

use crossterm::style::{style, Attribute, Color, Stylize};

use crate::state::{LogLevel, LogLine, MAX_LOGS};

/// Bounded run log. Every line is kept for the report and, unless
/// silenced, echoed to the terminal as it happens.
pub struct RunLog {
    pub lines: VecDeque<LogLine>,
    echo: bool,
}

impl RunLog {
    pub fn new(echo: bool) -> Self {
        Self {
            lines: VecDeque::new(),
            echo,
        }
    }

    pub fn silent() -> Self {
        Self::new(false)
    }

    #[cfg(test)]
    pub fn count(&self, level: LogLevel) -> usize {
        self.lines.iter().filter(|l| l.level == level).count()
    }

    #[cfg(test)]
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }
}

pub fn log(run: &mut RunLog, level: LogLevel, msg: impl Into<String>) {
    if run.lines.len() >= MAX_LOGS {
        run.lines.pop_front();
    }

    let text = msg.into();
    if run.echo {
        println!("{}", paint(level, &text));
    }

    run.lines.push_back(LogLine {
        level,
        text,
        at: Instant::now(),
    });
}

/// Section banner, e.g. "Running Edge Cases tests...".
pub fn log_header(run: &mut RunLog, msg: impl Into<String>) {
    let text = msg.into();
    if run.echo {
        println!("{}", style(&text).with(Color::Magenta).attribute(Attribute::Bold));
    }
    let echo = run.echo;
    run.echo = false;
    log(run, LogLevel::Info, text);
    run.echo = echo;
}

fn paint(level: LogLevel, text: &str) -> String {
    match level {
        LogLevel::Info => text.to_string(),
        LogLevel::Success => style(text).with(Color::Green).to_string(),
        LogLevel::Warn => style(text).with(Color::Yellow).to_string(),
        LogLevel::Error => style(text).with(Color::Red).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_is_bounded() {
        let mut run = RunLog::silent();
        for i in 0..(MAX_LOGS + 5) {
            log(&mut run, LogLevel::Info, format!("line {}", i));
        }
        assert_eq!(run.lines.len(), MAX_LOGS);
        assert_eq!(run.lines.front().map(|l| l.text.as_str()), Some("line 5"));
    }

    #[test]
    fn header_is_recorded_once() {
        let mut run = RunLog::silent();
        log_header(&mut run, "Running Edge Cases tests...");
        assert_eq!(run.lines.len(), 1);
        assert_eq!(run.count(LogLevel::Info), 1);
    }
}

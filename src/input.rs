//! Validated integer reader.
//!
//! Reads text from an untrusted source until it converts to an integer. What
//! happens after a bad line is chosen by [`RetryPolicy`]:
//!
//! ```text
//!                 parse ok
//! AwaitingInput ───────────> Done(value)
//!   │    ^
//!   │    │ parse failed (Reprompt, Silent)
//!   │    └────┘
//!   │
//!   └──────────────────────> Terminated
//!      parse failed (Terminate)
//! ```
//!
//! The reader is generic over `BufRead` and `Write`, so the binary hands it
//! stdin/stdout while tests hand it a `Cursor` and a `Vec<u8>`.

use crate::error::{DrillError, Result};
use serde::{Deserialize, Serialize};
use std::io::{BufRead, Write};

/// What the reader does after a line that is not an integer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RetryPolicy {
    /// Print the diagnostic and ask again.
    #[default]
    Reprompt,
    /// Ask again without printing anything.
    Silent,
    /// Print the diagnostic and stop.
    Terminate,
}

/// State of a [`IntReader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReaderState {
    AwaitingInput,
    Done(i64),
    Terminated,
}

/// Converts `text` to an integer.
///
/// Surrounding whitespace is ignored, an optional `+` or `-` sign is allowed,
/// and single underscores may separate digits (`1_000`). `var` only names the
/// value in the resulting error.
pub fn parse_int(var: &str, text: &str) -> Result<i64> {
    let trimmed = text.trim();
    let not_a_number = || DrillError::NotANumber {
        var: var.to_owned(),
        text: trimmed.to_owned(),
    };

    let (sign, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => ("-", &trimmed[1..]),
        Some(b'+') => ("", &trimmed[1..]),
        _ => ("", trimmed),
    };

    let bytes = digits.as_bytes();
    let well_formed = matches!(bytes.first(), Some(b) if b.is_ascii_digit())
        && matches!(bytes.last(), Some(b) if b.is_ascii_digit())
        && bytes.iter().all(|b| b.is_ascii_digit() || *b == b'_')
        && !digits.contains("__");
    if !well_formed {
        return Err(not_a_number());
    }

    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    // Out of range for i64 is treated the same as any other unparseable text.
    format!("{sign}{cleaned}")
        .parse::<i64>()
        .map_err(|_| not_a_number())
}

/// Prompts on `sink` and reads lines from `source` until one is an integer.
pub struct IntReader<R, W> {
    source: R,
    sink: W,
    var: String,
    policy: RetryPolicy,
    state: ReaderState,
}

impl<R: BufRead, W: Write> IntReader<R, W> {
    pub fn new(source: R, sink: W) -> Self {
        Self {
            source,
            sink,
            var: "x".to_owned(),
            policy: RetryPolicy::default(),
            state: ReaderState::AwaitingInput,
        }
    }

    /// Name used for the value in the prompt and the diagnostic.
    pub fn with_var(mut self, var: impl Into<String>) -> Self {
        self.var = var.into();
        self
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> ReaderState {
        self.state
    }

    pub fn prompt(&self) -> String {
        format!("Enter the value of {}:", self.var)
    }

    /// Performs one transition: prompt, read one line, parse it.
    ///
    /// Once the reader is `Done` or `Terminated` this returns that state
    /// without touching the source again.
    ///
    /// # Errors
    ///
    /// [`DrillError::InputClosed`] if the source is exhausted, or an I/O error
    /// from either end.
    pub fn step(&mut self) -> Result<ReaderState> {
        if self.state != ReaderState::AwaitingInput {
            return Ok(self.state);
        }

        write!(self.sink, "{}", self.prompt())?;
        self.sink.flush()?;

        let mut line = String::new();
        if self.source.read_line(&mut line)? == 0 {
            writeln!(self.sink)?;
            return Err(DrillError::InputClosed);
        }

        match parse_int(&self.var, &line) {
            Ok(value) => {
                self.state = ReaderState::Done(value);
            }
            Err(err) => {
                tracing::debug!(input = line.trim(), policy = ?self.policy, "rejected input");
                match self.policy {
                    RetryPolicy::Reprompt => writeln!(self.sink, "{err}")?,
                    RetryPolicy::Silent => {}
                    RetryPolicy::Terminate => {
                        writeln!(self.sink, "{err}")?;
                        self.state = ReaderState::Terminated;
                    }
                }
            }
        }
        Ok(self.state)
    }

    /// Steps until a value is read or the reader terminates.
    ///
    /// # Errors
    ///
    /// [`DrillError::NotANumber`] when the `Terminate` policy stopped the
    /// reader (the diagnostic has already been written to the sink),
    /// [`DrillError::InputClosed`] when the source ran dry first.
    pub fn read_int(&mut self) -> Result<i64> {
        loop {
            match self.step()? {
                ReaderState::AwaitingInput => continue,
                ReaderState::Done(value) => return Ok(value),
                ReaderState::Terminated => {
                    return Err(DrillError::NotANumber {
                        var: self.var.clone(),
                        text: String::new(),
                    });
                }
            }
        }
    }
}

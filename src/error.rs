//! Centralized error handling for the drills.
//!
//! ## Custom Error Types with `enum`
//!
//! Every failure a drill can hit is one variant of [`DrillError`]. Matching on
//! the variant is how the binary decides between a plain message for the user
//! and a real error report:
//!
//! ```
//! use drills::error::DrillError;
//!
//! fn report(err: &DrillError) {
//!     match err {
//!         DrillError::NotANumber { text, .. } => println!("{text} is not a number"),
//!         DrillError::TooFewArguments => println!("Too few arguments"),
//!         other => eprintln!("Error: {other}"),
//!     }
//! }
//! ```
//!
//! ## The `From` Trait for Error Conversion
//!
//! `From<E>` impls let the `?` operator convert library errors on the way up:
//!
//! ```no_run
//! use drills::error::Result;
//!
//! fn read_settings(path: &str) -> Result<String> {
//!     let content = std::fs::read_to_string(path)?;
//!     Ok(content)
//! }
//! ```
//!
//! ## Context Extension Trait
//!
//! [`ResultExt`] adds `.context()` to any `Result` whose error converts into
//! [`DrillError`]:
//!
//! ```no_run
//! use drills::error::ResultExt as _;
//!
//! fn load() -> drills::error::Result<String> {
//!     std::fs::read_to_string("data.csv").context("Failed to load dataset")
//! }
//! ```

use std::fmt;

/// Main error type for drill operations.
#[derive(Debug)]
pub enum DrillError {
    /// Text that could not be converted to an integer. `var` is the name the
    /// drill uses for the value in its messages.
    NotANumber { var: String, text: String },

    /// The input stream ended before a valid value was read.
    InputClosed,

    /// No positional argument was given where exactly one is required.
    TooFewArguments,

    /// More than one positional argument was given where exactly one is required.
    TooManyArguments,

    /// A random range whose lower bound exceeds the upper bound.
    InvalidRange { low: i64, high: i64 },

    /// I/O errors (files, terminal)
    Io(std::io::Error),

    /// Spreadsheet and dataframe errors
    DataProcessing(String),

    /// HTTP request or response errors
    Http(String),

    /// Configuration errors
    Config(String),

    /// Generic error with context
    Other(String),
}

impl DrillError {
    /// Errors that are part of a drill's normal behaviour rather than a fault.
    /// The binary prints these on stdout and exits with status 1.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Self::NotANumber { .. }
                | Self::InputClosed
                | Self::TooFewArguments
                | Self::TooManyArguments
                | Self::InvalidRange { .. }
        )
    }
}

impl fmt::Display for DrillError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber { var, .. } => write!(f, "{var} is not a number"),
            Self::InputClosed => write!(f, "No more input"),
            Self::TooFewArguments => write!(f, "Too few arguments"),
            Self::TooManyArguments => write!(f, "Too many arguments"),
            Self::InvalidRange { low, high } => {
                write!(f, "Invalid range: {low} is greater than {high}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::DataProcessing(msg) => write!(f, "Data processing error: {msg}"),
            Self::Http(msg) => write!(f, "HTTP error: {msg}"),
            Self::Config(msg) => write!(f, "Configuration error: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for DrillError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DrillError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for DrillError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(format!("JSON error: {err}"))
    }
}

impl From<polars::error::PolarsError> for DrillError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataProcessing(err.to_string())
    }
}

impl From<calamine::Error> for DrillError {
    fn from(err: calamine::Error) -> Self {
        Self::DataProcessing(format!("spreadsheet: {err}"))
    }
}

impl From<reqwest::Error> for DrillError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.to_string())
    }
}

/// Result type alias for drill operations.
pub type Result<T> = std::result::Result<T, DrillError>;

/// Extension trait to add context to results.
pub trait ResultExt<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> Result<T>;

    /// Add context using a closure (lazy evaluation).
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<DrillError>,
{
    fn context(self, msg: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let err: DrillError = e.into();
            DrillError::Other(format!("{}: {}", msg.into(), err))
        })
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| {
            let err: DrillError = e.into();
            DrillError::Other(format!("{}: {}", f(), err))
        })
    }
}

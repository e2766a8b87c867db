//! # Drills - small, independent programming exercises
//!
//! Every module is one exercise and none depends on another:
//!
//! - [`calculator`]: `square`, a pure function with its unit test
//! - [`input`]: a validated integer reader with three retry policies
//! - [`greeting`]: "exactly one argument" validation
//! - [`chance`]: coin toss, bounded roll and shuffle over `rand`
//! - [`songs`]: a thin song-search wrapper over `reqwest`
//! - [`analyser`]: spreadsheet loading, per-group means and SVG charts
//!
//! Shared plumbing lives in [`error`], [`config`], [`logging`] and [`utils`].
//!
//! ## Quick Start
//!
//! ```
//! use drills::calculator::square;
//! use drills::input::IntReader;
//! use std::io::Cursor;
//!
//! assert_eq!(square(-4), 16);
//!
//! let mut out = Vec::new();
//! let value = IntReader::new(Cursor::new("abc\n7\n"), &mut out).read_int()?;
//! assert_eq!(value, 7);
//! assert!(String::from_utf8_lossy(&out).contains("x is not a number"));
//! # Ok::<(), drills::error::DrillError>(())
//! ```
//!
//! ## Error Handling
//!
//! Library functions return [`error::Result`]. Drill diagnostics (not a
//! number, wrong argument count) are ordinary variants of
//! [`error::DrillError`] and are told apart from faults with
//! [`error::DrillError::is_user_facing`].

#![warn(clippy::all, rust_2018_idioms)]

pub mod analyser;
pub mod calculator;
pub mod chance;
pub mod config;
pub mod error;
pub mod greeting;
pub mod input;
pub mod logging;
pub mod songs;
pub mod utils;

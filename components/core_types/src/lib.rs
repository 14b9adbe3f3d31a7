//! Shared position and error types for the lossless JavaScript parser.
//!
//! This crate holds the small vocabulary every other component speaks:
//! where something is in the source, and what went wrong there.
//!
//! # Overview
//!
//! - [`SourcePosition`] - A single point in the source (line, column, offset)
//! - [`SourceLocation`] - A start/end pair plus an optional source label
//! - [`JsError`] - A structured syntax error
//! - [`ErrorKind`] - Which stage of parsing raised the error
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, JsError};
//!
//! let error = JsError::new(ErrorKind::Grammar, "Unexpected token )", 4, 1, 4);
//! assert_eq!(error.to_string(), "Line 1: Unexpected token )");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod source;

pub use error::{ErrorKind, JsError, JsResult};
pub use source::{SourceLocation, SourcePosition};

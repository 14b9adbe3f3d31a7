//! Command line front end for the lossless parser
//!
//! Provides argument parsing, the parse-and-print [`Session`] and the
//! interactive shell used by the `js-roundtrip` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod repl;
pub mod session;

pub use cli::{Cli, PrintMode};
pub use error::{CliError, CliResult};
pub use session::Session;

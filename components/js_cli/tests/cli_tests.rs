//! CLI argument parsing tests
//!
//! Tests for verifying clap argument parsing works correctly

use clap::Parser as ClapParser;
use js_cli::{Cli, PrintMode};
use std::path::PathBuf;

/// Test parsing no arguments (default behavior)
#[test]
fn cli_parse_no_args() {
    let cli = Cli::try_parse_from(["js-roundtrip"]).unwrap();

    assert_eq!(cli.file, None);
    assert_eq!(cli.eval, None);
    assert!(!cli.repl);
    assert!(!cli.module);
    assert_eq!(cli.print, PrintMode::Source);
}

/// Test parsing a positional file
#[test]
fn cli_parse_file() {
    let cli = Cli::try_parse_from(["js-roundtrip", "app.jsx"]).unwrap();

    assert_eq!(cli.file, Some(PathBuf::from("app.jsx")));
}

/// Test parsing -e option (short form)
#[test]
fn cli_parse_eval_short() {
    let cli = Cli::try_parse_from(["js-roundtrip", "-e", "a + b"]).unwrap();

    assert_eq!(cli.eval.as_deref(), Some("a + b"));
}

/// Test parsing --print values
#[test]
fn cli_parse_print_modes() {
    for (value, mode) in [
        ("source", PrintMode::Source),
        ("tokens", PrintMode::Tokens),
        ("comments", PrintMode::Comments),
        ("errors", PrintMode::Errors),
        ("check", PrintMode::Check),
    ] {
        let cli = Cli::try_parse_from(["js-roundtrip", "--print", value]).unwrap();
        assert_eq!(cli.print, mode);
    }
}

/// Test rejecting an unknown print mode
#[test]
fn cli_parse_invalid_print_mode() {
    assert!(Cli::try_parse_from(["js-roundtrip", "--print", "bytecode"]).is_err());
}

/// Test parsing combined flags
#[test]
fn cli_parse_combined_flags() {
    let cli = Cli::try_parse_from(["js-roundtrip", "-m", "-t", "--no-jsx", "-r"]).unwrap();

    assert!(cli.module);
    assert!(cli.tolerant);
    assert!(cli.no_jsx);
    assert!(cli.repl);
}

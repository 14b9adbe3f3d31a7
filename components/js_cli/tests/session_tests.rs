//! File-backed session tests

use js_cli::{Cli, CliError, PrintMode, Session};
use clap::Parser as ClapParser;
use lossless_parser::{ParseOptions, SourceType};
use pretty_assertions::assert_eq;
use std::io::Write;
use tempfile::NamedTempFile;

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn test_file_round_trip() {
    let source = "// header\nconst view = <p class='x'>{label}</p>;\r\n";
    let file = write_temp(source);
    let session = Session::new(ParseOptions::default());
    assert_eq!(session.process_file(file.path()).unwrap(), source);
}

#[test]
fn test_missing_file_is_io_error() {
    let session = Session::new(ParseOptions::default());
    let result = session.process_file(std::path::Path::new("/definitely/not/here.js"));
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn test_config_file_is_applied() {
    let config = write_temp(r#"{"sourceType": "module", "jsx": false}"#);
    let path = config.path().to_str().unwrap().to_string();
    let cli = Cli::try_parse_from(["js-roundtrip", "-e", "x", "--config", path.as_str()]).unwrap();
    let options = cli.parse_options().unwrap();
    assert_eq!(options.source_type, SourceType::Module);
    assert!(!options.jsx);
}

#[test]
fn test_bad_config_is_config_error() {
    let config = write_temp("{ not json");
    let path = config.path().to_str().unwrap().to_string();
    let cli = Cli::try_parse_from(["js-roundtrip", "--config", path.as_str()]).unwrap();
    assert!(matches!(cli.parse_options(), Err(CliError::Config(_))));
}

#[test]
fn test_token_listing() {
    let options = ParseOptions::default().with_tokens(true);
    let session = Session::new(options).with_print(PrintMode::Tokens);
    let out = session.process_string("a = 'b'").unwrap();
    assert_eq!(out, "Identifier \"a\"\nPunctuator \"=\"\nString \"'b'\"\n");
}

#[test]
fn test_comment_listing() {
    let options = ParseOptions::default().with_comments(true);
    let session = Session::new(options).with_print(PrintMode::Comments);
    let out = session.process_string("/* a */ x // b\n").unwrap();
    assert_eq!(out, "Block \" a \"\nLine \" b\"\n");
}

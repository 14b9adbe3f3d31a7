//! Interactive shell: each entry is parsed and printed back

use crate::error::{CliError, CliResult};
use crate::session::Session;
use lossless_parser::error::messages;
use lossless_parser::SourceType;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

/// Outcome of one complete entry.
#[derive(Debug, PartialEq)]
enum Entry {
    /// Rendered output
    Output(String),
    /// Input stops mid-construct; keep reading
    Incomplete,
    /// Parse or check failure
    Failed(String),
}

/// Run the interactive shell
///
/// # Arguments
/// * `session` - Options and output mode used for every entry
///
/// # Returns
/// `Ok(())` when the shell exits normally
pub fn run_repl(session: &mut Session) -> CliResult<()> {
    let mut editor =
        DefaultEditor::new().map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;

    println!("js-roundtrip {}", env!("CARGO_PKG_VERSION"));
    println!("Type JavaScript to see it parsed and printed back, or .help.");
    println!();

    let mut buffer = String::new();

    loop {
        let prompt = if buffer.is_empty() { "> " } else { "... " };

        match editor.readline(prompt) {
            Ok(line) => {
                let trimmed = line.trim();

                if buffer.is_empty() && trimmed.starts_with('.') {
                    if !handle_command(trimmed, session) {
                        break;
                    }
                    continue;
                }

                if !buffer.is_empty() {
                    buffer.push('\n');
                }
                buffer.push_str(&line);

                match evaluate(session, &buffer) {
                    Entry::Incomplete => continue,
                    Entry::Output(text) => println!("{}", text.trim_end_matches('\n')),
                    Entry::Failed(message) => eprintln!("{}", message),
                }
                let _ = editor.add_history_entry(buffer.as_str());
                buffer.clear();
            }
            Err(ReadlineError::Interrupted) => {
                if buffer.is_empty() {
                    println!("Press Ctrl-D or type .exit to quit");
                } else {
                    println!("^C");
                    buffer.clear();
                }
            }
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                return Err(CliError::Repl(format!("Readline error: {}", err)));
            }
        }
    }

    Ok(())
}

fn evaluate(session: &Session, input: &str) -> Entry {
    match session.process_string(input) {
        Ok(text) => Entry::Output(text),
        Err(CliError::Syntax(error)) if error.message == messages::UNEXPECTED_EOS => Entry::Incomplete,
        Err(error) => Entry::Failed(error.to_string()),
    }
}

/// Handle a dot command; `false` ends the session.
fn handle_command(command: &str, session: &mut Session) -> bool {
    match command {
        ".help" => {
            println!("Commands:");
            println!("  .module   - Parse entries as modules");
            println!("  .script   - Parse entries as scripts");
            println!("  .jsx      - Toggle JSX support");
            println!("  .exit     - Leave the shell");
        }
        ".module" => session.options_mut().source_type = SourceType::Module,
        ".script" => session.options_mut().source_type = SourceType::Script,
        ".jsx" => {
            let options = session.options_mut();
            options.jsx = !options.jsx;
            println!("JSX {}", if options.jsx { "enabled" } else { "disabled" });
        }
        ".exit" => return false,
        _ => {
            println!("Unknown command: {}", command);
            println!("Type .help for available commands");
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use lossless_parser::ParseOptions;

    #[test]
    fn test_incomplete_input_waits_for_more() {
        let session = Session::new(ParseOptions::default());
        assert_eq!(evaluate(&session, "function f() {"), Entry::Incomplete);
        assert_eq!(
            evaluate(&session, "function f() {\n}"),
            Entry::Output("function f() {\n}".to_string())
        );
    }

    #[test]
    fn test_errors_are_reported() {
        let session = Session::new(ParseOptions::default());
        assert!(matches!(evaluate(&session, "a b"), Entry::Failed(_)));
    }

    #[test]
    fn test_commands_switch_options() {
        let mut session = Session::new(ParseOptions::default());
        assert!(handle_command(".module", &mut session));
        assert_eq!(session.options().source_type, SourceType::Module);
        assert!(handle_command(".jsx", &mut session));
        assert!(!session.options().jsx);
        assert!(!handle_command(".exit", &mut session));
    }
}

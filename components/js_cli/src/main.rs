//! js-roundtrip
//!
//! Parses JavaScript or JSX and prints it back, or reports what went wrong.

use clap::Parser as ClapParser;
use js_cli::{repl, Cli, CliResult, Session};

fn run(cli: Cli) -> CliResult<()> {
    let session = Session::new(cli.parse_options()?).with_print(cli.print);

    if let Some(code) = &cli.eval {
        print!("{}", session.process_string(code)?);
    } else if let Some(file) = &cli.file {
        print!("{}", session.process_file(file)?);
    } else if cli.repl {
        let mut session = session;
        repl::run_repl(&mut session)?;
    } else {
        println!("js-roundtrip {}", env!("CARGO_PKG_VERSION"));
        println!();
        println!("Usage:");
        println!("  js-roundtrip <FILE>            Parse a file and print it back");
        println!("  js-roundtrip --eval <CODE>     Parse inline source");
        println!("  js-roundtrip --repl            Start the interactive shell");
        println!();
        println!("Run 'js-roundtrip --help' for more options.");
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("{}", error);
        std::process::exit(1);
    }
}

//! Command-line interface for minipas.
//!
//! Scans and parses a source file with the built-in (or a caller-supplied)
//! grammar and SLR table, and prints the parse tree or a numbered
//! `Error NN: ...` diagnostic. The `tokens`, `grammar` and `table`
//! subcommands dump the intermediate data.

use anyhow::{Context, anyhow};
use clap::{Parser as ClapParser, Subcommand};
use minipas::{ErrorCode, GRAMMAR, MinipasError, MinipasParser, SLR_TABLE, scan_all};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Command
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Parses a source file and prints its parse tree
    Parse {
        /// Source file to analyze
        #[arg(short, long)]
        source: Option<PathBuf>,

        /// Grammar file, one production per line
        #[arg(short, long)]
        grammar: Option<PathBuf>,

        /// SLR table in CSV form
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
    /// Prints the lexemes of a source file
    Tokens {
        /// Source file to scan
        #[arg(short, long)]
        source: Option<PathBuf>,
    },
    /// Prints the numbered productions
    Grammar {
        /// Grammar file, one production per line
        #[arg(short, long)]
        grammar: Option<PathBuf>,
    },
    /// Prints the action and goto entries
    Table {
        /// SLR table in CSV form
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
}

fn read_file(path: &Path, code: ErrorCode) -> anyhow::Result<String> {
    fs::read_to_string(path).with_context(|| format!("{} ({})", code, path.display()))
}

fn read_or_builtin(
    path: Option<&Path>,
    builtin: &'static str,
    code: ErrorCode,
) -> anyhow::Result<String> {
    match path {
        Some(path) => read_file(path, code),
        None => Ok(builtin.to_owned()),
    }
}

fn read_source(path: Option<&Path>) -> anyhow::Result<String> {
    let path = path.ok_or_else(|| anyhow!("{}", ErrorCode::SourceFileMissing))?;
    read_file(path, ErrorCode::CannotOpenSource)
}

/// `Error NN: message` for a library error.
fn coded(err: impl Into<MinipasError>) -> anyhow::Error {
    let err = err.into();
    anyhow!("Error {:02}: {}", err.code().number(), err)
}

fn report(err: MinipasError, parser: &MinipasParser) -> anyhow::Error {
    let mut msg = format!("Error {:02}: {}", err.code().number(), err);
    if let MinipasError::Syntax(syntax) = &err {
        if let Some(span) = syntax.span {
            msg.push_str(&format!(" at {}", span.start));
        }
        let expected = parser.table().expected(syntax.state);
        if !expected.is_empty() {
            msg.push_str(&format!("; expected one of: {}", expected.join(" ")));
        }
    }
    anyhow!(msg)
}

fn run(args: Args) -> anyhow::Result<()> {
    match args.command {
        Commands::Parse {
            source,
            grammar,
            table,
        } => {
            let source = read_source(source.as_deref())?;
            let grammar =
                read_or_builtin(grammar.as_deref(), GRAMMAR, ErrorCode::CannotOpenGrammar)?;
            let table = read_or_builtin(table.as_deref(), SLR_TABLE, ErrorCode::CannotOpenTable)?;
            let mut parser = MinipasParser::from_sources(&grammar, &table).map_err(coded)?;
            match parser.parse(&source) {
                Ok(tree) => {
                    print!("{}", tree);
                    log::debug!("{:?}", parser.stats());
                    Ok(())
                }
                Err(err) => Err(report(err, &parser)),
            }
        }
        Commands::Tokens { source } => {
            let source = read_source(source.as_deref())?;
            let lexemes = scan_all(&source).map_err(coded)?;
            for lx in lexemes {
                let at = lx.span.map(|s| s.start).unwrap_or_default();
                println!("{:<16}{:<16}{}", lx.terminal.name(), lx.text.as_str(), at);
            }
            Ok(())
        }
        Commands::Grammar { grammar } => {
            let text =
                read_or_builtin(grammar.as_deref(), GRAMMAR, ErrorCode::CannotOpenGrammar)?;
            let grammar = minipas::load_grammar(&text).map_err(coded)?;
            print!("{}", grammar);
            Ok(())
        }
        Commands::Table { table } => {
            let text = read_or_builtin(table.as_deref(), SLR_TABLE, ErrorCode::CannotOpenTable)?;
            let table = minipas::load_table(&text).map_err(coded)?;
            print!("{}", table);
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    env_logger::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

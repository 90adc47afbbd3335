//! cardex command line: load a corpus file, search it, inspect queries

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ariadne::{Color, Label, Report, ReportKind, Source};
use cardex_engine::{Engine, EngineError};
use cardex_parser::SyntaxError;
use clap::{Parser, Subcommand};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

#[derive(Parser)]
#[command(name = "cardex", about = "Search a card corpus with structured queries", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one query against a corpus file and print the matches
    Search {
        /// Path to a JSON array of card records
        corpus: PathBuf,
        /// Query, e.g. 'name:goblin oracle:/create.*token/'
        query: String,
        /// Maximum number of matches to print
        #[arg(long, default_value_t = 7)]
        limit: usize,
    },
    /// Interactively query a corpus file
    Repl {
        /// Path to a JSON array of card records
        corpus: PathBuf,
        /// Maximum number of matches to print per query
        #[arg(long, default_value_t = 7)]
        limit: usize,
    },
    /// Parse a query and print its predicate tree as JSON
    Parse {
        /// Query, e.g. 'name:goblin oracle:/create.*token/'
        query: String,
    },
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Command::Search {
            corpus,
            query,
            limit,
        } => search(&corpus, &query, limit),
        Command::Repl { corpus, limit } => repl(&corpus, limit),
        Command::Parse { query } => parse(&query),
    }
}

fn search(corpus: &Path, query: &str, limit: usize) -> Result<(), Box<dyn Error>> {
    let engine = load_corpus(corpus)?;
    match engine.query_cards(query) {
        Ok(matches) => {
            print_matches(&engine, &matches, limit);
            Ok(())
        }
        Err(EngineError::Syntax(err)) => {
            report_syntax_error(query, &err);
            Err("invalid query".into())
        }
        Err(err) => Err(err.into()),
    }
}

fn repl(corpus: &Path, limit: usize) -> Result<(), Box<dyn Error>> {
    let engine = load_corpus(corpus)?;
    println!("{} cards loaded; enter a query, ctrl-d to quit", engine.card_count());

    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("query> ") {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);
                match engine.query_cards(line) {
                    Ok(matches) => print_matches(&engine, &matches, limit),
                    Err(EngineError::Syntax(err)) => report_syntax_error(line, &err),
                    Err(err) => eprintln!("error: {err}"),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn parse(query: &str) -> Result<(), Box<dyn Error>> {
    let engine = Engine::new();
    match engine.parse_query(query) {
        Ok(tree) => {
            println!("{}", serde_json::to_string_pretty(&tree)?);
            Ok(())
        }
        Err(EngineError::Syntax(err)) => {
            report_syntax_error(query, &err);
            Err("invalid query".into())
        }
        Err(err) => Err(err.into()),
    }
}

fn load_corpus(path: &Path) -> Result<Engine, Box<dyn Error>> {
    let document = fs::read_to_string(path)?;
    let engine = Engine::new();
    engine.feed_cards(&document)?;
    Ok(engine)
}

fn print_matches(engine: &Engine, matches: &[usize], limit: usize) {
    if matches.len() > limit {
        println!("Showing {}/{}", limit, matches.len());
    }
    for &index in matches.iter().take(limit) {
        match engine.get_card(index) {
            Ok(card) => {
                println!("\t{}", card.name);
                for text in card.oracle_texts() {
                    println!("{text}");
                }
                println!();
            }
            Err(err) => eprintln!("error: {err}"),
        }
    }
}

/// Render a syntax error as a span-anchored report against the query line
fn report_syntax_error(query: &str, err: &SyntaxError) {
    let span = err.span();
    let end = if span.is_empty() {
        (span.start + 1).min(query.len().max(span.start + 1))
    } else {
        span.end
    };

    let _ = Report::build(ReportKind::Error, "query", span.start)
        .with_message(err.to_string())
        .with_label(
            Label::new(("query", span.start..end))
                .with_message("here")
                .with_color(Color::Red),
        )
        .finish()
        .eprint(("query", Source::from(query)));
}

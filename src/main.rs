use std::{fs::read_to_string, io, path::PathBuf, process, time::Instant};

use anyhow::{Context, Result};
use clap::Parser;
use minigo::{
    config::{Config, DEFAULT_MAX_CALL_DEPTH},
    display_error,
    errors::errors::Error,
    interpreter::interpreter::Interpreter,
    lexer::lexer::Lexer,
    parser::parser::parse_with_lexer,
    semantic_analyzer::semantic_analyzer::analyze,
};

/// Lexes, parses, checks and interprets a minigo program.
#[derive(Parser, Debug)]
#[command(author, long_about = None)]
struct Args {
    /// Path to the source file
    file: PathBuf,

    /// Reject calls whose argument count differs from the parameter count
    #[arg(long)]
    strict_arity: bool,

    /// Maximum depth of nested function calls
    #[arg(long, default_value_t = DEFAULT_MAX_CALL_DEPTH)]
    max_call_depth: usize,

    /// Log scopes, calls and phase timings to stderr
    #[arg(short = 'V', long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .with_writer(io::stderr)
        .init();

    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| args.file.to_string_lossy().into_owned());

    let mut source = read_to_string(&args.file)
        .with_context(|| format!("Failed to read {}", args.file.display()))?;
    source.push('\n');

    let config = Config::new(file_name)
        .with_strict_arity(args.strict_arity)
        .with_max_call_depth(args.max_call_depth);

    if let Err(error) = run(&source, &config) {
        display_error(&error, &source);
        process::exit(1);
    }

    println!("Interpret completed.");

    Ok(())
}

fn run(source: &str, config: &Config) -> Result<(), Error> {
    let start = Instant::now();

    println!("[Phase 1] Lexing...");
    let lexer = Lexer::new(source, Some(config.file_name.clone()));

    // tokens are pulled on demand, so lexing errors surface while parsing
    println!("[Phase 2] Parsing...");
    let program = parse_with_lexer(lexer)?;
    tracing::debug!(elapsed = ?start.elapsed(), "lexed and parsed");

    println!("[Phase 3] Semantic Checking...");
    let analyze_start = Instant::now();
    let model = analyze(&program, config)?;
    tracing::debug!(resolved_calls = model.resolved_calls(), elapsed = ?analyze_start.elapsed(), "analyzed");

    println!("[Phase 4] Interpreting...");
    let interpret_start = Instant::now();
    let stdout = io::stdout();
    Interpreter::new(&program, &model, config, stdout.lock()).interpret()?;
    tracing::debug!(elapsed = ?interpret_start.elapsed(), total = ?start.elapsed(), "interpreted");

    Ok(())
}

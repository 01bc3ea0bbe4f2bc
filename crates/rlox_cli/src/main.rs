//! rlox: scan a Lox source file, or lines typed at a prompt, and print the tokens.
//!
//! Usage:
//!   rlox [options] [FILE]
//!
//! Exit codes follow sysexits: 64 for bad options or config, 65 when the
//! source had scan errors, 66 when the input file cannot be read, 74 when
//! output cannot be written.

use clap::Parser as ClapParser;
use rlox_diagnostics::{Diagnostic, ErrorBus};
use rlox_options::{ConfigError, DriverOptions, OutputFormat, CONFIG_FILE_NAME};
use rlox_scanner::{Scanner, Token, TokenKind};
use std::io::{self, BufRead, IsTerminal, Write};
use std::path::Path;
use std::process;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use thiserror::Error;

#[derive(ClapParser, Debug)]
#[command(
    name = "rlox",
    about = "rlox - A scanner for the Lox language",
    disable_version_flag = true
)]
struct Cli {
    /// Source file to scan. Starts an interactive prompt when omitted.
    #[arg(value_name = "FILE")]
    file: Option<String>,

    /// Output format: text or json.
    #[arg(long, value_name = "FORMAT")]
    format: Option<String>,

    /// Path to rlox.json.
    #[arg(short = 'c', long, value_name = "PATH")]
    config: Option<String>,

    /// Print a trailing EOF token after the scanned tokens.
    #[arg(long = "show-eof")]
    show_eof: bool,

    /// Disable colored diagnostics.
    #[arg(long = "no-pretty")]
    no_pretty: bool,

    /// Print the version.
    #[arg(short = 'v', long)]
    version: bool,
}

const EX_USAGE: i32 = 64;
const EX_DATAERR: i32 = 65;
const EX_NOINPUT: i32 = 66;
const EX_IOERR: i32 = 74;

// ANSI color codes
const RED: &str = "\x1b[31m";
const CYAN: &str = "\x1b[36m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Debug, Error)]
enum DriverError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("could not read '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
    #[error("failed to serialize tokens: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl DriverError {
    fn exit_code(&self) -> i32 {
        match self {
            DriverError::Config(_) => EX_USAGE,
            DriverError::Read { .. } => EX_NOINPUT,
            DriverError::Output(_) | DriverError::Serialize(_) => EX_IOERR,
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber, but only when `RUST_LOG` is set.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(io::stderr).with_target(true).with_level(true))
                .with(filter)
                .init();
        }
    });
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if cli.version {
        println!("rlox Version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    let code = match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            print_error(&e.to_string());
            e.exit_code()
        }
    };
    process::exit(code);
}

fn run(cli: &Cli) -> Result<i32, DriverError> {
    let options = resolve_options(cli)?;
    tracing::debug!(?options, "resolved driver options");

    match cli.file {
        Some(ref path) => run_file(path, &options),
        None => run_prompt(&options),
    }
}

/// Command-line flags first, then the config file, then defaults.
fn resolve_options(cli: &Cli) -> Result<DriverOptions, DriverError> {
    let file_options = match cli.config {
        Some(ref path) => rlox_options::parse_config_file(path)?.options,
        None if Path::new(CONFIG_FILE_NAME).exists() => {
            rlox_options::parse_config_file(CONFIG_FILE_NAME)?.options
        }
        None => None,
    };

    let cli_options = DriverOptions {
        format: cli.format.as_deref().map(str::parse::<OutputFormat>).transpose()?,
        pretty: cli.no_pretty.then_some(false),
        prompt: None,
        show_eof: cli.show_eof.then_some(true),
    };

    Ok(cli_options.or(file_options.unwrap_or_default()))
}

/// A bus whose only listener counts reports.
fn error_counter() -> (ErrorBus, Arc<AtomicUsize>) {
    let mut bus = ErrorBus::new();
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    bus.subscribe(move |_, _| {
        counter.fetch_add(1, Ordering::Relaxed);
    });
    (bus, count)
}

/// A bus that prints every report to stderr as it happens.
fn prompt_bus(use_color: bool) -> ErrorBus {
    let mut bus = ErrorBus::new();
    bus.subscribe(move |line, message| print_report(line, message, use_color));
    bus
}

fn run_file(path: &str, options: &DriverOptions) -> Result<i32, DriverError> {
    let source = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_string(),
        source,
    })?;

    let use_color = options.pretty() && io::stderr().is_terminal();
    let (bus, errors) = error_counter();

    let mut scanner = Scanner::new(&source).with_reporter(&bus);
    let tokens = scanner.scan_tokens();
    let eof_line = scanner.line();
    let mut diagnostics = scanner.take_diagnostics();

    let mut out = io::stdout().lock();
    write_tokens(&mut out, &tokens, eof_line, options)?;
    out.flush()?;

    diagnostics.set_file(path);
    diagnostics.sort();
    for diagnostic in diagnostics.diagnostics() {
        print_diagnostic(diagnostic, use_color);
    }

    let count = errors.load(Ordering::Relaxed);
    if count > 0 {
        print_summary(count, use_color);
        return Ok(EX_DATAERR);
    }
    Ok(0)
}

fn run_prompt(options: &DriverOptions) -> Result<i32, DriverError> {
    let use_color = options.pretty() && io::stderr().is_terminal();
    let bus = prompt_bus(use_color);

    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut line = String::new();

    loop {
        {
            let mut out = io::stdout().lock();
            write!(out, "{}", options.prompt())?;
            out.flush()?;
        }

        line.clear();
        if input.read_line(&mut line)? == 0 {
            break;
        }
        let source = line.trim_end_matches(['\n', '\r']);

        // Each line gets its own scanner, so line numbers restart at 1.
        let mut scanner = Scanner::new(source).with_reporter(&bus);
        let tokens = scanner.scan_tokens();

        let mut out = io::stdout().lock();
        write_tokens(&mut out, &tokens, scanner.line(), options)?;
        out.flush()?;
    }

    println!();
    Ok(0)
}

fn write_tokens(
    out: &mut impl Write,
    tokens: &[Token],
    eof_line: usize,
    options: &DriverOptions,
) -> Result<(), DriverError> {
    let eof = options
        .show_eof()
        .then(|| Token::new(TokenKind::Eof, "", None, eof_line));
    let all = tokens.iter().chain(eof.as_ref());

    match options.format() {
        OutputFormat::Text => {
            for token in all {
                writeln!(out, "{}", token)?;
            }
        }
        OutputFormat::Json => {
            let all: Vec<&Token> = all.collect();
            serde_json::to_writer_pretty(&mut *out, &all)?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn print_diagnostic(diag: &Diagnostic, use_color: bool) {
    if use_color {
        if let Some(ref file) = diag.file {
            eprint!("{}{}{}: ", CYAN, file, RESET);
        }
        if let Some(line) = diag.line {
            eprint!("{}[line {}]{} ", CYAN, line, RESET);
        }
        eprintln!(
            "{}{}error{} {}LOX{}{}: {}",
            BOLD, RED, RESET, CYAN, diag.code, RESET, diag.message_text
        );
    } else {
        eprintln!("{}", diag);
    }
}

fn print_report(line: usize, message: &str, use_color: bool) {
    if use_color {
        eprintln!(
            "{}[line {}]{} {}{}error{}: {}",
            CYAN, line, RESET, BOLD, RED, RESET, message
        );
    } else {
        eprintln!("[line {}] error: {}", line, message);
    }
}

fn print_summary(count: usize, use_color: bool) {
    let plural = if count == 1 { "" } else { "s" };
    if use_color {
        eprintln!("\n{}Found {} error{}.{}", RED, count, plural, RESET);
    } else {
        eprintln!("\nFound {} error{}.", count, plural);
    }
}

fn print_error(msg: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{}{}error{}: {}", BOLD, RED, RESET, msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

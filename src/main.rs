use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::Subcommand;
use env_logger::Builder;
use log::{debug, info};
use memmap2::Mmap;

use rose_interpreter as rose;

use rose::ast_printer::AstPrinter;
use rose::error::RoseError;
use rose::interpreter::Interpreter;
use rose::scanner::{tokenize, Scanner};

/// Exit status for scan and parse diagnostics.
const EXIT_DIAGNOSTICS: i32 = 65;

/// Exit status for a fatal evaluation error.
const EXIT_RUNTIME: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Rose language interpreter", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes a file, printing each token
    Tokenize {
        filename: PathBuf,

        /// Print the token sequence as JSON
        #[arg(long)]
        json: bool,
    },

    /// Parses a file and prints each statement's tree
    Parse {
        filename: PathBuf,

        /// Print the statement list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Runs a file as a Rose program
    Run { filename: PathBuf },
}

/// Reads the contents of a file through a read-only memory map.
fn read_file(filename: PathBuf) -> Result<Vec<u8>> {
    info!("Reading file: {:?}", filename);
    let file = File::open(&filename).context(format!("Failed to open file {:?}", filename))?;

    let len = file
        .metadata()
        .context(format!("Failed to stat file {:?}", filename))?
        .len();

    // Zero-length maps are rejected on some platforms.
    if len == 0 {
        return Ok(Vec::new());
    }

    // SAFETY: the map is read-only and copied out before the file is dropped.
    let map = unsafe { Mmap::map(&file) }.context(format!("Failed to map file {:?}", filename))?;
    let buf = map.to_vec();

    info!("Read {} bytes from {:?}", buf.len(), filename);

    Ok(buf)
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'rose_interpreter::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("rose_interpreter::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{} {}:{}] - {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug)
        .parse_default_env() // RUST_LOG overrides the default level
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

fn report(errors: &[RoseError]) {
    for e in errors {
        debug!("Diagnostic: {}", e);
        eprintln!("{}", e);
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    match args.commands {
        Commands::Tokenize { filename, json } => {
            info!("Running Tokenize subcommand");
            let buf = read_file(filename)?;

            if json {
                match tokenize(&buf) {
                    Ok(tokens) => println!("{}", serde_json::to_string_pretty(&tokens)?),
                    Err(e) => {
                        report(&[e]);
                        process::exit(EXIT_DIAGNOSTICS);
                    }
                }
                return Ok(());
            }

            let stdout = io::stdout();
            let mut out = stdout.lock();

            for token in Scanner::new(&buf) {
                match token {
                    Ok(token) => writeln!(out, "{}", token)?,
                    Err(e) => {
                        out.flush()?;
                        report(&[e]);
                        process::exit(EXIT_DIAGNOSTICS);
                    }
                }
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { filename, json } => {
            info!("Running Parse subcommand");
            let buf = read_file(filename)?;

            let statements = match rose::scan_and_parse(&buf) {
                Ok(statements) => statements,
                Err(errors) => {
                    report(&errors);
                    process::exit(EXIT_DIAGNOSTICS);
                }
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&statements)?);
            } else {
                for stmt in &statements {
                    println!("{}", AstPrinter::print_stmt(stmt));
                }
            }

            info!("Parse subcommand completed");
        }

        Commands::Run { filename } => {
            info!("Running Run subcommand");
            let buf = read_file(filename)?;

            let statements = match rose::scan_and_parse(&buf) {
                Ok(statements) => statements,
                Err(errors) => {
                    report(&errors);
                    process::exit(EXIT_DIAGNOSTICS);
                }
            };

            info!("Parsed {} statements", statements.len());

            let mut interpreter = Interpreter::new();

            match interpreter.interpret(&statements) {
                Ok(()) => {}
                Err(RoseError::Io(e)) => {
                    return Err(e).context("Failed to write program output");
                }
                Err(e) => {
                    debug!("Runtime debug: {}", e);
                    eprintln!("{}", e);
                    process::exit(EXIT_RUNTIME);
                }
            }

            info!("Program executed successfully");
        }
    }

    Ok(())
}

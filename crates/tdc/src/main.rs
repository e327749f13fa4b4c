//! tdc - record-definition compiler
//!
//! Usage: tdc [OPTIONS] <input>

use clap::{Parser as ClapParser, ValueEnum};
use std::fs;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

use td_compiler::backend::{BackendRegistry, PrintRecordsBackend, SshConfigBackend};
use td_compiler::common::{CompileError, DiagnosticReporter};
use td_compiler::frontend::{self, Lexer, Parser};

/// Action to perform
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Default)]
enum Action {
    /// Print all records (default)
    #[default]
    PrintRecords,
    /// Generate SSH Config
    SshConfig,
}

impl Action {
    fn backend_name(self) -> &'static str {
        match self {
            Action::PrintRecords => "print-records",
            Action::SshConfig => "ssh-config",
        }
    }
}

#[derive(ClapParser, Debug)]
#[command(name = "tdc")]
#[command(author = "TDC Team")]
#[command(version = "0.1.0")]
#[command(about = "Record-definition compiler and configuration generator", long_about = None)]
struct Args {
    /// Input record file (.td)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Action to perform
    #[arg(short, long, value_enum, default_value = "print-records")]
    action: Action,

    /// Dump tokens (for debugging)
    #[arg(long)]
    dump_tokens: bool,

    /// Dump AST (for debugging)
    #[arg(long)]
    dump_ast: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(&args) {
        eprintln!("error: {}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    // Read input file
    let source = fs::read_to_string(&args.input)?;
    let filename = args.input.display().to_string();

    // Set up diagnostic reporter
    let mut reporter = DiagnosticReporter::new();
    let file_id = reporter.add_file(&filename, &source);

    if args.dump_tokens {
        match Lexer::new(&source).tokenize_all() {
            Ok(tokens) => {
                eprintln!("=== Tokens ===");
                for token in &tokens {
                    eprintln!(
                        "{:?} @ {}..{}",
                        token.kind, token.span.start, token.span.end
                    );
                }
                eprintln!("=== End Tokens ===\n");
            }
            Err(e) => {
                reporter.report_error(file_id, &e);
                process::exit(1);
            }
        }
    }

    if args.dump_ast {
        match Parser::new(&source).and_then(|mut p| p.parse()) {
            Ok(items) => {
                eprintln!("=== AST ===");
                eprintln!("{:#?}", items);
                eprintln!("=== End AST ===\n");
            }
            Err(e) => {
                reporter.report_error(file_id, &e);
                process::exit(1);
            }
        }
    }

    // Build the record store
    let records = match frontend::build_records(&source) {
        Ok(records) => records,
        Err(e) => {
            reporter.report_error(file_id, &e);
            process::exit(1);
        }
    };

    if args.verbose {
        eprintln!(
            "Resolved {} classes and {} defs from {}",
            records.classes().len(),
            records.defs().len(),
            filename
        );
    }

    // Select backend and emit
    let mut registry = BackendRegistry::new();
    registry.register(Box::new(PrintRecordsBackend::new()));
    registry.register(Box::new(SshConfigBackend::new()));

    let backend = registry
        .find_by_name(args.action.backend_name())
        .ok_or_else(|| CompileError::backend(format!("no such backend: {}", args.action.backend_name())))?;

    if args.verbose {
        eprintln!("Running backend '{}': {}", backend.name(), backend.description());
    }

    let mut sink: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(File::create(path)?),
        None => Box::new(io::stdout().lock()),
    };
    backend.run(&records, &mut *sink)?;
    sink.flush()?;

    if args.verbose {
        match &args.output {
            Some(path) => eprintln!("Wrote {} output to {}", backend.name(), path.display()),
            None => eprintln!("Wrote {} output to stdout", backend.name()),
        }
    }

    Ok(())
}

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    process::ExitCode,
};

use clap::Parser;
use polycalc::calculator::Calculator;
use tracing::error;
use tracing_subscriber::{filter::LevelFilter, fmt, prelude::*, EnvFilter};

/// A stack calculator for sparse multivariate polynomials.
///
/// Each input line is either a polynomial literal, which is pushed onto the
/// stack, or a command. Results go to standard output and diagnostics to
/// standard error.
#[derive(Parser, Debug)]
#[command(name = "polycalc", version, about)]
struct Args {
    /// Read input from this file instead of standard input
    input: Option<PathBuf>,

    /// Log every executed command, unless POLYCALC_LOG overrides the filter
    #[arg(long)]
    trace_commands: bool,
}

fn init_logging(trace_commands: bool) {
    let default = if trace_commands {
        LevelFilter::TRACE
    } else {
        LevelFilter::WARN
    };

    let filter = EnvFilter::builder()
        .with_default_directive(default.into())
        .with_env_var("POLYCALC_LOG")
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).without_time())
        .with(filter)
        .init();
}

/// Open the input file. Only this error names the path.
fn open_input(path: &Path) -> io::Result<File> {
    File::open(path).map_err(|e| io::Error::new(e.kind(), format!("{}: {}", path.display(), e)))
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.trace_commands);

    let mut calculator = Calculator::new();
    let mut out = BufWriter::new(io::stdout().lock());
    let mut err = io::stderr().lock();

    let result = match &args.input {
        Some(path) => open_input(path).and_then(|f| calculator.run(f, &mut out, &mut err)),
        None => calculator.run(io::stdin().lock(), &mut out, &mut err),
    };

    match result.and_then(|()| out.flush()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use envcheck::{CheckMode, CheckReport, DEFAULT_ENV_FILE, DEFAULT_EXAMPLE_FILE, EnvChecker, Error};

const EXIT_INVALID: i32 = 1;
const EXIT_FAILURE: i32 = 2;

/// envcheck - compare an env file against its example template
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "envcheck", version, long_about = None)]
struct Args {
    /// Env file to validate.
    #[arg(long = "env", value_name = "PATH", default_value = DEFAULT_ENV_FILE)]
    env_path: PathBuf,

    /// Template listing the expected keys. Values of `required` must be
    /// non-empty in the env file.
    #[arg(long = "example", value_name = "PATH", default_value = DEFAULT_EXAMPLE_FILE)]
    example_path: PathBuf,

    /// Fail when keys are missing or required keys are empty.
    #[arg(long)]
    strict: bool,

    /// Print the result as JSON.
    #[arg(long)]
    json: bool,

    /// Print checker diagnostics to stderr.
    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn mode(&self) -> CheckMode {
        CheckMode::from_strict(self.strict)
    }
}

fn main() {
    process::exit(run(std::env::args_os()));
}

fn run(args: impl IntoIterator<Item = OsString>) -> i32 {
    let args = match Args::try_parse_from(args) {
        Ok(args) => args,
        Err(err) => {
            let code = if err.use_stderr() { EXIT_FAILURE } else { 0 };
            let _ = err.print();
            return code;
        }
    };

    init_tracing(args.verbose);

    match execute(&args) {
        Ok(output) => {
            println!("{}", output.rendered);
            if output.valid { 0 } else { EXIT_INVALID }
        }
        Err(err) => {
            eprintln!("envcheck: {err}");
            EXIT_FAILURE
        }
    }
}

struct Output {
    rendered: String,
    valid: bool,
}

fn execute(args: &Args) -> Result<Output, Error> {
    let report = EnvChecker::new()
        .env_path(&args.env_path)
        .example_path(&args.example_path)
        .mode(args.mode())
        .check()?;

    Ok(Output {
        rendered: render(&report, args.json)?,
        valid: report.is_valid(),
    })
}

fn render(report: &CheckReport, json: bool) -> Result<String, Error> {
    if json {
        report.to_json()
    } else {
        Ok(format!("\n{}", report.text()))
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

//! ci-prepare - run CI setup scripts in order
//!
//! Runs every setup step and exits with the first failing step's exit code.

use std::io;
use std::path::PathBuf;
use std::process::exit;

use ci_prepare::common::{config::Config, logging};
use ci_prepare::{Environment, Result, Runner, STEPS};
use clap::Parser;

#[derive(Parser)]
#[command(name = "ci-prepare", about = "Run the CI setup scripts in order")]
#[command(version, long_about = None)]
struct Cli {
    /// Directory containing the step scripts (default: `scripts` next to this binary)
    #[arg(long, value_name = "DIR", env = "CI_PREPARE_SCRIPTS_DIR")]
    scripts_dir: Option<PathBuf>,

    /// Configuration file to use instead of the default location
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
}

fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let scripts_dir = config.scripts_dir(cli.scripts_dir);
    tracing::debug!(scripts_dir = %scripts_dir.display(), steps = STEPS.len(), "starting");

    let mut runner = Runner::new(Environment::from_host(), scripts_dir, io::stdout().lock());
    runner.run(STEPS)
}

fn main() {
    logging::init_cli();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => exit(0),
        Err(e) => {
            if !e.is_reported() {
                eprintln!("ERROR: {e}");
            }
            exit(e.exit_code());
        }
    }
}

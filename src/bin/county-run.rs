//! CLI tool to run query scripts against the county demographics dataset.
//!
//! Usage:
//!   county-run <script>
//!   county-run <script> --inputs queries --data demographics.csv
//!
//! The script name is resolved inside the inputs directory. Reports go to
//! stdout; per-line script errors are reported inline and never abort the
//! run.

use clap::Parser;
use county_query::{Interpreter, SetupError, load_counties};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process;

/// Run a query script against the county demographics dataset.
#[derive(Parser)]
#[command(name = "county-run")]
struct Cli {
    /// Script file name, resolved inside the inputs directory
    script: String,

    /// Directory containing query scripts
    #[arg(long, default_value = "inputs")]
    inputs: PathBuf,

    /// County demographics CSV file
    #[arg(long, default_value = "county_demographics.csv")]
    data: PathBuf,

    /// Show resolved paths on stderr
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), SetupError> {
    let script_path = cli.inputs.join(&cli.script);
    if cli.verbose {
        eprintln!("Dataset: {}", cli.data.display());
        eprintln!("Script:  {}", script_path.display());
    }

    let counties = load_counties(&cli.data)?;
    let script = fs::read_to_string(&script_path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            SetupError::FileNotFound
        } else {
            SetupError::Io(e)
        }
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} records loaded.", counties.len())?;

    let mut interp = Interpreter::new(&counties);
    interp.run_script(&script, &mut out)?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        println!("ERROR: {e}");
        process::exit(1);
    }
}

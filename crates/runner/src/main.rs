use std::fs::File;
use std::io::{self, BufReader};

use log::info;
use sweepstake_exchange::{Exchange, ExchangeConfig};
use sweepstake_runner::replay;

fn print_help() {
    eprintln!(
        r#"Sweepstake Exchange - replay a command script against the team exchange

USAGE:
    sweepstake [OPTIONS]

OPTIONS:
    --config <PATH>     Load configuration from JSON file
    --script <PATH>     Read commands from a JSON-lines file (default: stdin)
    --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG            Log level filter (default: info)

Without --config the full tournament roster is loaded with the sweepstake
draw already assigned.

EXAMPLES:
    # Replay a script against the seeded tournament
    sweepstake --script day1.jsonl

    # Custom roster, commands piped in
    cat orders.jsonl | sweepstake --config roster.json
"#
    );
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let mut config_path: Option<String> = None;
    let mut script_path: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            "--config" | "-c" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --config requires a path argument");
                    std::process::exit(1);
                }
                config_path = Some(args[i].clone());
            }
            "--script" | "-s" => {
                i += 1;
                if i >= args.len() {
                    eprintln!("Error: --script requires a path argument");
                    std::process::exit(1);
                }
                script_path = Some(args[i].clone());
            }
            arg => {
                eprintln!("Unknown argument: {}", arg);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let config = match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            ExchangeConfig::from_file(&path)?
        }
        None => {
            info!("Using the seeded tournament configuration");
            ExchangeConfig::tournament_seed()
        }
    };
    info!("Instruments: {}", config.instruments.len());
    info!("Initial owners: {}", config.initial_owners.len());

    let exchange = Exchange::from_config(config)?;
    let stdout = io::stdout().lock();

    let summary = match script_path {
        Some(path) => {
            info!("Replaying script: {}", path);
            replay(&exchange, BufReader::new(File::open(&path)?), stdout)?
        }
        None => replay(&exchange, io::stdin().lock(), stdout)?,
    };

    if summary.invalid > 0 {
        std::process::exit(2);
    }
    Ok(())
}

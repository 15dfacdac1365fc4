//! Doctor Registry binary
//!
//! Opens the registry file and runs the interactive menu on stdin/stdout.

use clap::Parser;
use doctor_registry::{CorruptFilePolicy, Shell, Store, StoreConfig};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

/// Doctor Registry
#[derive(Parser, Debug)]
#[command(name = "doctor-registry")]
#[command(about = "Manage a roster of doctors stored in a local JSON file")]
#[command(version)]
struct Args {
    /// Registry file
    #[arg(short, long, env = "DOCTOR_REGISTRY_FILE", default_value = "doctors.json")]
    file: PathBuf,

    /// Refuse to start if the registry file cannot be decoded
    #[arg(long)]
    fail_on_corrupt: bool,

    /// Do not take the exclusive lock on the registry file
    #[arg(long)]
    no_lock: bool,
}

fn main() -> ExitCode {
    // Logs go to stderr so they never mix with the menu
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let config = StoreConfig {
        path: args.file,
        on_corrupt: if args.fail_on_corrupt {
            CorruptFilePolicy::Fail
        } else {
            CorruptFilePolicy::StartEmpty
        },
        lock: !args.no_lock,
        ..Default::default()
    };

    let mut store = match Store::open(config) {
        Ok(store) => store,
        Err(e) => {
            tracing::error!("Failed to open registry: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let stdin = io::stdin();
    let result = Shell::new(&mut store, stdin.lock(), io::stdout()).run();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Registry error: {}", e);
            ExitCode::FAILURE
        }
    }
}

//! `tripwire-replay` entry point.

use std::process::ExitCode;
use tracing::error;
use tripwire::logging::setup_logging;
use tripwire::{run_replay, AppConfig, CliArgs};

fn main() -> ExitCode {
    let args = CliArgs::parse();

    // Logging is not up yet, so config problems go to stderr directly.
    let mut config = match AppConfig::load_from_file(&args.config_path) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("⚠️ {e}; using default configuration");
            AppConfig::default()
        }
    };
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    if let Err(e) = setup_logging(&config.logging, args.json_logs) {
        eprintln!("❌ Failed to setup logging: {e}");
        return ExitCode::FAILURE;
    }

    if let Err(e) = config.validate() {
        error!("❌ {e}");
        return ExitCode::FAILURE;
    }

    let stdout = std::io::stdout();
    match run_replay(&config, args.trace.as_deref(), &mut stdout.lock()) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Replay failed: {e}");
            ExitCode::FAILURE
        }
    }
}

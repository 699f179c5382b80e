//! # Tripwire
//!
//! Application-side glue for the tripwire event bus: configuration, logging,
//! the script session lifecycle, and `tripwire-replay`, which pushes recorded
//! host call sites through the adapters.
//!
//! ```bash
//! # Replay a captured trace with the default configuration
//! tripwire-replay --trace frames.jsonl
//!
//! # JSON logs, verbose bus output
//! tripwire-replay -t frames.jsonl --log-level debug --json-logs
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod replay;
pub mod session;

pub use cli::CliArgs;
pub use config::{AppConfig, LoggingSettings};
pub use error::{ConfigError, ReplayError};
pub use replay::{ReplayLine, ReplaySummary, Replayer, TraceRecord};
pub use session::ScriptSession;

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::Path;
use tracing::info;

/// Replays `trace` (stdin when `None`) with a fresh session, writing one
/// summary line per call site to `out`.
pub fn run_replay<W: Write>(
    config: &AppConfig,
    trace: Option<&Path>,
    out: &mut W,
) -> Result<ReplaySummary, ReplayError> {
    let replayer = Replayer::new(config);
    replayer.watch_all_events();
    info!(
        host = tripwire_adapters::active::HOST_VARIANT,
        "▶️ Replaying {}",
        trace.map_or("stdin".into(), |path| path.display().to_string())
    );

    let summary = match trace {
        Some(path) => replayer.replay_trace(BufReader::new(File::open(path)?), out)?,
        None => replayer.replay_trace(io::stdin().lock(), out)?,
    };

    info!(
        calls = summary.calls,
        dispatched = summary.dispatched,
        suppressed = summary.suppressed,
        malformed = summary.malformed,
        "✅ Replay finished"
    );
    Ok(summary)
}

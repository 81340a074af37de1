use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use aware_native::aware_hal::HalRevision;
use aware_native::diagnostics::{COMMAND_GROUP, COMMAND_SUCCESS};
use aware_native::{
    init_logging, init_logging_from_env, AdapterConfig, AwareEventAdapter,
    DiagnosticCommandHandler, LoggingMode, RecordingSessionManager,
};
use clap::Parser;
use tracing::info;

mod replay;

/// Wi-Fi Aware HAL trace replay
///
/// Feeds a recorded JSON trace of HAL callbacks through the adapter, prints
/// every notification the session manager receives, then runs one
/// `native_cb` diagnostic command.
#[derive(Parser, Debug)]
#[command(name = "aware-replay")]
#[command(about = "Replay Wi-Fi Aware HAL callback traces through the adapter")]
#[command(version)]
pub struct Args {
    /// JSON file holding an array of HAL events
    #[arg(short, long)]
    pub trace: PathBuf,

    /// Negotiated HAL revision (overrides AWARE_HAL_REVISION)
    #[arg(short, long)]
    pub revision: Option<HalRevision>,

    /// Trace every callback and enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Deliver events through the background pump thread
    #[arg(long)]
    pub pump: bool,

    /// Do not print forwarded notifications
    #[arg(long)]
    pub quiet: bool,

    /// Print the adapter dump after replay
    #[arg(long)]
    pub dump: bool,

    /// native_cb command to run after replay, e.g. `get_cb_count --reset`
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub command: Vec<String>,
}

impl Args {
    /// Merge with the environment-derived adapter configuration
    pub fn adapter_config(&self) -> Result<AdapterConfig> {
        let mut config = AdapterConfig::from_env().context("Invalid adapter environment")?;
        if let Some(revision) = self.revision {
            config = config.with_revision(revision);
        }
        if self.verbose {
            config = config.with_verbose_logging(true);
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    if args.verbose {
        init_logging(LoggingMode::Debug)?;
    } else {
        init_logging_from_env()?;
    }

    let config = args.adapter_config()?;
    let events = replay::load_trace(&args.trace)?;
    info!(
        events = events.len(),
        revision = %config.revision,
        trace = %args.trace.display(),
        "Replaying trace"
    );

    let manager = Arc::new(RecordingSessionManager::new());
    let adapter = Arc::new(AwareEventAdapter::new(&config, manager.clone()));

    let stats = if args.pump {
        replay::replay_pumped(Arc::clone(&adapter), &config, events)?
    } else {
        replay::replay_inline(&adapter, events)
    };
    info!(
        processed = stats.processed,
        dropped = stats.dropped,
        "Replay finished"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !args.quiet {
        for notification in manager.take() {
            writeln!(out, "{}", serde_json::to_string(&notification)?)?;
        }
    }

    if args.dump {
        adapter.dump(&mut out)?;
    }

    if args.command.is_empty() {
        return Ok(ExitCode::SUCCESS);
    }

    let code = adapter
        .diagnostics()
        .on_command(&args.command, &mut out, &mut io::stderr());
    if code != COMMAND_SUCCESS {
        writeln!(io::stderr(), "{COMMAND_GROUP} commands:")?;
        DiagnosticCommandHandler::help(&mut io::stderr())
            .context("Failed to print diagnostic help")?;
        return Ok(ExitCode::FAILURE);
    }

    Ok(ExitCode::SUCCESS)
}

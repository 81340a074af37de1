//! `native_cb` diagnostic commands
//!
//! Two read operations over the adapter's runtime state:
//!
//! - `get_cb_count [--reset]`: callback counters, optionally drained
//! - `get_channel_info`: channel allocation per data path
//!
//! Output is compact JSON on the out writer. Failures print a message on the
//! err writer and return [`COMMAND_FAILURE`].

use std::io::{self, Write};

use clap::{Parser, Subcommand};
use tracing::debug;

use crate::cache::ChannelInfoCache;
use crate::counters::CallbackCounters;
use crate::error::DiagnosticError;

/// Command group name the handler is registered under
pub const COMMAND_GROUP: &str = "native_cb";

pub const COMMAND_SUCCESS: i32 = 0;
pub const COMMAND_FAILURE: i32 = -1;

const COMMAND_NAMES: [&str; 2] = ["get_cb_count", "get_channel_info"];

/// A parsed diagnostic command
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum DiagnosticCommand {
    /// Print callback counters
    #[command(name = "get_cb_count", disable_help_flag = true)]
    GetCbCount {
        /// Clear the counters after reading them
        #[arg(long)]
        reset: bool,
    },
    /// Print channel info per data path
    #[command(name = "get_channel_info", disable_help_flag = true)]
    GetChannelInfo,
}

#[derive(Debug, Parser)]
#[command(
    name = "native_cb",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct NativeCbArgs {
    #[command(subcommand)]
    command: DiagnosticCommand,
}

impl DiagnosticCommand {
    /// Parse the arguments that follow the command group name
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, DiagnosticError> {
        let name = args
            .first()
            .map(|arg| arg.as_ref())
            .ok_or(DiagnosticError::MissingCommand)?;
        if !COMMAND_NAMES.contains(&name) {
            return Err(DiagnosticError::UnknownCommand(name.to_string()));
        }

        NativeCbArgs::try_parse_from(args.iter().map(|arg| arg.as_ref()))
            .map(|parsed| parsed.command)
            .map_err(|e| DiagnosticError::InvalidArguments {
                command: name.to_string(),
                detail: first_line(&e.to_string()),
            })
    }
}

/// Serves the diagnostic commands from borrowed adapter state
#[derive(Debug, Clone, Copy)]
pub struct DiagnosticCommandHandler<'a> {
    counters: &'a CallbackCounters,
    channel_cache: &'a ChannelInfoCache,
}

impl<'a> DiagnosticCommandHandler<'a> {
    pub fn new(counters: &'a CallbackCounters, channel_cache: &'a ChannelInfoCache) -> Self {
        Self {
            counters,
            channel_cache,
        }
    }

    /// Parse and run a command, returning the shell-style result code
    pub fn on_command<S, O, E>(&self, args: &[S], out: &mut O, err: &mut E) -> i32
    where
        S: AsRef<str>,
        O: Write,
        E: Write,
    {
        let result = DiagnosticCommand::parse(args).and_then(|command| self.execute(&command, out));

        match result {
            Ok(()) => COMMAND_SUCCESS,
            Err(e) => {
                debug!(error = %e, "native_cb command failed");
                // Nothing left to report to if the err writer itself fails.
                let _ = writeln!(err, "{e}");
                COMMAND_FAILURE
            }
        }
    }

    pub fn execute<W: Write>(
        &self,
        command: &DiagnosticCommand,
        out: &mut W,
    ) -> Result<(), DiagnosticError> {
        let rendered = match command {
            DiagnosticCommand::GetCbCount { reset } => {
                let snapshot = if *reset {
                    self.counters.drain()
                } else {
                    self.counters.snapshot()
                };
                serde_json::to_string(&snapshot)?
            }
            DiagnosticCommand::GetChannelInfo => {
                serde_json::to_string(&self.channel_cache.snapshot())?
            }
        };

        writeln!(out, "{rendered}")?;
        Ok(())
    }

    pub fn help<W: Write>(out: &mut W) -> io::Result<()> {
        writeln!(out, "  get_cb_count [--reset]: gets the number of callbacks (and optionally reset count)")?;
        writeln!(out, "  get_channel_info: prints out existing NDP channel info")?;
        Ok(())
    }
}

fn first_line(message: &str) -> String {
    let line = message.lines().next().unwrap_or_default();
    line.strip_prefix("error: ").unwrap_or(line).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(&["get_cb_count"], DiagnosticCommand::GetCbCount { reset: false })]
    #[case(&["get_cb_count", "--reset"], DiagnosticCommand::GetCbCount { reset: true })]
    #[case(&["get_channel_info"], DiagnosticCommand::GetChannelInfo)]
    fn test_parse_known_commands(#[case] args: &[&str], #[case] expected: DiagnosticCommand) {
        assert_eq!(DiagnosticCommand::parse(args).unwrap(), expected);
    }

    #[test]
    fn test_parse_unknown_command() {
        let err = DiagnosticCommand::parse(&["get_everything"]).unwrap_err();
        assert!(matches!(err, DiagnosticError::UnknownCommand(ref name) if name == "get_everything"));
    }

    #[test]
    fn test_parse_missing_command() {
        let args: [&str; 0] = [];
        assert!(matches!(
            DiagnosticCommand::parse(&args),
            Err(DiagnosticError::MissingCommand)
        ));
    }

    #[rstest]
    #[case(&["get_cb_count", "--all"])]
    #[case(&["get_cb_count", "--help"])]
    #[case(&["get_channel_info", "--reset"])]
    fn test_parse_unknown_option(#[case] args: &[&str]) {
        let err = DiagnosticCommand::parse(args).unwrap_err();
        match err {
            DiagnosticError::InvalidArguments { command, .. } => assert_eq!(command, args[0]),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_help_lists_both_commands() {
        let mut out = Vec::new();
        DiagnosticCommandHandler::help(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("get_cb_count [--reset]"));
        assert!(text.contains("get_channel_info"));
    }

    #[test]
    fn test_first_line_strips_prefix() {
        assert_eq!(
            first_line("error: unexpected argument '--all' found\n\nUsage: ..."),
            "unexpected argument '--all' found"
        );
    }
}

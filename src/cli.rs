use clap::{Args, Parser};
use std::time::Duration;

use crate::Result;

/// Default length of the sleep every fixture ends in
pub const DEFAULT_SLEEP_SECS: u64 = 30;

/// Options shared by every fixture
#[derive(Args, Debug, Clone)]
pub struct SleepArgs {
    /// How long to sleep before giving up on being killed (seconds)
    #[arg(long, default_value_t = DEFAULT_SLEEP_SECS)]
    pub sleep_secs: u64,
}

/// Writes interleaved bytes to stdout and stderr, then sleeps.
///
/// Reads one line from stdin: `<common> <extra-stdout> <extra-stderr>`.
#[derive(Parser, Debug)]
#[command(name = "mixed-output-sleep")]
#[command(about = "Writes interleaved bytes to stdout and stderr, then sleeps")]
#[command(version)]
pub struct MixedOutputCli {
    #[command(flatten)]
    pub sleep: SleepArgs,
}

/// Sleeps until SIGTERM arrives or the timer runs out
#[derive(Parser, Debug)]
#[command(about = "Sleeps until SIGTERM arrives or the timer runs out")]
#[command(version)]
pub struct CatcherCli {
    #[command(flatten)]
    pub sleep: SleepArgs,
}

/// Resolved configuration for a fixture run
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Time spent in the final sleep
    pub sleep: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sleep: Duration::from_secs(DEFAULT_SLEEP_SECS),
        }
    }
}

impl Config {
    /// Convert parsed sleep arguments into configuration
    pub fn from_args(args: SleepArgs) -> Result<Self> {
        Ok(Config {
            sleep: Duration::from_secs(args.sleep_secs),
        })
    }

    pub fn from_mixed_output_cli(cli: MixedOutputCli) -> Result<Self> {
        Self::from_args(cli.sleep)
    }

    pub fn from_catcher_cli(cli: CatcherCli) -> Result<Self> {
        Self::from_args(cli.sleep)
    }
}

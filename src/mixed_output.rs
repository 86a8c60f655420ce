//! Mixed-output emitter.
//!
//! Writes a run of `.` to both standard streams, flushes them, writes stream
//! specific runs of `+`, flushes again and then sleeps until killed. A harness
//! uses it to check how it captures and interleaves the two streams.

use super::Result;
use crate::cli::Config;

use eyre::{bail, WrapErr};
use std::io::{self, BufRead, Read, Write};
use std::str::FromStr;
use tracing::{debug, info};

/// Byte written to both streams before the first flush
pub const COMMON_BYTE: u8 = b'.';
/// Byte written to each stream after the first flush
pub const EXTRA_BYTE: u8 = b'+';

/// Byte counts read from the input line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreamCounts {
    /// Number of `.` written to both stdout and stderr
    pub common: u64,
    /// Number of `+` written to stdout only
    pub stdout_extra: u64,
    /// Number of `+` written to stderr only
    pub stderr_extra: u64,
}

impl StreamCounts {
    pub fn stdout_len(&self) -> u64 {
        self.common + self.stdout_extra
    }

    pub fn stderr_len(&self) -> u64 {
        self.common + self.stderr_extra
    }
}

impl FromStr for StreamCounts {
    type Err = eyre::Report;

    fn from_str(line: &str) -> Result<Self> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let [common, stdout_extra, stderr_extra] = tokens.as_slice() else {
            bail!(
                "expected 3 integers (common, stdout, stderr), got {} in {:?}",
                tokens.len(),
                line.trim_end()
            );
        };

        Ok(StreamCounts {
            common: parse_count("common byte count", common)?,
            stdout_extra: parse_count("stdout byte count", stdout_extra)?,
            stderr_extra: parse_count("stderr byte count", stderr_extra)?,
        })
    }
}

fn parse_count(what: &str, token: &str) -> Result<u64> {
    token
        .parse::<u64>()
        .wrap_err_with(|| format!("invalid {what}: {token:?}"))
}

/// Parse one input line into stream counts
pub fn parse_counts(line: &str) -> Result<StreamCounts> {
    line.parse()
}

/// Read the first line of `input` and parse it. EOF is an error.
pub fn read_counts<R: BufRead>(mut input: R) -> Result<StreamCounts> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .wrap_err("failed to read counts from stdin")?;
    if read == 0 {
        bail!("no input: expected one line with 3 integers");
    }
    parse_counts(&line)
}

/// Write `count` copies of `byte` without materializing the whole run
fn write_run<W: Write>(writer: &mut W, byte: u8, count: u64) -> io::Result<u64> {
    io::copy(&mut io::repeat(byte).take(count), writer)
}

/// Emit both byte runs with a flush of each stream after each phase.
///
/// Order: common stdout, common stderr, flush stdout, flush stderr, extra
/// stdout, extra stderr, flush stdout, flush stderr.
pub fn emit<O: Write, E: Write>(counts: &StreamCounts, stdout: &mut O, stderr: &mut E) -> Result<()> {
    write_run(stdout, COMMON_BYTE, counts.common).wrap_err("failed writing common bytes to stdout")?;
    write_run(stderr, COMMON_BYTE, counts.common).wrap_err("failed writing common bytes to stderr")?;
    stdout.flush()?;
    stderr.flush()?;
    debug!("flushed {} common bytes on both streams", counts.common);

    write_run(stdout, EXTRA_BYTE, counts.stdout_extra).wrap_err("failed writing extra bytes to stdout")?;
    write_run(stderr, EXTRA_BYTE, counts.stderr_extra).wrap_err("failed writing extra bytes to stderr")?;
    stdout.flush()?;
    stderr.flush()?;
    debug!(
        "flushed {} extra stdout bytes and {} extra stderr bytes",
        counts.stdout_extra, counts.stderr_extra
    );

    Ok(())
}

/// Run the fixture against the process' real standard streams
pub async fn run(config: &Config) -> Result<()> {
    let counts = read_counts(io::stdin().lock())?;
    info!("emitting mixed output: {:?}", counts);

    {
        let mut stdout = io::stdout().lock();
        let mut stderr = io::stderr().lock();
        emit(&counts, &mut stdout, &mut stderr)?;
    }

    info!("output written, sleeping for {:?}", config.sleep);
    tokio::time::sleep(config.sleep).await;
    debug!("sleep finished without being killed");
    Ok(())
}

use crate::integration::infrastructure::*;
use anyhow::Result;
use nix::sys::signal::Signal;
use std::time::Duration;

const ANNOUNCEMENT: &str = "Sleep 30 seconds\n";

/// Spawn a catcher, wait until it announced the sleep, then send `signal`
async fn signal_while_sleeping(fixture: Fixture, signal: Signal) -> Result<ProcessOutput> {
    let mut harness = ProcessTestHarness::new()?;
    let mut process = harness.spawn_fixture(fixture, &[], None).await?;

    // The handler is installed before the announcement is printed
    process
        .wait_for_stdout(ANNOUNCEMENT, Duration::from_secs(5))
        .await?;
    assert!(process.is_running(), "{:?} should be sleeping", fixture);

    process.send_signal(signal)?;
    process.finish(Duration::from_secs(5)).await
}

async fn run_to_timeout(fixture: Fixture) -> Result<ProcessOutput> {
    let mut harness = ProcessTestHarness::new()?;
    let process = harness
        .spawn_fixture(fixture, &["--sleep-secs", "1"], None)
        .await?;
    process.finish(Duration::from_secs(10)).await
}

#[tokio::test]
async fn test_exit_error_catcher_on_sigterm() -> Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let output = signal_while_sleeping(Fixture::CatcherExitError, Signal::SIGTERM).await?;

    assert_exit_code(output.status, 1, "sigterm-catcher-exit-error");
    assert!(output.stdout_text().contains("RECEIVED"));
    assert_eq!(output.stdout_text(), "Sleep 30 seconds\n15 RECEIVED\n");
    assert!(output.stderr.is_empty(), "stderr: {:?}", output.stderr_text());
    assert!(
        output.runtime < Duration::from_secs(10),
        "signal should cut the sleep short, took {:?}",
        output.runtime
    );
    Ok(())
}

#[tokio::test]
async fn test_exit_success_catcher_on_sigterm() -> Result<()> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();

    let output = signal_while_sleeping(Fixture::CatcherExitSuccess, Signal::SIGTERM).await?;

    assert_exit_code(output.status, 0, "sigterm-catcher-exit-success");
    assert_eq!(output.stdout_text(), "Sleep 30 seconds\n15 RECEIVED\n");
    assert!(output.stderr.is_empty(), "stderr: {:?}", output.stderr_text());
    Ok(())
}

#[tokio::test]
async fn test_exit_error_catcher_times_out_cleanly() -> Result<()> {
    let output = run_to_timeout(Fixture::CatcherExitError).await?;

    assert_exit_code(output.status, 0, "sigterm-catcher-exit-error");
    assert_eq!(output.stdout_text(), "Sleep 1 seconds\nDone sleeping\n");
    assert!(output.runtime >= Duration::from_secs(1));
    Ok(())
}

#[tokio::test]
async fn test_exit_success_catcher_times_out_cleanly() -> Result<()> {
    let output = run_to_timeout(Fixture::CatcherExitSuccess).await?;

    assert_exit_code(output.status, 0, "sigterm-catcher-exit-success");
    assert_eq!(output.stdout_text(), "Sleep 1 seconds\nDone sleeping\n");
    Ok(())
}

#[tokio::test]
async fn test_only_sigterm_is_caught() -> Result<()> {
    for fixture in [Fixture::CatcherExitError, Fixture::CatcherExitSuccess] {
        let output = signal_while_sleeping(fixture, Signal::SIGINT).await?;

        assert_killed_by(output.status, Signal::SIGINT, "catcher");
        assert_eq!(output.stdout_text(), ANNOUNCEMENT);
    }
    Ok(())
}

#[tokio::test]
async fn test_reruns_are_identical() -> Result<()> {
    for fixture in [Fixture::CatcherExitError, Fixture::CatcherExitSuccess] {
        let first = signal_while_sleeping(fixture, Signal::SIGTERM).await?;
        let second = signal_while_sleeping(fixture, Signal::SIGTERM).await?;

        assert_eq!(first.status.code(), second.status.code());
        assert_eq!(first.stdout, second.stdout);
    }
    Ok(())
}

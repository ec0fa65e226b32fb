#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]
#![cfg_attr(not(windows), allow(dead_code))]

//! hotcorner: background hot corner daemon for Windows
//!
//! Rest the pointer in the bottom-left corner of the screen for a moment
//! and Task View opens, as if Win+Tab had been pressed. Ctrl+Alt+C quits.
//!
//! - A low-level mouse hook drives a Cold/Hot corner state machine
//! - Entering the corner starts a dwell worker, leaving cancels it
//! - A worker that survives the dwell injects the chord via SendInput
//!
//! Nothing is configurable at runtime; see `config.rs`.

mod config;
mod events;
mod hotkey;
mod lifecycle;
mod platform;
mod state;
mod worker;

use std::process::ExitCode;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "hotcorner starting");

    let config = Config::builtin();
    info!(?config, "configuration loaded");

    run(config).await
}

#[cfg(windows)]
async fn run(config: Config) -> Result<ExitCode> {
    use std::sync::Arc;

    use anyhow::Context;
    use tokio::sync::broadcast;
    use tracing::warn;

    use crate::events::{report_events, CornerEvent};
    use crate::hotkey::HookThread;
    use crate::lifecycle::{LoopExit, ShutdownSignal};
    use crate::platform::windows::{desktop_bounds, Win32Input};
    use crate::state::{CornerMonitor, HotRegion};
    use crate::worker::DebounceSpawner;

    let desktop = desktop_bounds().context("failed to read desktop bounds")?;
    let region = HotRegion::from_desktop(desktop, config.corner);
    info!(?desktop, region = ?region.bounds(), "hot corner computed");

    // Create shutdown signal handler
    let shutdown = ShutdownSignal::new();

    // Monitor and workers -> event reporter
    let (event_tx, event_rx) = broadcast::channel::<CornerEvent>(64);
    let reporter = tokio::spawn(report_events(event_rx));

    let backend = Arc::new(Win32Input);
    let spawner = DebounceSpawner::new(
        Arc::clone(&backend),
        region,
        config.dwell,
        config.chord,
        event_tx.clone(),
    );
    let monitor = CornerMonitor::new(region, spawner, backend, event_tx);

    let (hook, mut exit_rx) = HookThread::start(monitor, config.exit_hotkey)
        .context("failed to install hot corner hooks")?;

    info!(hotkey = %config.exit_hotkey, "daemon initialized, entering main loop");

    let exit = tokio::select! {
        exit = &mut exit_rx => exit,
        _ = shutdown.wait() => {
            info!("shutdown signal received");
            hook.stop();
            exit_rx.await
        }
    };
    let exit = exit.unwrap_or_else(|_| {
        warn!("hook thread ended without reporting");
        LoopExit::Failed
    });

    // Cleanup
    info!("shutting down...");
    hook.join();

    // The monitor held the last publishers, so the reporter drains and ends
    if let Ok(fired) = reporter.await {
        info!(fired, "hot corner activations this session");
    }

    info!(code = exit.code(), "hotcorner stopped");

    Ok(exit.exit_code())
}

#[cfg(not(windows))]
async fn run(_config: Config) -> Result<ExitCode> {
    anyhow::bail!("hotcorner relies on Win32 input hooks and only runs on Windows")
}

// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Periodic sync loop and shutdown signal handling.

use std::time::Duration;

use redline_config::model::SourceFileConfig;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::orchestrator::{FileOutcome, SyncMode, SyncOrchestrator};

/// Installs handlers for SIGTERM and SIGINT.
///
/// Returns a [`CancellationToken`] that is cancelled when either signal is received.
pub fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let token_clone = token.clone();

    tokio::spawn(async move {
        let ctrl_c = tokio::signal::ctrl_c();

        #[cfg(unix)]
        {
            use tokio::signal::unix::{SignalKind, signal};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = ctrl_c => info!("received SIGINT (Ctrl+C), stopping"),
                        _ = sigterm.recv() => info!("received SIGTERM, stopping"),
                    }
                }
                Err(e) => {
                    warn!(error = %e, "failed to install SIGTERM handler, only Ctrl+C will stop");
                    let _ = ctrl_c.await;
                    info!("received SIGINT (Ctrl+C), stopping");
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = ctrl_c.await;
            info!("received Ctrl+C, stopping");
        }

        token_clone.cancel();
        debug!("shutdown signal handler completed");
    });

    token
}

/// Watch loop settings from the `[sync]` section.
#[derive(Debug, Clone, Copy)]
pub struct WatchSettings {
    pub interval: Duration,
    pub sync_on_start: bool,
}

impl WatchSettings {
    pub fn from_minutes(interval_minutes: u64, sync_on_start: bool) -> Self {
        Self {
            interval: Duration::from_secs(interval_minutes.max(1).saturating_mul(60)),
            sync_on_start,
        }
    }
}

/// Runs scheduled passes until `cancel` fires. Returns the number of passes run.
///
/// A tick that comes due while a pass is running is dropped, not queued.
/// Cancellation is only observed between passes so a running pass always
/// finishes. Pass-level failures are logged and the loop keeps going.
pub async fn watch(
    orchestrator: &mut SyncOrchestrator,
    files: &mut [SourceFileConfig],
    settings: WatchSettings,
    cancel: CancellationToken,
) -> usize {
    let mut interval = tokio::time::interval(settings.interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // The first tick completes immediately.
    interval.tick().await;

    let mut passes = 0;
    if settings.sync_on_start && !cancel.is_cancelled() {
        run_scheduled(orchestrator, files).await;
        passes += 1;
    }

    info!(
        interval_secs = settings.interval.as_secs(),
        "watching for comment changes"
    );
    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(passes, "watch loop stopped");
                break;
            }
            _ = interval.tick() => {
                run_scheduled(orchestrator, files).await;
                passes += 1;
            }
        }
    }
    passes
}

async fn run_scheduled(orchestrator: &mut SyncOrchestrator, files: &mut [SourceFileConfig]) {
    match orchestrator.run_pass(files, SyncMode::Scheduled).await {
        Ok(report) => {
            for file in report.failed() {
                if let FileOutcome::Failed { message, auth } = &file.outcome {
                    warn!(file = %file.id, auth, error = %message, "file failed in scheduled pass");
                }
            }
        }
        Err(e) => {
            warn!(error = %e, "scheduled sync pass failed (non-fatal)");
        }
    }
}

// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `redline sync` and `redline watch`.

use std::process::ExitCode;
use std::sync::Arc;

use redline_config::RedlineConfig;
use redline_core::{Clock, RedlineError, SystemClock};
use redline_frames::FrameResolver;
use redline_remote::FigmaRemote;
use redline_store::MarkdownStore;
use redline_sync::{
    FileOutcome, SyncMode, SyncOrchestrator, SyncReport, SyncSettings, WatchSettings,
};
use tracing::info;

use crate::CommandResult;

/// Wires the REST providers, the Markdown store, and the frame resolver.
pub fn build_orchestrator(config: &RedlineConfig) -> Result<SyncOrchestrator, RedlineError> {
    let remote = Arc::new(FigmaRemote::new(config)?);
    let store = Arc::new(MarkdownStore::new(&config.sync.documents_root));
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let resolver = FrameResolver::new(remote.clone(), &config.frames, clock.clone());

    Ok(SyncOrchestrator::new(
        remote,
        store,
        resolver,
        clock,
        SyncSettings::from(&config.sync),
    ))
}

pub async fn run_once(mut config: RedlineConfig, manual: bool) -> CommandResult {
    let mut orchestrator = build_orchestrator(&config)?;
    let mode = if manual {
        SyncMode::Manual
    } else {
        SyncMode::Scheduled
    };

    if config.files.is_empty() {
        println!("no files configured; add one with `redline files add <id> <name> <file_key>`");
        return Ok(ExitCode::SUCCESS);
    }

    let report = orchestrator.run_pass(&mut config.files, mode).await?;
    print_report(&report);

    Ok(if report.has_failures() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}

pub async fn run_watch(mut config: RedlineConfig) -> CommandResult {
    let mut orchestrator = build_orchestrator(&config)?;
    let settings =
        WatchSettings::from_minutes(config.sync.interval_minutes, config.sync.sync_on_start);
    let cancel = redline_sync::install_signal_handler();

    let passes = redline_sync::watch(&mut orchestrator, &mut config.files, settings, cancel).await;
    info!(passes, "redline stopped");
    Ok(ExitCode::SUCCESS)
}

fn print_report(report: &SyncReport) {
    for file in &report.files {
        let status = match &file.outcome {
            FileOutcome::Synced {
                path,
                total,
                open,
                resolved,
            } => format!(
                "synced    {} ({total} comments, {open} open, {resolved} resolved)",
                path.display()
            ),
            FileOutcome::Archived { path } => format!("archived  {}", path.display()),
            FileOutcome::Skipped => "skipped   (disabled)".to_string(),
            FileOutcome::Failed { message, auth } => {
                let hint = if *auth {
                    " [check remote.access_token]"
                } else {
                    ""
                };
                format!("failed    {message}{hint}")
            }
        };
        println!("{:<16} {status}", file.id);
    }
}

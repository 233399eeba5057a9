// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `redline resolve`: run the frame resolver once for a single anchor.

use std::process::ExitCode;
use std::sync::Arc;

use redline_config::RedlineConfig;
use redline_core::{Point, SystemClock};
use redline_frames::FrameResolver;
use redline_remote::FigmaRemote;

use crate::CommandResult;

pub async fn run(
    config: &RedlineConfig,
    file_key: &str,
    node: Option<&str>,
    point: Option<(f64, f64)>,
) -> CommandResult {
    let remote = Arc::new(FigmaRemote::new(config)?);
    let mut resolver = FrameResolver::new(remote, &config.frames, Arc::new(SystemClock));
    let point = point.map(|(x, y)| Point::new(x, y));

    match resolver.resolve(file_key, node, point).await {
        Some(info) => {
            println!("node:  {}", info.node_id);
            println!("frame: {}", info.name);
            println!("path:  {}", info.full_path);
            println!("page:  {}", info.page_name);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("no frame found for this anchor");
            Ok(ExitCode::FAILURE)
        }
    }
}

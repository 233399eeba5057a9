// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `redline files`: list and edit the configured design files.

use std::path::Path;
use std::process::ExitCode;

use redline_config::{RedlineConfig, SourceFileConfig, files};

use crate::{CommandResult, FilesCommand};

pub fn run(config: &RedlineConfig, config_file: &Path, action: FilesCommand) -> CommandResult {
    match action {
        FilesCommand::List => {
            if config.files.is_empty() {
                println!("no files configured");
            }
            for file in &config.files {
                let state = if file.enabled { "enabled" } else { "disabled" };
                println!("{:<16} {:<9} {:<24} {}", file.id, state, file.file_key, file.name);
            }
            Ok(ExitCode::SUCCESS)
        }
        FilesCommand::Add {
            id,
            name,
            file_key,
            disabled,
        } => {
            let mut file = SourceFileConfig::new(id, name, file_key);
            file.enabled = !disabled;
            files::add_file(config_file, &file)?;
            println!("added `{}` to {}", file.id, config_file.display());
            Ok(ExitCode::SUCCESS)
        }
        FilesCommand::Remove { id } => {
            report(files::remove_file(config_file, &id)?, &id, "removed", config_file)
        }
        FilesCommand::Enable { id } => report(
            files::set_file_enabled(config_file, &id, true)?,
            &id,
            "enabled",
            config_file,
        ),
        FilesCommand::Disable { id } => report(
            files::set_file_enabled(config_file, &id, false)?,
            &id,
            "disabled",
            config_file,
        ),
    }
}

fn report(found: bool, id: &str, verb: &str, config_file: &Path) -> CommandResult {
    if found {
        println!("{verb} `{id}` in {}", config_file.display());
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("no file with id `{id}` in {}", config_file.display());
        Ok(ExitCode::FAILURE)
    }
}

// SPDX-FileCopyrightText: 2026 Redline Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-place editing of the `[[files]]` array of a config file.
//!
//! Edits go through `toml::Value` so every other key in the file, including
//! secrets the user chose to keep there, is written back untouched. Only the
//! serializable fields of [`SourceFileConfig`] are ever written.

use std::path::Path;

use redline_core::RedlineError;
use tracing::info;

use crate::model::SourceFileConfig;

/// Append a source file to the config at `path`, creating the file if needed.
///
/// Fails if a file with the same `id` or `file_key` is already configured.
pub fn add_file(path: &Path, file: &SourceFileConfig) -> Result<(), RedlineError> {
    let mut doc = read_document(path)?;
    let files = files_array(&mut doc)?;

    let clash = files.iter().any(|entry| {
        field(entry, "id") == Some(file.id.as_str())
            || field(entry, "file_key") == Some(file.file_key.as_str())
    });
    if clash {
        return Err(RedlineError::Config(format!(
            "a file with id `{}` or file_key `{}` is already configured",
            file.id, file.file_key
        )));
    }

    let entry = toml::Value::try_from(file)
        .map_err(|e| RedlineError::Config(format!("failed to serialize file entry: {e}")))?;
    files.push(entry);
    write_document(path, &doc)?;
    info!(path = %path.display(), id = %file.id, "file added to config");
    Ok(())
}

/// Remove the source file with `id`. Returns `false` if it was not configured.
pub fn remove_file(path: &Path, id: &str) -> Result<bool, RedlineError> {
    let mut doc = read_document(path)?;
    let files = files_array(&mut doc)?;

    let before = files.len();
    files.retain(|entry| field(entry, "id") != Some(id));
    if files.len() == before {
        return Ok(false);
    }

    write_document(path, &doc)?;
    info!(path = %path.display(), id, "file removed from config");
    Ok(true)
}

/// Set the `enabled` flag of the source file with `id`.
///
/// Returns `false` if no such file is configured.
pub fn set_file_enabled(path: &Path, id: &str, enabled: bool) -> Result<bool, RedlineError> {
    let mut doc = read_document(path)?;
    let files = files_array(&mut doc)?;

    let Some(table) = files
        .iter_mut()
        .find(|entry| field(entry, "id") == Some(id))
        .and_then(|entry| entry.as_table_mut())
    else {
        return Ok(false);
    };
    table.insert("enabled".to_string(), toml::Value::Boolean(enabled));

    write_document(path, &doc)?;
    info!(path = %path.display(), id, enabled, "file toggled in config");
    Ok(true)
}

fn read_document(path: &Path) -> Result<toml::Table, RedlineError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(e.into()),
    };
    content
        .parse::<toml::Table>()
        .map_err(|e| RedlineError::Config(format!("{}: {e}", path.display())))
}

fn write_document(path: &Path, doc: &toml::Table) -> Result<(), RedlineError> {
    let content = toml::to_string_pretty(doc)
        .map_err(|e| RedlineError::Config(format!("failed to serialize config: {e}")))?;
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

fn files_array(doc: &mut toml::Table) -> Result<&mut Vec<toml::Value>, RedlineError> {
    doc.entry("files")
        .or_insert_with(|| toml::Value::Array(Vec::new()))
        .as_array_mut()
        .ok_or_else(|| RedlineError::Config("`files` must be an array of tables".to_string()))
}

fn field<'a>(entry: &'a toml::Value, key: &str) -> Option<&'a str> {
    entry.get(key).and_then(|v| v.as_str())
}

//! Workflow output helper.
//!
//! Writes compact single-line JSON to stdout, and appends `json=<...>` to
//! `GITHUB_OUTPUT` when set so later workflow steps can read the result.

use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::domain::AppError;

pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Write handler output in the canonical format.
///
/// # Errors
/// Returns an error if JSON serialization fails or the output file cannot be written.
pub fn write_workflow_output<T: Serialize>(output: &T) -> Result<(), AppError> {
    let json = to_single_line_json(output)?;
    println!("{}", json);

    if let Some(path) = std::env::var_os(GITHUB_OUTPUT_ENV) {
        append_github_output(Path::new(&path), &json)?;
    }
    Ok(())
}

fn to_single_line_json<T: Serialize>(output: &T) -> Result<String, AppError> {
    let json = serde_json::to_string(output).map_err(|e| AppError::Io(e.into()))?;
    debug_assert!(!json.contains('\n'), "workflow output JSON must be single-line");
    Ok(json)
}

fn append_github_output(path: &Path, json: &str) -> Result<(), AppError> {
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(path).map_err(|e| {
        AppError::config_error(format!("Failed to open {}: {}", GITHUB_OUTPUT_ENV, e))
    })?;
    writeln!(file, "json={}", json)?;
    Ok(())
}

//! Output formatting module

mod json;
mod text;

use miette::Result;

use crate::cli::OutputFormat;
use crate::commands::lint::FileReport;

/// Prints `reports`. Returns whether any file has messages.
pub fn output_results(reports: &[FileReport], format: OutputFormat) -> Result<bool> {
    let has_problems = reports.iter().any(|r| !r.messages.is_empty());

    match format {
        OutputFormat::Json => json::output_json(reports)?,
        OutputFormat::Text => text::output_text(reports),
    }

    Ok(has_problems)
}

//! Lint command implementation

use std::fs;
use std::path::{Path, PathBuf};

use miette::{IntoDiagnostic, Result};
use tracing::{debug, info};

use kindlint_core::{Engine, Filetype, Message, Settings};

use crate::cli::{Cli, OutputFormat};
use crate::output::output_results;

/// Messages found in one file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub messages: Vec<Message>,
}

/// Lints `files` and prints the results. Returns whether anything was found
/// or any file could not be linted.
pub fn run_lint(cli: &Cli, files: &[PathBuf], format: OutputFormat) -> Result<bool> {
    let settings = if let Some(ref path) = cli.config {
        Settings::from_file(path).into_diagnostic()?
    } else {
        find_config()?
    };

    let engine = Engine::new(settings).into_diagnostic()?;

    let mut reports = Vec::new();
    let mut failures = Vec::new();
    for path in files {
        match lint_file(&engine, path) {
            Ok(report) => reports.push(report),
            Err(e) => failures.push((path.clone(), e)),
        }
    }

    if !failures.is_empty() {
        eprintln!("\n{} file(s) failed to lint:", failures.len());
        for (path, error) in &failures {
            eprintln!("  {}: {}", path.display(), error);
        }
    }

    let has_problems = output_results(&reports, format)?;

    Ok(has_problems || !failures.is_empty())
}

fn lint_file(engine: &Engine, path: &Path) -> std::result::Result<FileReport, String> {
    let text = fs::read_to_string(path).map_err(|e| e.to_string())?;
    let filetype = Filetype::from_path(path);
    debug!("Linting {} as {}", path.display(), filetype);

    let report = engine
        .check(&text, filetype.profile())
        .map_err(|e| e.to_string())?;

    Ok(FileReport {
        path: path.to_path_buf(),
        messages: report.messages,
    })
}

pub fn find_config() -> Result<Settings> {
    if let Some(path) = Settings::discover(".") {
        info!("Using config: {}", path.display());
        return Settings::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(Settings::default())
}

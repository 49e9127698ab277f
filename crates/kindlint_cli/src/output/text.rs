//! Text output formatter

use kindlint_core::Message;

use crate::commands::lint::FileReport;

pub fn output_text(reports: &[FileReport]) {
    for report in reports {
        for message in &report.messages {
            let (line, column) = start_of(message);
            println!(
                "{}:{}:{} {} {}",
                report.path.display(),
                line,
                column,
                severity(message),
                message.reason
            );
        }
    }

    let total_problems: usize = reports.iter().map(|r| r.messages.len()).sum();
    println!();
    println!(
        "Checked {} files, found {} problems",
        reports.len(),
        total_problems
    );
}

fn severity(message: &Message) -> &'static str {
    if message.fatal == Some(true) {
        "error"
    } else {
        "warning"
    }
}

/// 1-based start of a message, falling back to its flat fields, then 1.
fn start_of(message: &Message) -> (u32, u32) {
    let line = message.location.start.line.or(message.line).unwrap_or(1);
    let column = message.location.start.column.or(message.column).unwrap_or(1);
    (line, column)
}

//! Summary rendering and exit status for a finished run.

use cleancopy_engine::CopyStats;
use humansize::{format_size, BINARY};
use std::fmt::Write;
use std::time::Duration;

/// No errors recorded.
pub const EXIT_OK: i32 = 0;
/// The run finished but recorded at least one error.
pub const EXIT_ERRORS: i32 = 1;
/// Bad arguments or unusable paths; nothing was copied.
pub const EXIT_USAGE: i32 = 2;
/// Stopped by Ctrl-C.
pub const EXIT_INTERRUPTED: i32 = 130;

pub fn exit_code(stats: &CopyStats) -> i32 {
    if stats.interrupted() {
        EXIT_INTERRUPTED
    } else if stats.has_errors() {
        EXIT_ERRORS
    } else {
        EXIT_OK
    }
}

pub fn format_bytes(bytes: u64) -> String {
    format_size(bytes, BINARY)
}

pub fn format_duration(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;

    if hours > 0 {
        format!("{}h {}m {}s", hours, mins, secs % 60)
    } else if mins > 0 {
        format!("{}m {}s", mins, secs % 60)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Human-readable summary: headline, counters, numbered error list.
pub fn render_summary(stats: &CopyStats) -> String {
    let headline = if stats.interrupted() {
        "Copy interrupted."
    } else if stats.is_fatal() {
        "Copy failed."
    } else if stats.has_errors() {
        "Copy finished with errors."
    } else {
        "Copy complete."
    };

    let mut out = String::new();
    let _ = writeln!(out, "{}", headline);
    let _ = writeln!(out, "  Files copied:        {}", stats.files_copied());
    let _ = writeln!(out, "  Directories created: {}", stats.directories_created());
    let _ = writeln!(out, "  Bytes copied:        {}", format_bytes(stats.bytes_copied()));
    let _ = writeln!(out, "  Duration:            {}", format_duration(stats.duration()));

    if stats.has_errors() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Errors ({}):", stats.errors().len());
        for (i, record) in stats.errors().iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, record);
        }
    }
    out
}

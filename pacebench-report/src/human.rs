//! Human-Readable Output
//!
//! One line per benchmark case:
//!
//! ```text
//! sleep: avg 57.084ms (18 iterations)
//! sleep 20: avg 20.071ms (50 iterations)
//! ```

use crate::report::{Record, Report};

/// Format a single record as a display line (no trailing newline)
pub fn format_line(record: &Record) -> String {
    match &record.argument {
        Some(argument) => format!(
            "{} {}: avg {:.3}{} ({} iterations)",
            record.name, argument, record.average, record.unit, record.iterations
        ),
        None => format!(
            "{}: avg {:.3}{} ({} iterations)",
            record.name, record.average, record.unit, record.iterations
        ),
    }
}

/// Format every record of a report, one line each
pub fn format_human_output(report: &Report) -> String {
    let mut output = String::new();
    for record in &report.results {
        output.push_str(&format_line(record));
        output.push('\n');
    }
    output
}

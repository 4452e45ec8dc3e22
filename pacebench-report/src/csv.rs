//! CSV Output

use crate::report::Report;

/// Generate a CSV report with one row per record
pub fn generate_csv_report(report: &Report) -> String {
    let mut output = String::from("name,argument,average,unit,average_ns,iterations\n");

    for record in &report.results {
        output.push_str(&format!(
            "{},{},{:.3},{},{:.3},{}\n",
            escape_csv(&record.name),
            escape_csv(record.argument.as_deref().unwrap_or("")),
            record.average,
            record.unit,
            record.average_ns,
            record.iterations
        ));
    }

    output
}

fn escape_csv(field: &str) -> String {
    if field.contains([',', '"', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

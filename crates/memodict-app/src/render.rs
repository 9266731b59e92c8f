use colored::Colorize;
use memodict_store::{Entries, Entry};

const HEADERS: [&str; 4] = ["id", "lemma", "status", "freq"];

fn cells(id: &str, entry: &Entry) -> [String; 4] {
    [
        id.to_string(),
        entry.lemma.clone().unwrap_or_default(),
        entry.status().to_string(),
        entry.freq.as_ref().map(ToString::to_string).unwrap_or_default(),
    ]
}

/// Render rows as a plain text table, one line per entry
///
/// Flagged rows get a `*` marker, and a yellow background when `colorize`
/// is set.
pub fn render_table(rows: &Entries, colorize: bool) -> String {
    if rows.is_empty() {
        return "No entries\n".to_string();
    }

    let lines: Vec<(bool, [String; 4])> = rows
        .iter()
        .map(|(id, entry)| (entry.is_flagged(), cells(id, entry)))
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for (_, row) in &lines {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let format_line = |marker: &str, row: &[String]| {
        let padded: Vec<String> = row
            .iter()
            .zip(widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect();
        format!("{marker} {}", padded.join("  ")).trim_end().to_string()
    };

    let headers = HEADERS.map(str::to_string);
    let mut out = format_line(" ", &headers[..]);
    out.push('\n');

    for (flagged, row) in &lines {
        let line = if *flagged {
            let line = format_line("*", &row[..]);
            if colorize {
                line.black().on_yellow().to_string()
            } else {
                line
            }
        } else {
            format_line(" ", &row[..])
        };
        out.push_str(&line);
        out.push('\n');
    }

    out
}

/// Acknowledgement shown after a successful toggle
pub fn flag_ack(id: &str, entry: &Entry) -> String {
    format!("Record {id} updated successfully! Status is now \"{}\"", entry.status())
}

pub fn delete_ack(id: &str) -> String {
    format!("Record {id} deleted successfully!")
}

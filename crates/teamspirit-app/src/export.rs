//! Read-only export rendering for draw history and grouping results.
//!
//! The engines expose their data; this module turns it into the two
//! shapes hosts share: a human-readable text block (clipboard) and a
//! delimited table (spreadsheet import). Fields are quoted only when they
//! contain the delimiter or the quote character.

use std::fmt::Write as _;

use teamspirit_core::draw::DrawHistory;
use teamspirit_types::Group;

/// Render groups as a text block:
///
/// ```text
/// Group 1:
/// - Alice Johnson
/// - Bob Smith
///
/// Group 2:
/// ...
/// ```
pub fn groups_to_text(groups: &[Group]) -> String {
    groups
        .iter()
        .map(|group| {
            let members = group
                .members
                .iter()
                .map(|member| format!("- {}", member.name))
                .collect::<Vec<_>>()
                .join("\n");
            format!("Group {}:\n{members}", group.id)
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Render groups as a two-column delimited table with a header row.
pub fn groups_to_csv(groups: &[Group]) -> String {
    let mut out = String::from("Group Number,Member Name\n");
    for group in groups {
        for member in &group.members {
            let _ = writeln!(out, "{},{}", group.id, csv_field(&member.name));
        }
    }
    out
}

/// Render the draw history as a delimited table, most recent first.
///
/// Draws are numbered from the oldest (draw 1) so the numbering stays
/// stable as new wins are prepended.
pub fn history_to_csv(history: &DrawHistory) -> String {
    let mut out = String::from("Draw,Winner,Time\n");
    for (index, record) in history.records().iter().enumerate() {
        let number = history.len().saturating_sub(index);
        let _ = writeln!(
            out,
            "{number},{},{}",
            csv_field(&record.winner.name),
            record.timestamp.to_rfc3339()
        );
    }
    out
}

/// Quote a field when it contains the delimiter or quote character,
/// doubling embedded quotes.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_owned()
    }
}

//! Roster ingestion from plain-text and delimited files.
//!
//! One participant per line. For delimited input the first cell is taken
//! as the name, so a simple one-column or multi-column CSV works the same
//! as a pasted name list. Blank lines and a `name` header (any casing,
//! anywhere in the file) are dropped. Name content is not validated --
//! whatever survives trimming becomes a participant.

use teamspirit_types::Participant;

/// Parse file content into fresh participant records.
///
/// Ids are assigned here, at ingestion time; re-parsing the same file
/// therefore produces distinct participants.
pub fn parse_roster(content: &str) -> Vec<Participant> {
    content.lines().filter_map(parse_line).map(Participant::new).collect()
}

/// Extract the name from one input line, or `None` if the line carries
/// nothing usable.
fn parse_line(line: &str) -> Option<String> {
    let first_cell = line.split(',').next().unwrap_or("").trim();
    if first_cell.is_empty() {
        return None;
    }
    if first_cell.eq_ignore_ascii_case("name") {
        return None;
    }
    Some(first_cell.to_owned())
}

//! Text rendering of identifier lists.

use std::fmt::Write as FmtWrite;

/// Header line of every identifier list file
pub const LIST_HEADER: &str = "[Voice Line IDs]";

/// File name for the identifiers a scenario uses
pub const PRESENT_FILE_NAME: &str = "voices-main.txt";

/// File name for the identifiers a scenario skips
pub const UNUSED_FILE_NAME: &str = "voices-unused.txt";

/// Renders `ids` as a list file: the header, then one decimal id per line
pub fn render_id_list(ids: &[u16]) -> String {
    let mut out = String::with_capacity(LIST_HEADER.len() + 1 + ids.len() * 6);
    out.push_str(LIST_HEADER);
    out.push('\n');
    for id in ids {
        let _ = writeln!(out, "{}", id);
    }
    out
}

/// Renders `ids` on a single line, each followed by a space
pub fn render_inline(ids: &[u16]) -> String {
    let mut out = String::with_capacity(ids.len() * 6);
    for id in ids {
        let _ = write!(out, "{} ", id);
    }
    out
}

//! Section extraction and substitution.
//!
//! # Data Model
//! ```text
//! [General]            ← header: trimmed line equals "[name]"
//! loglevel = notify    ← body
//! dns-server = system  ← body
//!                      ← boundary: empty line, next header, or end of input
//! [Rule]
//! ```
//!
//! # Design Decisions
//! - Documents are split on `\n` into an immutable line slice
//! - Read and replace share one scanner (`scan::locate_section`)
//! - A missing section is a warning, never an error

pub mod scan;

use crate::observability::metrics;

pub use scan::{is_header_line, locate_section};

/// Extract the block of section `name`, header line included.
///
/// Returns an empty string when the section does not exist.
pub fn read_section(document: &str, name: &str) -> String {
    let lines: Vec<&str> = document.split('\n').collect();

    match locate_section(&lines, name) {
        Some(range) => lines[range].join("\n"),
        None => {
            tracing::warn!(section = %name, "Section not found when reading");
            metrics::record_section_missing("read");
            String::new()
        }
    }
}

/// Replace the block of section `name` with `replacement`.
///
/// The header-through-body lines are removed and `replacement` is inserted as
/// a single element in their place before the lines are rejoined with `\n`.
/// Returns `document` unchanged when the section does not exist.
pub fn replace_section(document: &str, replacement: &str, name: &str) -> String {
    let lines: Vec<&str> = document.split('\n').collect();

    let Some(range) = locate_section(&lines, name) else {
        tracing::warn!(section = %name, "Section not found when replacing");
        metrics::record_section_missing("replace");
        return document.to_string();
    };

    let mut spliced: Vec<&str> = Vec::with_capacity(lines.len() - range.len() + 1);
    spliced.extend_from_slice(&lines[..range.start]);
    spliced.push(replacement);
    spliced.extend_from_slice(&lines[range.end..]);
    spliced.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    const REMOTE: &str = "[General]\nloglevel = notify\n\n[Rule]\nDOMAIN,a.com,DIRECT\nFINAL,PROXY\n";

    #[test]
    fn read_returns_header_and_body() {
        assert_eq!(
            read_section(REMOTE, "Rule"),
            "[Rule]\nDOMAIN,a.com,DIRECT\nFINAL,PROXY"
        );
        assert_eq!(read_section(REMOTE, "General"), "[General]\nloglevel = notify");
    }

    #[test]
    fn read_missing_section_is_empty() {
        assert_eq!(read_section(REMOTE, "Proxy"), "");
        assert_eq!(read_section("", "General"), "");
    }

    #[test]
    fn read_header_only_section() {
        assert_eq!(read_section("[a]\n\nbody", "a"), "[a]");
    }

    #[test]
    fn replace_swaps_block_in_place() {
        let local = "#head\n[Rule]\nFINAL,DIRECT\n\n[Host]\nx = 1\n";
        let replaced = replace_section(local, "[Rule]\nDOMAIN,b.com,PROXY", "Rule");
        assert_eq!(replaced, "#head\n[Rule]\nDOMAIN,b.com,PROXY\n\n[Host]\nx = 1\n");
    }

    #[test]
    fn replace_missing_section_returns_input() {
        let local = "[Host]\nx = 1\n";
        assert_eq!(replace_section(local, "[Rule]\nFINAL,DIRECT", "Rule"), local);
    }

    #[test]
    fn replace_with_empty_block_leaves_empty_line() {
        assert_eq!(replace_section("[a]\nstub\n[b]\nkeep", "", "a"), "\n[b]\nkeep");
    }

    #[test]
    fn replace_then_read_round_trips() {
        let local = "[a]\nstub\n\n[b]\nlocal b\n";
        let block = "[b]\nremote one\nremote two";
        let merged = replace_section(local, block, "b");
        assert_eq!(read_section(&merged, "b"), block);
        assert_eq!(read_section(&merged, "a"), "[a]\nstub");
    }

    #[test]
    fn overlay_example() {
        let remote = "[a]\nhello\n\n[b]\nworld\n";
        let local = "[a]\nstub\n";
        let block = read_section(remote, "a");
        assert_eq!(block, "[a]\nhello");
        assert_eq!(replace_section(local, &block, "a"), "[a]\nhello\n");
    }
}

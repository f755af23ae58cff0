//! Line scanner locating a bracketed section.
//!
//! Both reading and replacing go through [`locate_section`] so that a block
//! extracted from one document is spliced over exactly the same shape of
//! block in another.

use std::ops::Range;

/// Scanner state while walking a document's lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    /// Looking for the header line.
    Outside,
    /// Header found at `start`; consuming body lines.
    InSection { start: usize },
}

/// Returns true for a line of the form `[something]`.
///
/// The line is not trimmed. The bracketed text must be non-empty and may not
/// contain `\r`, U+2028 or U+2029.
pub fn is_header_line(line: &str) -> bool {
    let Some(inner) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) else {
        return false;
    };
    !inner.is_empty() && !inner.contains(['\r', '\u{2028}', '\u{2029}'])
}

/// A body ends at an empty line or at the next header line.
fn is_boundary(line: &str) -> bool {
    line.is_empty() || is_header_line(line)
}

/// Find the line range `[header, boundary)` of the first section called `name`.
///
/// The header matches when the line, with trailing whitespace trimmed, equals
/// `[name]`. The range ends before the first empty line or header line after
/// it, or at the end of `lines`.
pub fn locate_section(lines: &[&str], name: &str) -> Option<Range<usize>> {
    let header = format!("[{name}]");
    let mut state = ScanState::Outside;

    for (i, line) in lines.iter().enumerate() {
        match state {
            ScanState::Outside => {
                if line.trim_end() == header {
                    state = ScanState::InSection { start: i };
                }
            }
            ScanState::InSection { start } => {
                if is_boundary(line) {
                    return Some(start..i);
                }
            }
        }
    }

    match state {
        ScanState::InSection { start } => Some(start..lines.len()),
        ScanState::Outside => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(doc: &str) -> Vec<&str> {
        doc.split('\n').collect()
    }

    #[test]
    fn header_detection() {
        assert!(is_header_line("[General]"));
        assert!(is_header_line("[a]b]"));
        assert!(is_header_line("[]]"));
        assert!(!is_header_line("[]"));
        assert!(!is_header_line("[General] "));
        assert!(!is_header_line(" [General]"));
        assert!(!is_header_line("[General]\r"));
        assert!(!is_header_line("General"));
    }

    #[test]
    fn section_stops_at_blank_line() {
        let doc = lines("[a]\none\ntwo\n\nthree");
        assert_eq!(locate_section(&doc, "a"), Some(0..3));
    }

    #[test]
    fn section_stops_at_next_header() {
        let doc = lines("[a]\none\n[b]\ntwo");
        assert_eq!(locate_section(&doc, "a"), Some(0..2));
        assert_eq!(locate_section(&doc, "b"), Some(2..4));
    }

    #[test]
    fn section_runs_to_end_of_input() {
        let doc = lines("x\n[a]\none");
        assert_eq!(locate_section(&doc, "a"), Some(1..3));
    }

    #[test]
    fn header_match_trims_trailing_whitespace_only() {
        let doc = lines("[a]  \t\nbody");
        assert_eq!(locate_section(&doc, "a"), Some(0..2));

        let doc = lines("  [a]\nbody");
        assert_eq!(locate_section(&doc, "a"), None);
    }

    #[test]
    fn header_with_trailing_space_is_not_a_boundary() {
        let doc = lines("[a]\none\n[b] \ntwo\n");
        assert_eq!(locate_section(&doc, "a"), Some(0..4));
    }

    #[test]
    fn first_occurrence_wins() {
        let doc = lines("[a]\nfirst\n\n[a]\nsecond");
        assert_eq!(locate_section(&doc, "a"), Some(0..2));
    }

    #[test]
    fn names_are_case_sensitive() {
        let doc = lines("[Rule]\nDOMAIN,example.com");
        assert_eq!(locate_section(&doc, "rule"), None);
    }
}

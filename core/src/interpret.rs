//! Normalization of orchestration output into canonical path lists
//!
//! The orchestrator answers in prose: sometimes a clean numbered list,
//! sometimes a sentence with a path embedded in it. This module is the one
//! place that string shape is inspected; it is a pure function so it can be
//! fuzzed independently of networking and I/O.

use regex::Regex;
use std::sync::OnceLock;

/// Leading enumeration marker: optional whitespace, digits, `.` or `:`,
/// trailing whitespace ("  1: /data/foo.txt", "2. /data/bar.txt")
fn enumeration_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"^\s*\d+\s*[.:]\s*").expect("valid regex"))
}

/// Converts free-form or semi-structured result text into an ordered list
/// of canonical paths
#[derive(Debug, Clone)]
pub struct ResultInterpreter {
    virtual_root: String,
}

impl ResultInterpreter {
    /// Create an interpreter for the given virtual-root marker
    pub fn new(virtual_root: impl Into<String>) -> Self {
        Self {
            virtual_root: virtual_root.into(),
        }
    }

    /// Extract canonical paths from a block of result text.
    ///
    /// A line qualifies if it starts with an enumeration marker or contains
    /// the virtual-root marker anywhere. Qualifying lines are stripped of
    /// the marker and any leading list bullet; input order is preserved.
    /// Text that contains the virtual-root marker nowhere yields an empty
    /// list, which the session reads as "no results".
    pub fn interpret(&self, raw: &str) -> Vec<String> {
        if !raw.contains(&self.virtual_root) {
            return Vec::new();
        }

        raw.lines()
            .filter(|line| {
                enumeration_marker().is_match(line) || line.contains(&self.virtual_root)
            })
            .map(|line| {
                let stripped = enumeration_marker().replace(line, "");
                stripped
                    .trim()
                    .trim_start_matches('-')
                    .trim()
                    .to_string()
            })
            .filter(|line| !line.is_empty())
            .collect()
    }
}

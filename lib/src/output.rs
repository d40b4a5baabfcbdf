//! Row assembly
//!
//! The buffer is sized before any row task starts. Each task is handed
//! exclusive ownership of its own cell, so no two tasks can write the same
//! index and no lock is needed around the writes.

use std::io::Write;

use crate::config::AsciizeConfig;

/// Replacement for spaces when `nbsp` is set
pub const NBSP: char = '\u{00A0}';

/// One text cell per row band, in top-to-bottom order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputBuffer {
    rows: Vec<String>,
}

impl OutputBuffer {
    pub fn with_rows(rows: usize) -> Self {
        Self {
            rows: vec![String::new(); rows],
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Raw row results, before post-processing
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub(crate) fn cells_mut(&mut self) -> &mut [String] {
        &mut self.rows
    }

    /// Rows in index order with trimming and space substitution applied
    pub fn into_lines(self, config: &AsciizeConfig) -> Vec<String> {
        self.rows
            .into_iter()
            .map(|row| post_process(row, config))
            .collect()
    }

    /// Writes each processed row followed by a newline
    pub fn write_to<W: Write>(self, config: &AsciizeConfig, out: &mut W) -> std::io::Result<()> {
        for line in self.into_lines(config) {
            writeln!(out, "{line}")?;
        }
        out.flush()
    }
}

impl From<Vec<String>> for OutputBuffer {
    fn from(rows: Vec<String>) -> Self {
        Self { rows }
    }
}

fn post_process(mut row: String, config: &AsciizeConfig) -> String {
    if config.trim {
        row.truncate(row.trim_end_matches(' ').len());
    }
    if config.nbsp {
        row = row.replace(' ', &NBSP.to_string());
    }
    row
}

#[cfg(test)]
mod tests {
    use super::*;

    fn buffer() -> OutputBuffer {
        OutputBuffer::from(vec!["ab  ".to_string(), "    ".to_string(), " c d".to_string()])
    }

    #[test]
    fn test_with_rows_presizes_cells() {
        let mut buf = OutputBuffer::with_rows(3);
        assert_eq!(buf.len(), 3);
        buf.cells_mut()[2].push_str("x");
        assert_eq!(buf.rows(), &["", "", "x"]);
    }

    #[test]
    fn test_lines_unchanged_by_default() {
        let lines = buffer().into_lines(&AsciizeConfig::default());
        assert_eq!(lines, vec!["ab  ", "    ", " c d"]);
    }

    #[test]
    fn test_trim_strips_trailing_spaces_only() {
        let config = AsciizeConfig {
            trim: true,
            ..Default::default()
        };
        let lines = buffer().into_lines(&config);
        assert_eq!(lines, vec!["ab", "", " c d"]);
    }

    #[test]
    fn test_nbsp_replaces_spaces() {
        let config = AsciizeConfig {
            nbsp: true,
            ..Default::default()
        };
        let lines = buffer().into_lines(&config);
        assert_eq!(lines[2], "\u{a0}c\u{a0}d");
    }

    #[test]
    fn test_trim_runs_before_nbsp() {
        let config = AsciizeConfig {
            trim: true,
            nbsp: true,
            ..Default::default()
        };
        let lines = buffer().into_lines(&config);
        assert_eq!(lines, vec!["ab", "", "\u{a0}c\u{a0}d"]);
    }

    #[test]
    fn test_write_to_emits_rows_in_order() {
        let mut out = Vec::new();
        buffer().write_to(&AsciizeConfig::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "ab  \n    \n c d\n");
    }
}

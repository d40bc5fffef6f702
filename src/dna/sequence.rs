//! Sequence Builder Module
//! Turns a FASTA-like text block into a single sequence string.

use super::Nucleotide;
use std::fmt;
use tracing::warn;

/// Non-fatal problems found in the raw input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceWarning {
    /// The first line, which is always dropped, does not start with `>`.
    MissingHeader(String),
    /// Characters outside A/T/G/C; they are carried through but never counted.
    UnexpectedSymbols { count: usize, first: char },
}

impl fmt::Display for SequenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceWarning::MissingHeader(line) => {
                write!(f, "First line '{}' is not a '>' header but was dropped", line)
            }
            SequenceWarning::UnexpectedSymbols { count, first } => write!(
                f,
                "{} character(s) outside A/T/G/C (first: {:?}) are not counted",
                count, first
            ),
        }
    }
}

/// Concatenated sequence with the header line removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sequence {
    residues: String,
    warnings: Vec<SequenceWarning>,
}

impl Sequence {
    /// Drop the first line and join the rest without line breaks.
    ///
    /// `\n`, `\r\n` and a lone `\r` all end a line.
    pub fn from_text(text: &str) -> Self {
        let mut lines = text.split(['\r', '\n']);
        let header = lines.next().filter(|_| !text.is_empty());
        let residues: String = lines.collect();

        let mut warnings = Vec::new();
        if let Some(header) = header {
            if !header.trim_start().starts_with('>') {
                warnings.push(SequenceWarning::MissingHeader(header.to_string()));
            }
        }

        let mut unexpected = residues
            .chars()
            .filter(|c| Nucleotide::from_char(*c).is_none());
        if let Some(first) = unexpected.next() {
            let count = 1 + unexpected.count();
            warnings.push(SequenceWarning::UnexpectedSymbols { count, first });
        }

        for warning in &warnings {
            warn!("{}", warning);
        }

        Self { residues, warnings }
    }

    pub fn as_str(&self) -> &str {
        &self.residues
    }

    pub fn len(&self) -> usize {
        self.residues.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.residues.is_empty()
    }

    pub fn warnings(&self) -> &[SequenceWarning] {
        &self.warnings
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.residues)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_dropped_and_lines_joined() {
        let seq = Sequence::from_text("header\nABC\nD");
        assert_eq!(seq.as_str(), "ABCD");
    }

    #[test]
    fn test_header_only_yields_empty() {
        assert_eq!(Sequence::from_text("header").as_str(), "");
        assert_eq!(Sequence::from_text("").as_str(), "");
        assert!(Sequence::from_text("").warnings().is_empty());
    }

    #[test]
    fn test_crlf_line_breaks_stripped() {
        let seq = Sequence::from_text(">q\r\nGATT\r\nACA\r\n");
        assert_eq!(seq.as_str(), "GATTACA");
        assert!(seq.warnings().is_empty());
    }

    #[test]
    fn test_lone_cr_line_breaks_split() {
        let seq = Sequence::from_text(">q\rGATT\rACA");
        assert_eq!(seq.as_str(), "GATTACA");
        assert!(seq.warnings().is_empty());

        let mixed = Sequence::from_text(">q\rGA\r\nTT\nACA\r");
        assert_eq!(mixed.as_str(), "GATTACA");
    }

    #[test]
    fn test_default_query() {
        let seq = Sequence::from_text(crate::config::DEFAULT_SEQUENCE);
        assert_eq!(seq.len(), 63);
        assert!(seq.warnings().is_empty());
    }

    #[test]
    fn test_warnings_are_reported_not_fatal() {
        let seq = Sequence::from_text("GATTACA\nacgtNN");
        assert_eq!(seq.as_str(), "acgtNN");
        assert_eq!(
            seq.warnings(),
            &[
                SequenceWarning::MissingHeader("GATTACA".to_string()),
                SequenceWarning::UnexpectedSymbols { count: 6, first: 'a' },
            ]
        );
    }
}

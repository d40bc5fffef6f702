//! Nucleotide Counter Module
//! Tallies A/T/G/C and formats the tally as a two-column table.

use super::Sequence;
use polars::prelude::*;
use serde::ser::{Serialize, SerializeMap, Serializer};
use std::fmt;

/// One of the four DNA bases, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Nucleotide {
    A,
    T,
    G,
    C,
}

impl Nucleotide {
    pub const ALL: [Nucleotide; 4] = [Nucleotide::A, Nucleotide::T, Nucleotide::G, Nucleotide::C];

    /// Exact, case-sensitive match only.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'A' => Some(Nucleotide::A),
            'T' => Some(Nucleotide::T),
            'G' => Some(Nucleotide::G),
            'C' => Some(Nucleotide::C),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Nucleotide::A => "A",
            Nucleotide::T => "T",
            Nucleotide::G => "G",
            Nucleotide::C => "C",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Nucleotide::A => "adenine",
            Nucleotide::T => "thymine",
            Nucleotide::G => "guanine",
            Nucleotide::C => "cytosine",
        }
    }
}

impl fmt::Display for Nucleotide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Occurrences of each base. Always four entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NucleotideCount {
    counts: [u64; 4],
}

impl NucleotideCount {
    /// Count a sequence. Characters that are not exactly A/T/G/C are ignored.
    pub fn from_sequence(sequence: &Sequence) -> Self {
        Self::count(sequence.as_str())
    }

    pub fn count(residues: &str) -> Self {
        let mut counts = [0u64; 4];
        for nucleotide in residues.chars().filter_map(Nucleotide::from_char) {
            counts[nucleotide as usize] += 1;
        }
        Self { counts }
    }

    pub fn get(&self, nucleotide: Nucleotide) -> u64 {
        self.counts[nucleotide as usize]
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// (base, count) pairs in A, T, G, C order.
    pub fn iter(&self) -> impl Iterator<Item = (Nucleotide, u64)> + '_ {
        Nucleotide::ALL.iter().map(move |n| (*n, self.get(*n)))
    }

    /// Ordered dictionary form, e.g. `{"A":2,"T":2,"G":2,"C":2}`.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// One sentence per base, e.g. `There are 2 adenine (A)`.
    pub fn describe(&self) -> Vec<String> {
        self.iter()
            .map(|(n, count)| format!("There are {} {} ({})", count, n.name(), n))
            .collect()
    }

    /// Two-column table: `nucleotide`, `count`, one row per base.
    pub fn summary_table(&self) -> PolarsResult<DataFrame> {
        let (symbols, counts): (Vec<&str>, Vec<u64>) =
            self.iter().map(|(n, count)| (n.symbol(), count)).unzip();

        DataFrame::new(vec![
            Column::new("nucleotide".into(), symbols),
            Column::new("count".into(), counts),
        ])
    }
}

impl Serialize for NucleotideCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(4))?;
        for (n, count) in self.iter() {
            map.serialize_entry(n.symbol(), &count)?;
        }
        map.end()
    }
}

//! DNA module - sequence parsing and nucleotide counting

mod counter;
mod sequence;

pub use counter::{Nucleotide, NucleotideCount};
pub use sequence::{Sequence, SequenceWarning};

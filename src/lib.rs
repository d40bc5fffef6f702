//! DataScope - DNA nucleotide counting and NFL rushing stats exploration.
//!
//! The pipelines live in plain modules so they can be driven without the GUI.

pub mod charts;
pub mod config;
pub mod data;
pub mod dna;
pub mod export;
pub mod gui;
pub mod stats;

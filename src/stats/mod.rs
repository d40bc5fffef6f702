//! Stats module - correlation analysis

mod calculator;

pub use calculator::{CorrelationMatrix, StatsCalculator};

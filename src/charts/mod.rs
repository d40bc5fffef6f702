//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, BAR_STEP, NUCLEOTIDE_COLORS};
pub use renderer::StaticChartRenderer;

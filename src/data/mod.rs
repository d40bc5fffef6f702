//! Data module - player stats loading, cleaning and filtering

mod html;
mod loader;
mod processor;

pub use html::{extract_table, RawTable};
pub use loader::{
    clean_table, drop_sentinel_rows, fetch_year, HttpFetcher, PageFetcher, RetrievalError,
    StatsLoader,
};
pub use processor::{DataProcessor, FilterSelection};

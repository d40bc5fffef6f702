//! Player Stats Loader Module
//! Fetches the per-year rushing page, cleans its table with Polars and keeps one
//! cleaned table per year for the rest of the session.

use super::html::{extract_table, RawTable};
use crate::config::{
    StatsSourceConfig, AGE_COLUMN, POSITION_COLUMN, RANK_COLUMN, SENTINEL_AGE, TEAM_COLUMN,
};
use polars::chunked_array::cast::CastOptions;
use polars::prelude::*;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum RetrievalError {
    #[error("Failed to fetch {url}: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("No stats table found for {0}")]
    NoTable(u16),
    #[error("Stats table is missing the '{0}' column")]
    MissingColumn(&'static str),
    #[error("Failed to build stats table: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Source of the raw page for one season.
pub trait PageFetcher {
    fn fetch(&self, year: u16) -> Result<String, RetrievalError>;

    /// Index of the header row that names the columns.
    fn header_row(&self) -> usize {
        1
    }
}

/// Blocking HTTP fetcher for the public rushing pages.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    config: StatsSourceConfig,
}

impl HttpFetcher {
    pub fn new(config: StatsSourceConfig) -> Result<Self, RetrievalError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .build()
            .map_err(|source| RetrievalError::Http {
                url: config.url_template.clone(),
                source,
            })?;
        Ok(Self { client, config })
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, year: u16) -> Result<String, RetrievalError> {
        let url = self.config.url_for(year);
        info!(%url, "Fetching rushing stats");

        let body = self
            .client
            .get(&url)
            .send()
            .and_then(|resp| resp.error_for_status())
            .and_then(|resp| resp.text())
            .map_err(|source| RetrievalError::Http {
                url: url.clone(),
                source,
            })?;

        debug!(%url, bytes = body.len(), "Fetched page");
        Ok(body)
    }

    fn header_row(&self) -> usize {
        self.config.header_row
    }
}

/// Fetch and clean one season without touching any cache.
pub fn fetch_year<F: PageFetcher + ?Sized>(
    fetcher: &F,
    year: u16,
) -> Result<DataFrame, RetrievalError> {
    let doc = fetcher.fetch(year)?;
    let raw = extract_table(&doc, fetcher.header_row()).ok_or(RetrievalError::NoTable(year))?;
    let df = clean_table(raw)?;
    info!(year, rows = df.height(), columns = df.width(), "Loaded player stats");
    Ok(df)
}

/// Turn scraped rows into the cleaned player stats table.
///
/// Drops repeated header rows (`Age == "Age"`), drops the `Rk` column, then types
/// every column and replaces missing values with 0.
pub fn clean_table(raw: RawTable) -> Result<DataFrame, RetrievalError> {
    for required in [AGE_COLUMN, TEAM_COLUMN, POSITION_COLUMN] {
        if !raw.headers.iter().any(|h| h == required) {
            return Err(RetrievalError::MissingColumn(required));
        }
    }

    let width = raw.headers.len();
    let mut cells: Vec<Vec<Option<String>>> = vec![Vec::with_capacity(raw.rows.len()); width];
    for row in raw.rows {
        let mut row = row.into_iter();
        for column in cells.iter_mut() {
            column.push(row.next().flatten());
        }
    }

    let columns: Vec<Column> = raw
        .headers
        .iter()
        .zip(cells)
        .map(|(name, values)| Column::new(name.as_str().into(), values))
        .collect();
    let df = DataFrame::new(columns)?;

    let df = drop_sentinel_rows(&df, AGE_COLUMN, SENTINEL_AGE)?;
    let df = if df.get_column_index(RANK_COLUMN).is_some() {
        df.drop(RANK_COLUMN)?
    } else {
        df
    };

    let typed = df
        .get_columns()
        .iter()
        .map(infer_type)
        .collect::<PolarsResult<Vec<Column>>>()?;
    let fills: Vec<Expr> = typed.iter().map(zero_fill).collect();
    Ok(DataFrame::new(typed)?.lazy().with_columns(fills).collect()?)
}

/// Remove rows whose `column` holds exactly `sentinel`.
pub fn drop_sentinel_rows(df: &DataFrame, column: &str, sentinel: &str) -> PolarsResult<DataFrame> {
    let values = df.column(column)?.str()?;
    let mask: BooleanChunked = values.into_iter().map(|v| v != Some(sentinel)).collect();

    let filtered = df.filter(&mask)?;
    let dropped = df.height() - filtered.height();
    if dropped > 0 {
        debug!(dropped, "Dropped repeated header rows");
    }
    Ok(filtered)
}

/// Narrowest of Int64, Float64 and String that holds every present value.
///
/// A non-strict cast turns unparsable cells into nulls, so a cast is kept only
/// when it leaves the null count unchanged.
fn infer_type(column: &Column) -> PolarsResult<Column> {
    for dtype in [DataType::Int64, DataType::Float64] {
        let cast = column.cast_with_options(&dtype, CastOptions::NonStrict)?;
        if cast.null_count() == column.null_count() {
            return Ok(cast);
        }
    }
    Ok(column.clone())
}

/// Replace missing values with the zero of the column's type.
fn zero_fill(column: &Column) -> Expr {
    let zero = match column.dtype() {
        DataType::Int64 => lit(0i64),
        DataType::Float64 => lit(0.0f64),
        _ => lit("0"),
    };
    col(column.name().clone()).fill_null(zero)
}

/// Session memo of cleaned tables keyed by year. Past seasons never change, so
/// entries are never invalidated.
pub struct StatsLoader<F: PageFetcher> {
    fetcher: F,
    cache: HashMap<u16, DataFrame>,
}

impl<F: PageFetcher> StatsLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            cache: HashMap::new(),
        }
    }

    /// Cleaned table for `year`, fetching only on the first request.
    pub fn load(&mut self, year: u16) -> Result<&DataFrame, RetrievalError> {
        if !self.cache.contains_key(&year) {
            let df = fetch_year(&self.fetcher, year)?;
            return Ok(self.insert(year, df));
        }
        self.cached(year).ok_or(RetrievalError::NoTable(year))
    }

    /// Memoized table for `year`, if it was loaded this session.
    pub fn cached(&self, year: u16) -> Option<&DataFrame> {
        let df = self.cache.get(&year);
        if df.is_some() {
            debug!(year, "Player stats cache hit");
        }
        df
    }

    /// Memoize a table for `year`, e.g. one fetched on a worker thread.
    pub fn insert(&mut self, year: u16, df: DataFrame) -> &DataFrame {
        match self.cache.entry(year) {
            Entry::Occupied(mut entry) => {
                entry.insert(df);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(df),
        }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}

//! Data Processor Module
//! Team/position selection over the cleaned player stats table.

use crate::config::{POSITIONS, POSITION_COLUMN, TEAM_COLUMN};
use polars::prelude::*;
use std::collections::BTreeSet;
use tracing::debug;

/// Teams and positions to keep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    pub teams: BTreeSet<String>,
    pub positions: BTreeSet<String>,
}

impl FilterSelection {
    /// Every team present in `df` and every known position.
    pub fn all_of(df: &DataFrame) -> Self {
        Self {
            teams: DataProcessor::get_teams(df).into_iter().collect(),
            positions: POSITIONS.iter().map(|p| p.to_string()).collect(),
        }
    }
}

/// Handles filtering and summary operations on player stats.
pub struct DataProcessor;

impl DataProcessor {
    /// Sorted unique team identifiers.
    pub fn get_teams(df: &DataFrame) -> Vec<String> {
        Self::text_values(df, TEAM_COLUMN)
            .map(|values| {
                values
                    .into_iter()
                    .collect::<BTreeSet<_>>()
                    .into_iter()
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Rows whose team and position are both selected, in original order.
    pub fn filter_by_selection(
        df: &DataFrame,
        selection: &FilterSelection,
    ) -> PolarsResult<DataFrame> {
        let teams = Self::text_values(df, TEAM_COLUMN)?;
        let positions = Self::text_values(df, POSITION_COLUMN)?;

        let mask: BooleanChunked = teams
            .iter()
            .zip(positions.iter())
            .map(|(team, pos)| selection.teams.contains(team) && selection.positions.contains(pos))
            .collect();

        let filtered = df.filter(&mask)?;
        debug!(
            kept = filtered.height(),
            total = df.height(),
            "Filtered player stats"
        );
        Ok(filtered)
    }

    /// `Data Dimension: N rows and M columns.`
    pub fn dimension_report(df: &DataFrame) -> String {
        let (rows, columns) = df.shape();
        format!("Data Dimension: {} rows and {} columns.", rows, columns)
    }

    /// Values of `column` as text, whatever type inference made of it.
    fn text_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<String>> {
        let as_text = df.column(column)?.cast(&DataType::String)?;
        Ok(as_text
            .str()?
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DataFrame {
        df!(
            "Player" => ["Henry", "Jones", "Allen", "Cook", "Kittle", "Ingram"],
            "Tm" => ["TEN", "GNB", "BUF", "MIN", "SFO", "BAL"],
            "Pos" => ["RB", "RB", "QB", "RB", "TE", "RB"],
            "Yds" => [1540i64, 1084, 510, 1135, 0, 1018],
        )
        .unwrap()
    }

    fn selection(teams: &[&str], positions: &[&str]) -> FilterSelection {
        FilterSelection {
            teams: teams.iter().map(|t| t.to_string()).collect(),
            positions: positions.iter().map(|p| p.to_string()).collect(),
        }
    }

    fn players(df: &DataFrame) -> Vec<String> {
        df.column("Player")
            .unwrap()
            .str()
            .unwrap()
            .into_no_null_iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_teams_sorted_unique() {
        let df = df!("Tm" => ["TEN", "BUF", "TEN", "ARI"], "Pos" => ["RB", "QB", "WR", "RB"]).unwrap();
        assert_eq!(DataProcessor::get_teams(&df), vec!["ARI", "BUF", "TEN"]);
    }

    #[test]
    fn test_filter_keeps_matching_rows_in_order() {
        let df = stats();
        let sel = selection(&["BAL", "TEN", "BUF", "SFO"], &["RB", "TE"]);
        let out = DataProcessor::filter_by_selection(&df, &sel).unwrap();
        assert_eq!(players(&out), vec!["Henry", "Kittle", "Ingram"]);
        assert_eq!(out.width(), df.width());
    }

    #[test]
    fn test_every_row_satisfies_selection() {
        let df = stats();
        let sel = selection(&["GNB", "MIN", "BUF"], &["RB"]);
        let out = DataProcessor::filter_by_selection(&df, &sel).unwrap();
        let teams = DataProcessor::text_values(&out, "Tm").unwrap();
        let positions = DataProcessor::text_values(&out, "Pos").unwrap();
        for (team, pos) in teams.iter().zip(&positions) {
            assert!(sel.teams.contains(team) && sel.positions.contains(pos));
        }
        assert_eq!(players(&out), vec!["Jones", "Cook"]);
    }

    #[test]
    fn test_empty_selection_is_empty_table() {
        let df = stats();
        let no_teams = selection(&[], &["RB"]);
        let out = DataProcessor::filter_by_selection(&df, &no_teams).unwrap();
        assert_eq!(out.height(), 0);
        assert_eq!(
            DataProcessor::dimension_report(&out),
            "Data Dimension: 0 rows and 4 columns."
        );

        let no_positions = selection(&["TEN"], &[]);
        assert_eq!(DataProcessor::filter_by_selection(&df, &no_positions).unwrap().height(), 0);
    }

    #[test]
    fn test_default_selection_keeps_known_positions() {
        let df = stats();
        let out = DataProcessor::filter_by_selection(&df, &FilterSelection::all_of(&df)).unwrap();
        assert_eq!(out.height(), 6);
    }
}

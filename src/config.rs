//! Application Defaults
//! Fixed vocabularies, column names and the stats source settings.

use std::time::Duration;

/// Sample query shown in the sequence input on startup.
pub const DEFAULT_SEQUENCE: &str =
    ">DNA Query\nGAACACGTGGAAGGCAAACAGGAAGGTGAAG\nAAGAACTTATCCTACGGACGGAAGGTTCCTGT";

/// Seasons offered by the year selector.
pub const FIRST_YEAR: u16 = 1990;
pub const LAST_YEAR: u16 = 2019;

/// Positions offered by the position selector.
pub const POSITIONS: [&str; 5] = ["RB", "QB", "WR", "FB", "TE"];

/// Column names of the rushing table
pub const AGE_COLUMN: &str = "Age";
pub const RANK_COLUMN: &str = "Rk";
pub const TEAM_COLUMN: &str = "Tm";
pub const POSITION_COLUMN: &str = "Pos";

/// Literal that marks a header row repeated inside the table body.
pub const SENTINEL_AGE: &str = "Age";

/// Name of the downloadable player stats file.
pub const STATS_FILE_NAME: &str = "playerstats.csv";

/// Years newest first, the order the selector lists them in.
pub fn years() -> Vec<u16> {
    (FIRST_YEAR..=LAST_YEAR).rev().collect()
}

/// Where and how the per-year rushing page is fetched.
#[derive(Debug, Clone)]
pub struct StatsSourceConfig {
    /// `{year}` is replaced with the requested season.
    pub url_template: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Index of the `<thead>` row that names the columns.
    pub header_row: usize,
}

impl Default for StatsSourceConfig {
    fn default() -> Self {
        Self {
            url_template: "https://www.pro-football-reference.com/years/{year}/rushing.htm"
                .to_string(),
            user_agent: concat!("datascope/", env!("CARGO_PKG_VERSION")).to_string(),
            timeout: Duration::from_secs(20),
            header_row: 1,
        }
    }
}

impl StatsSourceConfig {
    pub fn url_for(&self, year: u16) -> String {
        self.url_template.replace("{year}", &year.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_years_newest_first() {
        let years = years();
        assert_eq!(years.first(), Some(&2019));
        assert_eq!(years.last(), Some(&1990));
        assert_eq!(years.len(), 30);
    }

    #[test]
    fn test_url_for_year() {
        let config = StatsSourceConfig::default();
        assert_eq!(
            config.url_for(2019),
            "https://www.pro-football-reference.com/years/2019/rushing.htm"
        );
    }
}

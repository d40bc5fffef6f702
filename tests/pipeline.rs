use datascope::config::STATS_FILE_NAME;
use datascope::data::{DataProcessor, FilterSelection, PageFetcher, RetrievalError, StatsLoader};
use datascope::dna::{Nucleotide, NucleotideCount, Sequence};
use datascope::export::DownloadArtifact;
use datascope::stats::StatsCalculator;
use polars::prelude::*;
use std::cell::RefCell;

const RUSHING_PAGE: &str = r#"
<html><body>
<table id="rushing" class="stats_table">
  <thead>
    <tr class="over_header"><th></th><th colspan="4"></th><th colspan="4">Games / Rushing</th></tr>
    <tr>
      <th>Rk</th><th>Player</th><th>Tm</th><th>Age</th><th>Pos</th>
      <th>G</th><th>Att</th><th>Yds</th><th>Y/A</th>
    </tr>
  </thead>
  <tbody>
    <tr><th>1</th><td><a href="/players/H/HenrDe00.htm">Derrick Henry</a>*</td><td>TEN</td><td>25</td><td>RB</td><td>15</td><td>303</td><td>1540</td><td>5.1</td></tr>
    <tr><th>2</th><td>Nick Chubb</td><td>CLE</td><td>24</td><td>RB</td><td>16</td><td>298</td><td>1494</td><td>5.0</td></tr>
    <tr class="thead"><th>Rk</th><th>Player</th><th>Tm</th><th>Age</th><th>Pos</th><th>G</th><th>Att</th><th>Yds</th><th>Y/A</th></tr>
    <tr><th>3</th><td>Lamar Jackson</td><td>BAL</td><td>22</td><td>QB</td><td>15</td><td>176</td><td>1206</td><td>6.9</td></tr>
    <tr><th>4</th><td>Mark Ingram</td><td>BAL</td><td>30</td><td>RB</td><td>15</td><td>202</td><td>1018</td><td>5.0</td></tr>
    <tr><th>5</th><td>Kyle Juszczyk</td><td>SFO</td><td></td><td></td><td>12</td><td>2</td><td>8</td><td></td></tr>
  </tbody>
</table>
</body></html>
"#;

/// Serves the same page for every season and records which seasons were asked for.
struct FixturePages {
    requests: RefCell<Vec<u16>>,
}

impl FixturePages {
    fn new() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
        }
    }
}

impl PageFetcher for FixturePages {
    fn fetch(&self, year: u16) -> Result<String, RetrievalError> {
        self.requests.borrow_mut().push(year);
        Ok(RUSHING_PAGE.to_string())
    }
}

fn str_values(df: &DataFrame, name: &str) -> Vec<String> {
    df.column(name)
        .unwrap()
        .str()
        .unwrap()
        .into_no_null_iter()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_season_load_is_cleaned_and_memoized() {
    let mut loader = StatsLoader::new(FixturePages::new());

    let df = loader.load(2019).unwrap().clone();
    assert_eq!(df.height(), 5);
    assert!(df.column("Rk").is_err());
    assert!(!str_values(&df, "Player").iter().any(|p| p == "Player"));
    for column in df.get_columns() {
        assert_eq!(column.null_count(), 0, "nulls left in {}", column.name());
    }
    assert_eq!(str_values(&df, "Player")[0], "Derrick Henry*");
    assert_eq!(df.column("Yds").unwrap().dtype(), &DataType::Int64);
    assert_eq!(df.column("Y/A").unwrap().dtype(), &DataType::Float64);

    loader.load(2019).unwrap();
    loader.load(2018).unwrap();
    assert_eq!(*loader.fetcher().requests.borrow(), vec![2019, 2018]);
}

#[test]
fn test_filter_then_export_and_correlate() {
    let mut loader = StatsLoader::new(FixturePages::new());
    let season = loader.load(2019).unwrap().clone();

    assert_eq!(DataProcessor::get_teams(&season), vec!["BAL", "CLE", "SFO", "TEN"]);

    let selection = FilterSelection {
        teams: ["BAL", "TEN"].into_iter().map(String::from).collect(),
        positions: ["RB"].into_iter().map(String::from).collect(),
    };
    let filtered = DataProcessor::filter_by_selection(&season, &selection).unwrap();
    assert_eq!(
        str_values(&filtered, "Player"),
        vec!["Derrick Henry*", "Mark Ingram"]
    );
    assert_eq!(
        DataProcessor::dimension_report(&filtered),
        "Data Dimension: 2 rows and 8 columns."
    );

    let artifact = DownloadArtifact::csv(&filtered, STATS_FILE_NAME).unwrap();
    let text = String::from_utf8(artifact.bytes.clone()).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Player,Tm,Age,Pos,G,Att,Yds,Y/A"));
    assert_eq!(lines.count(), 2);
    assert!(artifact.html_link("Download CSV File").contains("download=\"playerstats.csv\""));

    let matrix = StatsCalculator::correlation_matrix(&season).unwrap();
    assert_eq!(matrix.columns, vec!["Age", "G", "Att", "Yds", "Y/A"]);
    for i in 0..matrix.len() {
        for j in 0..matrix.len() {
            let (a, b) = (matrix.get(i, j), matrix.get(j, i));
            assert!(a == b || (a.is_nan() && b.is_nan()));
        }
    }
    assert_eq!(matrix.lower_triangle().count(), 10);
}

#[test]
fn test_missing_table_reported() {
    struct EmptyPage;
    impl PageFetcher for EmptyPage {
        fn fetch(&self, _year: u16) -> Result<String, RetrievalError> {
            Ok("<html><body><p>Nothing here</p></body></html>".to_string())
        }
    }

    let mut loader = StatsLoader::new(EmptyPage);
    assert!(matches!(loader.load(1995), Err(RetrievalError::NoTable(1995))));
    assert!(loader.cached(1995).is_none());
}

#[test]
fn test_dna_query_counted() {
    let sequence = Sequence::from_text(">query\nAATTG\nGCCX\n");
    assert_eq!(sequence.as_str(), "AATTGGCCX");

    let counts = NucleotideCount::from_sequence(&sequence);
    assert_eq!(counts.get(Nucleotide::C), 2);
    assert_eq!(counts.total(), 8);
    assert_eq!(counts.to_json().unwrap(), r#"{"A":2,"T":2,"G":2,"C":2}"#);
    assert_eq!(counts.describe()[0], "There are 2 adenine (A)");

    let artifact = DownloadArtifact::csv(&counts.summary_table().unwrap(), "dna.csv").unwrap();
    assert_eq!(
        String::from_utf8(artifact.bytes).unwrap(),
        "nucleotide,count\nA,2\nT,2\nG,2\nC,2\n"
    );
}

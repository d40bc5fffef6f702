//! Statistics Calculator Module
//! Pairwise Pearson correlation over the numeric columns of a table.

use polars::prelude::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;
use tracing::debug;

/// Square correlation table. `values` is row-major, `len() x len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    values: Vec<f64>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.len() + j]
    }

    /// Cells hidden when drawing: the upper triangle including the diagonal.
    pub fn is_masked(i: usize, j: usize) -> bool {
        j >= i
    }

    /// Visible cells as (row, column, value).
    pub fn lower_triangle(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        let n = self.len();
        (0..n).flat_map(move |i| {
            (0..n)
                .filter(move |&j| !Self::is_masked(i, j))
                .map(move |j| (i, j, self.get(i, j)))
        })
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Names of numeric columns.
    pub fn get_numeric_columns(df: &DataFrame) -> Vec<String> {
        df.get_columns()
            .iter()
            .filter(|col| {
                matches!(
                    col.dtype(),
                    DataType::Float32
                        | DataType::Float64
                        | DataType::Int8
                        | DataType::Int16
                        | DataType::Int32
                        | DataType::Int64
                        | DataType::UInt8
                        | DataType::UInt16
                        | DataType::UInt32
                        | DataType::UInt64
                )
            })
            .map(|col| col.name().to_string())
            .collect()
    }

    /// Pearson correlation of two equally long samples.
    ///
    /// NaN when either side has fewer than two values or no variance.
    pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
        if x.len() != y.len() || x.len() < 2 {
            return f64::NAN;
        }
        let sx = x.std_dev();
        let sy = y.std_dev();
        if sx == 0.0 || sy == 0.0 {
            return f64::NAN;
        }
        x.covariance(y) / (sx * sy)
    }

    /// Full correlation matrix over the numeric columns of `df`.
    ///
    /// Text columns are skipped. Each pair is computed once and mirrored, so the
    /// result is exactly symmetric; the diagonal is 1.0 wherever the column varies.
    pub fn correlation_matrix(df: &DataFrame) -> PolarsResult<CorrelationMatrix> {
        let columns = Self::get_numeric_columns(df);
        let series: Vec<Vec<f64>> = columns
            .iter()
            .map(|name| -> PolarsResult<Vec<f64>> {
                let as_f64 = df.column(name)?.cast(&DataType::Float64)?;
                Ok(as_f64.f64()?.into_iter().map(|v| v.unwrap_or(0.0)).collect())
            })
            .collect::<PolarsResult<_>>()?;

        let n = columns.len();
        let lower: Vec<Vec<f64>> = (0..n)
            .into_par_iter()
            .map(|i| {
                (0..=i)
                    .map(|j| {
                        if i == j {
                            if series[i].len() >= 2 && series[i].as_slice().std_dev() > 0.0 {
                                1.0
                            } else {
                                f64::NAN
                            }
                        } else {
                            Self::pearson(&series[i], &series[j])
                        }
                    })
                    .collect()
            })
            .collect();

        let mut values = vec![f64::NAN; n * n];
        for (i, row) in lower.iter().enumerate() {
            for (j, &r) in row.iter().enumerate() {
                values[i * n + j] = r;
                values[j * n + i] = r;
            }
        }

        debug!(columns = n, rows = df.height(), "Computed correlation matrix");
        Ok(CorrelationMatrix { columns, values })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> DataFrame {
        df!(
            "Player" => ["a", "b", "c", "d", "e"],
            "Att" => [10i64, 20, 30, 40, 50],
            "Yds" => [45.0, 90.0, 135.0, 180.0, 225.0],
            "Fmb" => [5i64, 4, 3, 2, 1],
            "Lng" => [12i64, 7, 30, 9, 15],
            "G" => [16i64, 16, 16, 16, 16],
        )
        .unwrap()
    }

    #[test]
    fn test_text_columns_excluded() {
        let m = StatsCalculator::correlation_matrix(&stats()).unwrap();
        assert_eq!(m.columns, vec!["Att", "Yds", "Fmb", "Lng", "G"]);
        assert_eq!(m.len(), 5);
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let m = StatsCalculator::correlation_matrix(&stats()).unwrap();
        for i in 0..m.len() {
            for j in 0..m.len() {
                let (a, b) = (m.get(i, j), m.get(j, i));
                assert!(a == b || (a.is_nan() && b.is_nan()), "({}, {})", i, j);
            }
        }
        for i in 0..4 {
            assert_eq!(m.get(i, i), 1.0);
        }
    }

    #[test]
    fn test_perfect_correlations() {
        let m = StatsCalculator::correlation_matrix(&stats()).unwrap();
        assert!((m.get(1, 0) - 1.0).abs() < 1e-12);
        assert!((m.get(2, 0) + 1.0).abs() < 1e-12);
        let r = m.get(3, 0);
        assert!(r > -1.0 && r < 1.0);
    }

    #[test]
    fn test_constant_column_is_nan() {
        let m = StatsCalculator::correlation_matrix(&stats()).unwrap();
        assert!(m.get(4, 4).is_nan());
        assert!(m.get(4, 0).is_nan());
    }

    #[test]
    fn test_no_numeric_columns_is_empty() {
        let df = df!("Tm" => ["TEN", "BUF"], "Pos" => ["RB", "QB"]).unwrap();
        let m = StatsCalculator::correlation_matrix(&df).unwrap();
        assert!(m.is_empty());
        assert_eq!(m.lower_triangle().count(), 0);
    }

    #[test]
    fn test_lower_triangle_skips_masked_cells() {
        let m = StatsCalculator::correlation_matrix(&stats()).unwrap();
        let cells: Vec<(usize, usize)> = m.lower_triangle().map(|(i, j, _)| (i, j)).collect();
        assert_eq!(cells.len(), 10);
        assert!(cells.iter().all(|&(i, j)| !CorrelationMatrix::is_masked(i, j)));
        assert!(cells.iter().all(|&(i, j)| j < i));
    }

    #[test]
    fn test_pearson_short_input() {
        assert!(StatsCalculator::pearson(&[1.0], &[2.0]).is_nan());
        assert!(StatsCalculator::pearson(&[], &[]).is_nan());
    }
}

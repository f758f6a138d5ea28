//! Pairwise Pearson correlation over numeric columns.

use polars::prelude::*;
use serde::Serialize;

use crate::data::schema::{self, SchemaError};
use crate::stats::aggregate::{measure_values, MetricsError};

/// Symmetric correlation matrix. `values[i][j]` is the Pearson coefficient
/// between `columns[i]` and `columns[j]`, rounded to 2 decimal places;
/// `NaN` where a pair has fewer than two complete rows or zero variance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub columns: Vec<String>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i][j]
    }
}

/// Pearson coefficient of two equal-length samples. `NaN` for fewer than
/// two points or when either side has zero variance.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len();
    if n < 2 || n != ys.len() {
        return f64::NAN;
    }

    let nf = n as f64;
    let mean_x = xs.iter().sum::<f64>() / nf;
    let mean_y = ys.iter().sum::<f64>() / nf;

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        f64::NAN
    } else {
        cov / denom
    }
}

fn round2(v: f64) -> f64 {
    if v.is_nan() {
        v
    } else {
        (v * 100.0).round() / 100.0
    }
}

/// Correlation matrix over the requested columns that exist in the table.
/// Absent columns are dropped from the request; if none remain that is a
/// schema error. Rows are excluded pairwise: a pair only skips the rows
/// where one of its two columns is absent.
pub fn correlation_matrix(
    df: &DataFrame,
    measures: &[&str],
) -> Result<CorrelationMatrix, MetricsError> {
    let present: Vec<&str> = measures
        .iter()
        .copied()
        .filter(|name| schema::has_column(df, name))
        .collect();
    if present.is_empty() {
        return Err(SchemaError::NoNumericColumns {
            requested: measures.iter().map(|s| s.to_string()).collect(),
        }
        .into());
    }

    let series: Vec<Vec<Option<f64>>> = present
        .iter()
        .map(|name| measure_values(df, name))
        .collect::<Result<_, _>>()?;

    let k = present.len();
    let mut values = vec![vec![f64::NAN; k]; k];
    for i in 0..k {
        for j in i..k {
            let mut xs = Vec::new();
            let mut ys = Vec::new();
            for (x, y) in series[i].iter().zip(&series[j]) {
                if let (Some(x), Some(y)) = (x, y) {
                    xs.push(*x);
                    ys.push(*y);
                }
            }
            let r = round2(pearson(&xs, &ys));
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        columns: present.iter().map(|s| s.to_string()).collect(),
        values,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        df!(
            "a" => [1.0, 2.0, 3.0, 4.0],
            "b" => [2.0, 4.0, 6.0, 8.0],
            "c" => [4.0, 3.0, 2.0, 1.0],
        )
        .unwrap()
    }

    #[test]
    fn perfectly_correlated_columns() {
        let m = correlation_matrix(&frame(), &["a", "b", "c"]).unwrap();
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(0, 2), -1.0);
    }

    #[test]
    fn symmetric_with_unit_diagonal() {
        let m = correlation_matrix(&frame(), &["a", "b", "c"]).unwrap();
        for i in 0..3 {
            assert_eq!(m.get(i, i), 1.0);
            for j in 0..3 {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
    }

    #[test]
    fn absent_columns_are_dropped_from_the_request() {
        let m = correlation_matrix(&frame(), &["a", "nope", "b"]).unwrap();
        assert_eq!(m.columns, vec!["a", "b"]);
        assert_eq!(m.values.len(), 2);
    }

    #[test]
    fn all_columns_absent_is_a_schema_error() {
        assert!(matches!(
            correlation_matrix(&frame(), &["x", "y"]),
            Err(MetricsError::Schema(SchemaError::NoNumericColumns { .. }))
        ));
    }

    #[test]
    fn zero_variance_column_yields_nan() {
        let df = df!(
            "a" => [1.0, 2.0, 3.0],
            "flat" => [5.0, 5.0, 5.0],
        )
        .unwrap();
        let m = correlation_matrix(&df, &["a", "flat"]).unwrap();
        assert!(m.get(0, 1).is_nan());
        assert!(m.get(1, 1).is_nan());
        assert_eq!(m.get(0, 0), 1.0);
    }

    #[test]
    fn incomplete_rows_are_excluded_per_pair() {
        // Row 3 is only missing in `b`, so the (a, c) pair keeps it.
        let df = df!(
            "a" => [1.0, 2.0, 3.0, 4.0],
            "b" => [Some(2.0), Some(4.0), Some(6.0), None],
            "c" => [1.0, 2.0, 3.0, 4.0],
        )
        .unwrap();
        let m = correlation_matrix(&df, &["a", "b", "c"]).unwrap();
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(0, 2), 1.0);
    }

    #[test]
    fn coefficients_are_rounded_to_two_decimals() {
        let df = df!(
            "a" => [1.0, 2.0, 3.0, 4.0, 5.0],
            "b" => [1.0, 3.0, 2.0, 5.0, 4.0],
        )
        .unwrap();
        let m = correlation_matrix(&df, &["a", "b"]).unwrap();
        let r = m.get(0, 1);
        assert_eq!(r, (r * 100.0).round() / 100.0);
        assert!((m.get(0, 1) - 0.8).abs() < 1e-9);
    }

    #[test]
    fn pearson_needs_two_points() {
        assert!(pearson(&[1.0], &[2.0]).is_nan());
        assert!(pearson(&[], &[]).is_nan());
    }
}

//! Grouped and scalar aggregation over the sales table.
//!
//! Everything here is a pure function: table in, summary out. Measures are
//! coerced to `f64` with non-strict casting, so a non-numeric cell becomes
//! null and is excluded from sums and means without erroring. Grouping keys
//! keep nulls as their own bucket; a missing category is still a category.

use indexmap::IndexMap;
use polars::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use thiserror::Error;

use crate::data::schema::{self, SchemaError};

#[derive(Error, Debug)]
pub enum MetricsError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// One partition of a grouped sum. `label` is `None` for the
/// missing-value bucket (and for the "no data" sentinel).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub label: Option<String>,
    pub total: f64,
}

impl GroupTotal {
    /// Sentinel returned when there is nothing to rank.
    pub fn no_data() -> Self {
        Self {
            label: None,
            total: 0.0,
        }
    }
}

/// Measure column as per-row `Option<f64>`; null and NaN count as absent.
pub(crate) fn measure_values(
    df: &DataFrame,
    measure: &str,
) -> Result<Vec<Option<f64>>, MetricsError> {
    schema::ensure_columns(df, &[measure])?;

    let cast = df.column(measure)?.cast(&DataType::Float64)?;
    let ca = cast.f64()?;
    Ok(ca
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect())
}

/// Grouping key column as per-row labels; null keeps its own bucket.
pub(crate) fn group_labels(
    df: &DataFrame,
    group_key: &str,
) -> Result<Vec<Option<String>>, MetricsError> {
    schema::ensure_columns(df, &[group_key])?;

    let col = df.column(group_key)?;
    let mut labels = Vec::with_capacity(df.height());
    for i in 0..df.height() {
        let value = col.get(i)?;
        labels.push(if value.is_null() {
            None
        } else {
            Some(value.to_string().trim_matches('"').to_string())
        });
    }
    Ok(labels)
}

/// Sum the measure per partition of the grouping key, partitions in
/// first-seen row order. A row with an absent measure still creates or
/// joins its partition; it just contributes nothing to the sum.
pub(crate) fn group_sums(
    df: &DataFrame,
    group_key: &str,
    measure: &str,
) -> Result<IndexMap<Option<String>, f64>, MetricsError> {
    let labels = group_labels(df, group_key)?;
    let values = measure_values(df, measure)?;

    let mut sums: IndexMap<Option<String>, f64> = IndexMap::new();
    for (label, value) in labels.into_iter().zip(values) {
        let entry = sums.entry(label).or_insert(0.0);
        if let Some(v) = value {
            *entry += v;
        }
    }
    Ok(sums)
}

/// Sum of all numeric values in `measure`. Empty tables sum to zero.
pub fn total_sum(df: &DataFrame, measure: &str) -> Result<f64, MetricsError> {
    Ok(measure_values(df, measure)?
        .into_iter()
        .flatten()
        .sum())
}

/// Mean of the numeric values in `measure`. With no numeric values at all
/// the result is the `NaN` sentinel, not an error.
pub fn mean(df: &DataFrame, measure: &str) -> Result<f64, MetricsError> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in measure_values(df, measure)?.into_iter().flatten() {
        sum += v;
        count += 1;
    }
    if count == 0 {
        Ok(f64::NAN)
    } else {
        Ok(sum / count as f64)
    }
}

/// Count of numeric, non-null entries in `measure`.
pub fn numeric_count(df: &DataFrame, measure: &str) -> Result<usize, MetricsError> {
    Ok(measure_values(df, measure)?
        .into_iter()
        .flatten()
        .count())
}

/// Partitions sorted descending by sum, ties kept in first-seen order so
/// repeated calls on the same table rank identically. The returned order
/// is what downstream categorical axes must use.
pub fn ranked_groups(
    df: &DataFrame,
    group_key: &str,
    measure: &str,
    limit: Option<usize>,
) -> Result<Vec<GroupTotal>, MetricsError> {
    let mut ranked: Vec<GroupTotal> = group_sums(df, group_key, measure)?
        .into_iter()
        .map(|(label, total)| GroupTotal { label, total })
        .collect();

    // Stable sort: equal sums keep insertion order.
    ranked.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(Ordering::Equal));

    if let Some(n) = limit {
        ranked.truncate(n);
    }
    Ok(ranked)
}

/// The partition with the largest sum, or the "no data" sentinel for a
/// table with zero partitions.
pub fn top_group(
    df: &DataFrame,
    group_key: &str,
    measure: &str,
) -> Result<GroupTotal, MetricsError> {
    Ok(ranked_groups(df, group_key, measure, None)?
        .into_iter()
        .next()
        .unwrap_or_else(GroupTotal::no_data))
}

/// Best performing outlet: ranks by `Outlet_Identifier` when the table has
/// one, falling back to `Outlet_Type`.
pub fn best_outlet(df: &DataFrame, measure: &str) -> Result<GroupTotal, MetricsError> {
    let outlet_key = if schema::has_column(df, schema::OUTLET_IDENTIFIER) {
        schema::OUTLET_IDENTIFIER
    } else {
        schema::OUTLET_TYPE
    };
    top_group(df, outlet_key, measure)
}

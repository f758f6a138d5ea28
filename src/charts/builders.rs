//! Chart construction.
//!
//! Each builder turns the sales table (or an aggregation result) into a
//! [`Figure`] and finishes by applying the shared styling step. Builders
//! fail fast with a schema error when a required column is absent; the only
//! documented degradations are the trend fallback chain and the optional
//! color/hover dimensions of the scatter.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use polars::prelude::*;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::charts::figure::{
    Annotation, AxisData, AxisScale, BarTrace, BoxTrace, Figure, HeatmapTrace, HistogramTrace,
    Orientation, PieTrace, ScatterMode, ScatterTrace, Trace, VerticalLine,
};
use crate::charts::style;
use crate::data::schema::{self, SchemaError};
use crate::stats::aggregate::{self, MetricsError};
use crate::stats::{correlation, describe};

/// Columns the correlation heatmap inspects unless told otherwise.
pub const DEFAULT_CORRELATION_COLUMNS: [&str; 4] = [
    schema::ITEM_WEIGHT,
    schema::ITEM_MRP,
    schema::ITEM_VISIBILITY,
    schema::ITEM_OUTLET_SALES,
];

#[derive(Error, Debug)]
pub enum ChartError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Metrics(#[from] MetricsError),
    #[error("polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Calendar bucket for the trend chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TrendPeriod {
    #[default]
    Month,
    Quarter,
    Year,
}

impl TrendPeriod {
    fn letter(self) -> char {
        match self {
            TrendPeriod::Month => 'M',
            TrendPeriod::Quarter => 'Q',
            TrendPeriod::Year => 'Y',
        }
    }

    fn bucket(self, date: NaiveDate) -> String {
        match self {
            TrendPeriod::Month => format!("{:04}-{:02}", date.year(), date.month()),
            TrendPeriod::Quarter => {
                format!("{:04}-Q{}", date.year(), (date.month() + 2) / 3)
            }
            TrendPeriod::Year => format!("{:04}", date.year()),
        }
    }
}

/// Label shown for the missing-value bucket.
fn display_label(label: &Option<String>) -> String {
    label.clone().unwrap_or_else(|| "Missing".to_string())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    for fmt in ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, fmt) {
            return Some(d);
        }
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(dt.date());
        }
    }
    None
}

fn line_trace(x: AxisData, y: Vec<f64>) -> Trace {
    Trace::Scatter(ScatterTrace {
        name: None,
        x,
        y,
        mode: ScatterMode::LinesMarkers,
        opacity: None,
        hover_text: None,
    })
}

/// Sales trend over time.
///
/// With a date column supplied and present, sums per calendar period in
/// chronological order. Otherwise groups by outlet establishment year when
/// the table has one. The last resort is raw row order, a degraded and
/// non-temporal view; the x-axis title says so. Known limitation, not a
/// bug: callers that need a real time axis must supply a date column.
pub fn sales_trend(
    df: &DataFrame,
    date_col: Option<&str>,
    period: TrendPeriod,
) -> Result<Figure, ChartError> {
    schema::ensure_columns(df, &[schema::ITEM_OUTLET_SALES])?;
    let sales = aggregate::measure_values(df, schema::ITEM_OUTLET_SALES)?;

    if let Some(date_col) = date_col.filter(|c| schema::has_column(df, c)) {
        let raw_dates = aggregate::group_labels(df, date_col)?;

        // Unparseable dates drop the row; a missing measure still keeps
        // its bucket alive.
        let mut buckets: BTreeMap<String, f64> = BTreeMap::new();
        for (raw, value) in raw_dates.iter().zip(&sales) {
            let Some(date) = raw.as_deref().and_then(parse_date) else {
                continue;
            };
            let entry = buckets.entry(period.bucket(date)).or_insert(0.0);
            if let Some(v) = value {
                *entry += v;
            }
        }

        let (labels, totals): (Vec<String>, Vec<f64>) = buckets.into_iter().unzip();
        let fig = Figure::new(vec![line_trace(AxisData::Labels(labels), totals)]);
        return Ok(style::apply(
            fig,
            &format!("Sales Trend ({}-periods)", period.letter()),
            style::DEFAULT_HEIGHT,
        ));
    }

    if schema::has_column(df, schema::OUTLET_ESTABLISHMENT_YEAR) {
        let years = aggregate::measure_values(df, schema::OUTLET_ESTABLISHMENT_YEAR)?;

        let mut buckets: BTreeMap<i64, f64> = BTreeMap::new();
        for (year, value) in years.iter().zip(&sales) {
            let Some(year) = year else { continue };
            let entry = buckets.entry(year.round() as i64).or_insert(0.0);
            if let Some(v) = value {
                *entry += v;
            }
        }

        let (years, totals): (Vec<i64>, Vec<f64>) = buckets.into_iter().unzip();
        let mut fig = Figure::new(vec![line_trace(
            AxisData::Numbers(years.into_iter().map(|y| y as f64).collect()),
            totals,
        )]);
        fig.layout.x_axis.title = Some("Year".to_string());
        return Ok(style::apply(
            fig,
            "Sales by Outlet Establishment Year",
            style::DEFAULT_HEIGHT,
        ));
    }

    debug!("no date or establishment-year column; trend degrades to row order");
    let y: Vec<f64> = sales.iter().map(|v| v.unwrap_or(0.0)).collect();
    let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
    let mut fig = Figure::new(vec![line_trace(AxisData::Numbers(x), y)]);
    fig.layout.x_axis.title = Some("Index (no date column found)".to_string());
    Ok(style::apply(
        fig,
        "Sales Trend (Index Order)",
        style::DEFAULT_HEIGHT,
    ))
}

/// Histogram of `Item_MRP` with an optional quartile overlay.
pub fn price_distribution(
    df: &DataFrame,
    bins: usize,
    show_quantiles: bool,
) -> Result<Figure, ChartError> {
    schema::ensure_columns(df, &[schema::ITEM_MRP])?;
    let values: Vec<f64> = aggregate::measure_values(df, schema::ITEM_MRP)?
        .into_iter()
        .flatten()
        .collect();

    let mut fig = Figure::new(vec![Trace::Histogram(HistogramTrace {
        x: values.clone(),
        nbinsx: bins,
        opacity: 0.9,
    })]);
    fig.layout.y_axis.title = Some("Count".to_string());

    if show_quantiles {
        if let Some(q) = describe::quartiles(&values) {
            for (x, label) in [(q.q1, "Q1"), (q.median, "Median"), (q.q3, "Q3")] {
                fig.layout.shapes.push(VerticalLine {
                    x,
                    dash: "dot".to_string(),
                    opacity: 0.6,
                });
                fig.layout.annotations.push(Annotation {
                    text: label.to_string(),
                    x,
                    position: "top".to_string(),
                });
            }
        }
    }

    Ok(style::apply(
        fig,
        "Sales Distribution by Item_MRP (Pricing Landscape)",
        style::DEFAULT_HEIGHT,
    ))
}

/// Ranked bar chart of total sales per group. The ranked order is written
/// into the categorical axis; renderers must not re-sort alphabetically.
pub fn grouped_bar(
    df: &DataFrame,
    group_key: &str,
    top_n: Option<usize>,
    orientation: Orientation,
) -> Result<Figure, ChartError> {
    let ranked = aggregate::ranked_groups(df, group_key, schema::ITEM_OUTLET_SALES, top_n)?;

    let labels: Vec<String> = ranked.iter().map(|g| display_label(&g.label)).collect();
    let totals: Vec<f64> = ranked.iter().map(|g| g.total).collect();

    let fig = match orientation {
        Orientation::Horizontal => {
            let mut fig = Figure::new(vec![Trace::Bar(BarTrace {
                x: AxisData::Numbers(totals),
                y: AxisData::Labels(labels.clone()),
                orientation,
            })]);
            fig.layout.x_axis.title = Some("Total Sales".to_string());
            fig.layout.y_axis.title = Some(group_key.to_string());
            fig.layout.y_axis.category_order = Some(labels);
            fig
        }
        Orientation::Vertical => {
            let mut fig = Figure::new(vec![Trace::Bar(BarTrace {
                x: AxisData::Labels(labels.clone()),
                y: AxisData::Numbers(totals),
                orientation,
            })]);
            fig.layout.x_axis.title = Some(group_key.to_string());
            fig.layout.y_axis.title = Some("Total Sales".to_string());
            fig.layout.x_axis.category_order = Some(labels);
            fig
        }
    };
    Ok(fig)
}

pub fn sales_by_item_type(df: &DataFrame, top_n: Option<usize>) -> Result<Figure, ChartError> {
    let fig = grouped_bar(df, schema::ITEM_TYPE, top_n, Orientation::Horizontal)?;
    Ok(style::apply(
        fig,
        "Total Sales by Item Type",
        style::DEFAULT_HEIGHT,
    ))
}

pub fn sales_by_outlet_type(df: &DataFrame) -> Result<Figure, ChartError> {
    let fig = grouped_bar(df, schema::OUTLET_TYPE, None, Orientation::Vertical)?;
    Ok(style::apply(
        fig,
        "Total Sales by Outlet Type",
        style::DEFAULT_HEIGHT,
    ))
}

pub fn sales_by_outlet_size(df: &DataFrame) -> Result<Figure, ChartError> {
    let fig = grouped_bar(df, schema::OUTLET_SIZE, None, Orientation::Vertical)?;
    Ok(style::apply(
        fig,
        "Total Sales by Outlet Size",
        style::DEFAULT_HEIGHT,
    ))
}

/// Share of total sales per location tier as a donut. Labels and
/// percentages are always shown.
pub fn location_share(df: &DataFrame, hole: f64) -> Result<Figure, ChartError> {
    schema::ensure_columns(df, &[schema::ITEM_OUTLET_SALES, schema::OUTLET_LOCATION_TYPE])?;

    let sums = aggregate::group_sums(df, schema::OUTLET_LOCATION_TYPE, schema::ITEM_OUTLET_SALES)?;
    let labels: Vec<String> = sums.keys().map(display_label).collect();
    let values: Vec<f64> = sums.values().copied().collect();

    let fig = Figure::new(vec![Trace::Pie(PieTrace {
        labels,
        values,
        hole,
        text_info: "percent+label".to_string(),
        text_position: "inside".to_string(),
    })]);
    Ok(style::apply(fig, "Sales Share by Location (Tier)", 380))
}

/// Item visibility against sales. The color dimension produces one trace
/// per category and is silently omitted when that column is absent, as is
/// the hover detail when either outlet column is missing.
pub fn visibility_scatter(df: &DataFrame, color_col: &str) -> Result<Figure, ChartError> {
    schema::ensure_columns(df, &[schema::ITEM_VISIBILITY, schema::ITEM_OUTLET_SALES])?;

    let xs = aggregate::measure_values(df, schema::ITEM_VISIBILITY)?;
    let ys = aggregate::measure_values(df, schema::ITEM_OUTLET_SALES)?;

    let hover = if schema::has_column(df, schema::OUTLET_TYPE)
        && schema::has_column(df, schema::OUTLET_LOCATION_TYPE)
    {
        let outlet_types = aggregate::group_labels(df, schema::OUTLET_TYPE)?;
        let tiers = aggregate::group_labels(df, schema::OUTLET_LOCATION_TYPE)?;
        Some(
            outlet_types
                .iter()
                .zip(&tiers)
                .map(|(t, l)| format!("{} | {}", display_label(t), display_label(l)))
                .collect::<Vec<String>>(),
        )
    } else {
        None
    };

    let color_labels = if schema::has_column(df, color_col) {
        Some(aggregate::group_labels(df, color_col)?)
    } else {
        None
    };

    struct Points {
        xs: Vec<f64>,
        ys: Vec<f64>,
        hover: Vec<String>,
    }

    // Partition points by category in first-seen order; rows missing either
    // coordinate are dropped from the plot.
    let mut by_category: IndexMap<Option<String>, Points> = IndexMap::new();
    for i in 0..df.height() {
        let (Some(x), Some(y)) = (xs[i], ys[i]) else {
            continue;
        };
        let category = color_labels.as_ref().map(|labels| labels[i].clone());
        let points = by_category
            .entry(category.flatten())
            .or_insert_with(|| Points {
                xs: Vec::new(),
                ys: Vec::new(),
                hover: Vec::new(),
            });
        points.xs.push(x);
        points.ys.push(y);
        if let Some(hover) = &hover {
            points.hover.push(hover[i].clone());
        }
    }

    let named = color_labels.is_some();
    let traces: Vec<Trace> = by_category
        .into_iter()
        .map(|(label, points)| {
            Trace::Scatter(ScatterTrace {
                name: named.then(|| display_label(&label)),
                x: AxisData::Numbers(points.xs),
                y: points.ys,
                mode: ScatterMode::Markers,
                opacity: Some(0.6),
                hover_text: (!points.hover.is_empty()).then_some(points.hover),
            })
        })
        .collect();

    let mut fig = Figure::new(traces);
    fig.layout.x_axis.title = Some("Item Visibility".to_string());
    fig.layout.y_axis.title = Some("Item Outlet Sales".to_string());
    Ok(style::apply(
        fig,
        "Visibility vs Sales (Scatter)",
        style::DEFAULT_HEIGHT,
    ))
}

/// Per-group box plot of sales. Boxes are precomputed five-number
/// summaries; outlier points are suppressed.
pub fn sales_box_by_category(
    df: &DataFrame,
    cat_col: &str,
    log_y: bool,
) -> Result<Figure, ChartError> {
    schema::ensure_columns(df, &[schema::ITEM_OUTLET_SALES, cat_col])?;

    let labels = aggregate::group_labels(df, cat_col)?;
    let values = aggregate::measure_values(df, schema::ITEM_OUTLET_SALES)?;

    let mut by_group: IndexMap<Option<String>, Vec<f64>> = IndexMap::new();
    for (label, value) in labels.into_iter().zip(values) {
        let group = by_group.entry(label).or_default();
        if let Some(v) = value {
            group.push(v);
        }
    }

    let traces: Vec<Trace> = by_group
        .iter()
        .filter_map(|(label, values)| {
            describe::box_summary(values).map(|s| {
                Trace::Box(BoxTrace {
                    name: display_label(label),
                    q1: s.q1,
                    median: s.median,
                    q3: s.q3,
                    lower_fence: s.whisker_low,
                    upper_fence: s.whisker_high,
                    mean: s.mean,
                })
            })
        })
        .collect();

    let mut fig = Figure::new(traces);
    if log_y {
        fig.layout.y_axis.scale = Some(AxisScale::Log);
    }
    fig.layout.x_axis.title = Some(cat_col.replace('_', " "));
    fig.layout.y_axis.title = Some("Item Outlet Sales".to_string());
    Ok(style::apply(
        fig,
        &format!("Sales Distribution by {cat_col} (Box Plot)"),
        420,
    ))
}

/// Correlation heatmap over the default (or given) numeric columns.
pub fn correlation_heatmap(df: &DataFrame, cols: Option<&[&str]>) -> Result<Figure, ChartError> {
    let cols = cols.unwrap_or(&DEFAULT_CORRELATION_COLUMNS);
    let matrix = correlation::correlation_matrix(df, cols)?;

    let mut fig = Figure::new(vec![Trace::Heatmap(HeatmapTrace {
        x: matrix.columns.clone(),
        y: matrix.columns.clone(),
        z: matrix.values,
        colorscale: "RdBu".to_string(),
        zmin: -1.0,
        zmax: 1.0,
        show_values: true,
    })]);
    fig.layout.x_axis.side = Some("bottom".to_string());
    Ok(style::apply(fig, "Correlation Heatmap", 420))
}

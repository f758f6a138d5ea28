//! Dashboard assembly.
//!
//! Combines the KPI cards and the fixed set of charts into one
//! serializable value, in the section order the page presents them. The
//! core stops here; positioning and rendering belong to the presentation
//! layer.

use polars::prelude::DataFrame;
use serde::Serialize;
use tracing::info;

use crate::charts::{self, ChartError, Figure, TrendPeriod};
use crate::data::schema;
use crate::stats;

/// Knobs of the default page. Field defaults mirror what the dashboard
/// ships with; callers override individual fields as needed.
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    /// Explicit date column for the trend chart, when the dataset has one.
    pub trend_date_col: Option<String>,
    pub trend_period: TrendPeriod,
    pub histogram_bins: usize,
    pub show_quantiles: bool,
    /// Truncate the item-type ranking; `None` keeps every category.
    pub item_type_top_n: Option<usize>,
    pub donut_hole: f64,
    pub box_log_y: bool,
    pub scatter_color: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            trend_date_col: None,
            trend_period: TrendPeriod::Month,
            histogram_bins: 30,
            show_quantiles: true,
            item_type_top_n: None,
            donut_hole: 0.5,
            box_log_y: false,
            scatter_color: schema::ITEM_TYPE.to_string(),
        }
    }
}

/// One headline metric card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KpiCard {
    pub label: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSection {
    pub title: String,
    pub figures: Vec<Figure>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub kpis: Vec<KpiCard>,
    pub sections: Vec<DashboardSection>,
}

/// Group a float into thousands, `1234567.89` -> `"1,234,567.89"`.
/// The NaN sentinel renders as an em dash.
fn format_thousands(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        return "—".to_string();
    }

    let formatted = format!("{value:.decimals$}");
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };

    let mut grouped = String::new();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    }
}

fn share_delta(part: f64, total: f64) -> String {
    let share = if total != 0.0 {
        part / total * 100.0
    } else {
        0.0
    };
    format!("{share:.1}% of total")
}

/// The four KPI cards: total sales, average sales per item, top category
/// and best outlet with their share-of-total deltas.
pub fn kpi_cards(df: &DataFrame) -> Result<Vec<KpiCard>, ChartError> {
    let total = stats::total_sum(df, schema::ITEM_OUTLET_SALES)?;
    let average = stats::mean(df, schema::ITEM_OUTLET_SALES)?;
    let top_category = stats::top_group(df, schema::ITEM_TYPE, schema::ITEM_OUTLET_SALES)?;
    let best_outlet = stats::best_outlet(df, schema::ITEM_OUTLET_SALES)?;

    Ok(vec![
        KpiCard {
            label: "Total Sales".to_string(),
            value: format_thousands(total, 0),
            delta: None,
        },
        KpiCard {
            label: "Avg Sales / Item".to_string(),
            value: format_thousands(average, 2),
            delta: None,
        },
        KpiCard {
            label: "Top Category".to_string(),
            value: top_category.label.unwrap_or_else(|| "—".to_string()),
            delta: Some(share_delta(top_category.total, total)),
        },
        KpiCard {
            label: "Best Outlet".to_string(),
            value: best_outlet.label.unwrap_or_else(|| "—".to_string()),
            delta: Some(share_delta(best_outlet.total, total)),
        },
    ])
}

/// Build the whole dashboard: KPI cards plus every chart, grouped into the
/// page's fixed sections.
pub fn build(df: &DataFrame, config: &DashboardConfig) -> Result<Dashboard, ChartError> {
    info!(rows = df.height(), "building dashboard");

    let kpis = kpi_cards(df)?;

    let sections = vec![
        DashboardSection {
            title: "Trends".to_string(),
            figures: vec![charts::sales_trend(
                df,
                config.trend_date_col.as_deref(),
                config.trend_period,
            )?],
        },
        DashboardSection {
            title: "Pricing".to_string(),
            figures: vec![charts::price_distribution(
                df,
                config.histogram_bins,
                config.show_quantiles,
            )?],
        },
        DashboardSection {
            title: "Comparisons".to_string(),
            figures: vec![
                charts::sales_by_item_type(df, config.item_type_top_n)?,
                charts::sales_by_outlet_type(df)?,
                charts::sales_by_outlet_size(df)?,
            ],
        },
        DashboardSection {
            title: "Proportions".to_string(),
            figures: vec![charts::location_share(df, config.donut_hole)?],
        },
        DashboardSection {
            title: "Drivers & Variability".to_string(),
            figures: vec![
                charts::visibility_scatter(df, &config.scatter_color)?,
                charts::sales_box_by_category(df, schema::ITEM_TYPE, config.box_log_y)?,
            ],
        },
        DashboardSection {
            title: "Advanced".to_string(),
            figures: vec![charts::correlation_heatmap(df, None)?],
        },
    ];

    info!(kpis = kpis.len(), sections = sections.len(), "dashboard built");
    Ok(Dashboard { kpis, sections })
}

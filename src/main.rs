//! Sales Insights - dashboard binary.
//!
//! Reads the sales dataset from its fixed relative path, assembles the
//! dashboard (KPI cards + figures), and writes it to `dashboard.json` for
//! the presentation layer. A missing or malformed input file is fatal.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::BufWriter;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sales_insights::dashboard::{self, DashboardConfig};
use sales_insights::data::{Dataset, DEFAULT_DATA_PATH};

const OUTPUT_PATH: &str = "dashboard.json";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let dataset = Dataset::load(DEFAULT_DATA_PATH)
        .with_context(|| format!("cannot read sales data at {DEFAULT_DATA_PATH}"))?;

    let config = DashboardConfig::default();
    let dashboard = dashboard::build(dataset.frame(), &config)
        .context("failed to build the dashboard")?;

    for kpi in &dashboard.kpis {
        match &kpi.delta {
            Some(delta) => info!("{}: {} ({})", kpi.label, kpi.value, delta),
            None => info!("{}: {}", kpi.label, kpi.value),
        }
    }

    let file = File::create(OUTPUT_PATH)
        .with_context(|| format!("cannot create {OUTPUT_PATH}"))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &dashboard)
        .context("failed to serialize the dashboard")?;

    info!(path = OUTPUT_PATH, "dashboard written");
    Ok(())
}

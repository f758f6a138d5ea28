//! Sales Insights - retail sales analytics core.
//!
//! Loads a fixed-schema sales CSV into an immutable in-memory table,
//! computes headline KPIs, and builds a fixed set of chart specifications
//! (trend, distribution, comparisons, proportions, scatter, box,
//! correlation) for a presentation layer to render.
//!
//! The pipeline is flat and one-way: [`data::Dataset`] -> aggregation in
//! [`stats`] / figure construction in [`charts`] -> [`dashboard::Dashboard`].
//! Every computation is a pure function over the loaded frame, so repeated
//! calls are always safe and always agree.

pub mod charts;
pub mod dashboard;
pub mod data;
pub mod stats;

//! Charts module - figure specifications and builders

mod builders;
pub mod figure;
pub mod style;

pub use builders::{
    correlation_heatmap, grouped_bar, location_share, price_distribution, sales_box_by_category,
    sales_by_item_type, sales_by_outlet_size, sales_by_outlet_type, sales_trend,
    visibility_scatter, ChartError, TrendPeriod, DEFAULT_CORRELATION_COLUMNS,
};
pub use figure::{Figure, Orientation, Trace};

//! Stats module - KPI aggregation, correlation, and descriptive summaries

pub mod aggregate;
pub mod correlation;
pub mod describe;

pub use aggregate::{
    best_outlet, mean, numeric_count, ranked_groups, top_group, total_sum, GroupTotal,
    MetricsError,
};
pub use correlation::{correlation_matrix, pearson, CorrelationMatrix};
pub use describe::{box_summary, percentile, quartiles, BoxSummary, Quartiles};

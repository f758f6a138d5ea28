//! Schema checks for the retail sales table.
//!
//! The schema is implicit: nothing is declared up front, but every
//! aggregation and chart runs an explicit column-presence check before it
//! computes anything. A missing column is a caller/schema mismatch and is
//! raised immediately; it is never recovered locally.

use polars::prelude::DataFrame;
use thiserror::Error;

// Well-known column names of the cleaned retail dataset.
pub const ITEM_OUTLET_SALES: &str = "Item_Outlet_Sales";
pub const ITEM_TYPE: &str = "Item_Type";
pub const ITEM_MRP: &str = "Item_MRP";
pub const ITEM_VISIBILITY: &str = "Item_Visibility";
pub const ITEM_WEIGHT: &str = "Item_Weight";
pub const OUTLET_IDENTIFIER: &str = "Outlet_Identifier";
pub const OUTLET_TYPE: &str = "Outlet_Type";
pub const OUTLET_SIZE: &str = "Outlet_Size";
pub const OUTLET_LOCATION_TYPE: &str = "Outlet_Location_Type";
pub const OUTLET_ESTABLISHMENT_YEAR: &str = "Outlet_Establishment_Year";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("missing required columns: {missing:?}")]
    MissingColumns { missing: Vec<String> },
    #[error("none of the requested numeric columns exist: {requested:?}")]
    NoNumericColumns { requested: Vec<String> },
}

/// Whether the table carries a column with this exact name.
pub fn has_column(df: &DataFrame, name: &str) -> bool {
    df.column(name).is_ok()
}

/// Check that every required column is present, reporting all absentees at
/// once rather than the first one found.
pub fn ensure_columns(df: &DataFrame, required: &[&str]) -> Result<(), SchemaError> {
    let missing: Vec<String> = required
        .iter()
        .filter(|name| !has_column(df, name))
        .map(|name| name.to_string())
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(SchemaError::MissingColumns { missing })
    }
}

//! Layout calculation modules
//!
//! This module turns a validated `Document` into a `PlacementPlan`:
//! - Page grid geometry (column widths and heights, cell widths)
//! - Flow planning (headers, rows, spacers, column and page breaks)
//! - Plan data types handed to the render backends

mod geometry;
mod planner;
mod types;

pub use geometry::*;
pub use planner::plan;
pub use types::*;

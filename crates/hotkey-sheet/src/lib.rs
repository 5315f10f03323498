mod constants;
pub mod layout;
mod loader;
mod measure;
mod model;
mod options;
pub mod render;
mod stats;
mod types;

pub use layout::{
    ItemKind, PageGeometry, PlacedHeading, PlacedItem, PlacedRow, PlacementPlan, plan,
};
pub use loader::{DEFAULT_TITLE, load_from_yaml, parse_str, parse_value};
pub use measure::{GlyphMetrics, MeasuredLine, Measurement, TextMeasurer};
pub use model::*;
pub use options::*;
pub use render::{generate_pdf, render_pdf_bytes, render_pdf_bytes_with_font};
pub use stats::{SheetStatistics, calculate_statistics, estimate_pages, statistics_for_plan};
pub use types::*;

//! Placement plan data types
//!
//! These types are the hand-off between the flow planner and a render
//! backend. A backend draws every item exactly where it says, in order.

use crate::options::LayoutConfig;

use super::PageGeometry;

/// What a placed item draws (or marks)
#[derive(Debug, Clone, PartialEq)]
pub enum ItemKind {
    /// First item of every page
    PageStart,
    /// A new column begins (index within the page)
    ColumnStart(usize),
    /// Section header
    Header(PlacedHeading),
    /// Subsection header
    Subheader(PlacedHeading),
    /// One hotkey entry
    Row(PlacedRow),
    /// Vertical gap between groups (height in points)
    Spacer(f32),
}

/// A section or subsection name wrapped to the column width
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedHeading {
    /// Name as written in the source
    pub text: String,
    /// Lines to draw, already in their display casing
    pub lines: Vec<String>,
}

/// A hotkey entry wrapped to its cells
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedRow {
    pub keys: String,
    pub description: String,
    /// Wrapped key text, one string per line
    pub key_lines: Vec<String>,
    /// Wrapped description text, one string per line
    pub description_lines: Vec<String>,
    /// Lines occupied by the taller of the two cells
    pub line_count: usize,
    /// Another row of the same group follows directly below in this column
    pub rule_below: bool,
}

/// An item positioned on the page/column grid
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedItem {
    /// Zero-based page index
    pub page: usize,
    /// Zero-based column index within the page
    pub column: usize,
    /// Distance from the top of the column area in points
    pub offset: f32,
    /// Vertical space consumed in points (zero for page/column markers)
    pub height: f32,
    pub kind: ItemKind,
}

impl PlacedItem {
    /// Bottom edge of the item, measured from the top of the column area
    pub fn bottom(&self) -> f32 {
        self.offset + self.height
    }

    /// Headers, subheaders and rows put ink on the page; markers and spacers don't
    pub fn is_drawable(&self) -> bool {
        matches!(
            self.kind,
            ItemKind::Header(_) | ItemKind::Subheader(_) | ItemKind::Row(_)
        )
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, ItemKind::Header(_) | ItemKind::Subheader(_))
    }

    pub fn as_row(&self) -> Option<&PlacedRow> {
        match &self.kind {
            ItemKind::Row(row) => Some(row),
            _ => None,
        }
    }
}

/// Ordered, positioned output of the flow planner
#[derive(Debug, Clone, PartialEq)]
pub struct PlacementPlan {
    /// Title drawn once at the top of the first page
    pub title: String,
    /// Configuration the plan was computed with
    pub config: LayoutConfig,
    /// Page grid the offsets refer to
    pub geometry: PageGeometry,
    /// Items ordered by (page, column, offset)
    pub items: Vec<PlacedItem>,
}

impl PlacementPlan {
    /// Number of pages the plan spans
    pub fn page_count(&self) -> usize {
        self.items.iter().map(|item| item.page + 1).max().unwrap_or(1)
    }

    pub fn rows(&self) -> impl Iterator<Item = &PlacedRow> {
        self.items.iter().filter_map(PlacedItem::as_row)
    }

    /// Items belonging to one page, in drawing order
    pub fn page_items(&self, page: usize) -> impl Iterator<Item = &PlacedItem> {
        self.items.iter().filter(move |item| item.page == page)
    }
}

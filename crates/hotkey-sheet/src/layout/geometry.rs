//! Page grid geometry
//!
//! Converts a `LayoutConfig` into the column grid of a landscape A4 page:
//! column widths and heights, cell widths inside a row, and the heights of
//! headers, subheaders and text lines.

use crate::constants::*;
use crate::options::LayoutConfig;

/// Height reserved at the top of the first page for the title
pub fn title_block_height(config: &LayoutConfig) -> f32 {
    title_font_size(config) * LINE_HEIGHT_FACTOR + TITLE_SPACING
}

/// Title size derived from the header size
pub fn title_font_size(config: &LayoutConfig) -> f32 {
    config.header_font_size + TITLE_SIZE_BOOST
}

/// Subheader size derived from the entry size
pub fn subheader_font_size(config: &LayoutConfig) -> f32 {
    config.font_size + SUBHEADER_SIZE_BOOST
}

/// Column grid and vertical metrics for one configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub page_width: f32,
    pub page_height: f32,
    pub margin: f32,
    pub columns: usize,
    pub gutter: f32,
    /// Width of each column in points
    pub column_width: f32,
    /// Space taken by the title on the first page
    pub title_block_height: f32,
    /// Baseline-to-baseline distance of entry text
    pub line_height: f32,
    /// Minimum height of a row
    pub row_height: f32,
    /// Height of a single-line section header, padding included
    pub header_height: f32,
    /// Height of a single-line subheader, padding included
    pub subheader_height: f32,
    header_line_height: f32,
    subheader_line_height: f32,
}

impl PageGeometry {
    pub fn new(config: &LayoutConfig) -> Self {
        let columns = config.columns.max(1);
        let gutters = (columns - 1) as f32 * COLUMN_GUTTER_PT;
        let column_width = (PAGE_WIDTH_PT - 2.0 * config.margin - gutters) / columns as f32;
        let header_line_height = config.header_font_size * LINE_HEIGHT_FACTOR;
        let subheader_line_height = subheader_font_size(config) * LINE_HEIGHT_FACTOR;

        Self {
            page_width: PAGE_WIDTH_PT,
            page_height: PAGE_HEIGHT_PT,
            margin: config.margin,
            columns,
            gutter: COLUMN_GUTTER_PT,
            column_width,
            title_block_height: title_block_height(config),
            line_height: config.font_size * LINE_HEIGHT_FACTOR,
            row_height: config.row_height,
            header_height: header_line_height + HEADER_PADDING,
            subheader_height: subheader_line_height + SUBHEADER_PADDING,
            header_line_height,
            subheader_line_height,
        }
    }

    /// Usable column height on the given page (the first page loses the title block)
    pub fn column_height(&self, page: usize) -> f32 {
        self.page_height - 2.0 * self.margin - self.title_offset(page)
    }

    /// Distance from the top page edge to the top of the column area
    pub fn column_top(&self, page: usize) -> f32 {
        self.margin + self.title_offset(page)
    }

    /// Left edge of a column, measured from the left page edge
    pub fn column_left(&self, column: usize) -> f32 {
        self.margin + column as f32 * (self.column_width + self.gutter)
    }

    /// Width of the key cell (before padding)
    pub fn key_cell_width(&self) -> f32 {
        self.column_width * KEY_CELL_SHARE
    }

    /// Width of the description cell (before padding)
    pub fn description_cell_width(&self) -> f32 {
        self.column_width - self.key_cell_width()
    }

    /// Width available to key text
    pub fn key_text_width(&self) -> f32 {
        (self.key_cell_width() - 2.0 * CELL_PADDING).max(0.0)
    }

    /// Width available to description text
    pub fn description_text_width(&self) -> f32 {
        (self.description_cell_width() - 2.0 * CELL_PADDING).max(0.0)
    }

    /// Height of a row wrapping to `line_count` lines
    pub fn row_height_for(&self, line_count: usize) -> f32 {
        self.row_height.max(line_count as f32 * self.line_height)
    }

    /// Width available to subheader text after its indent
    pub fn subheader_text_width(&self) -> f32 {
        (self.column_width - SUBHEADER_INDENT).max(0.0)
    }

    /// Height of a section header wrapping to `line_count` lines
    pub fn header_height_for(&self, line_count: usize) -> f32 {
        line_count.max(1) as f32 * self.header_line_height + HEADER_PADDING
    }

    /// Height of a subheader wrapping to `line_count` lines
    pub fn subheader_height_for(&self, line_count: usize) -> f32 {
        line_count.max(1) as f32 * self.subheader_line_height + SUBHEADER_PADDING
    }

    fn title_offset(&self, page: usize) -> f32 {
        if page == 0 {
            self.title_block_height
        } else {
            0.0
        }
    }
}

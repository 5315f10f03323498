//! Shared constants for sheet layout
//!
//! Page geometry, typographic ratios and glyph metrics used by the
//! measurer, the planner and the PDF backend.

// =============================================================================
// Page Dimensions
// =============================================================================

/// Page width in points (A4 landscape: 297mm)
pub const PAGE_WIDTH_PT: f32 = 841.89;

/// Page height in points (A4 landscape: 210mm)
pub const PAGE_HEIGHT_PT: f32 = 595.28;

/// Horizontal gap between adjacent columns (points)
pub const COLUMN_GUTTER_PT: f32 = 15.0;

// =============================================================================
// Typography
// =============================================================================

/// Baseline-to-baseline distance as a multiple of the font size
pub const LINE_HEIGHT_FACTOR: f32 = 1.2;

/// The title is set this many points larger than section headers
pub const TITLE_SIZE_BOOST: f32 = 3.0;

/// Space between the title and the first row of columns (points)
pub const TITLE_SPACING: f32 = 12.0;

/// Vertical padding around a section header, top and bottom combined (points)
pub const HEADER_PADDING: f32 = 8.0;

/// Subheaders are set this many points larger than entry text
pub const SUBHEADER_SIZE_BOOST: f32 = 1.0;

/// Vertical padding around a subheader, top and bottom combined (points)
pub const SUBHEADER_PADDING: f32 = 4.0;

/// Left indent of subheader text within its column (points)
pub const SUBHEADER_INDENT: f32 = 8.0;

/// Share of the column width given to the key cell of a row
pub const KEY_CELL_SHARE: f32 = 0.35;

/// Horizontal padding inside each row cell, per side (points)
pub const CELL_PADDING: f32 = 3.0;

/// Line width for the rule under section headers (points)
pub const HEADER_RULE_WIDTH: f32 = 0.75;

/// Line width for the separator between rows (points)
pub const ROW_RULE_WIDTH: f32 = 0.25;

// =============================================================================
// Glyph Metrics
// =============================================================================

/// Advance of every Courier glyph as a fraction of the font size
pub const MONOSPACE_CHAR_WIDTH_RATIO: f32 = 0.6;

/// Advance of double-width (East Asian wide) glyphs in a monospace face
pub const MONOSPACE_WIDE_CHAR_WIDTH_RATIO: f32 = 1.2;

/// Helvetica-like advance for narrow glyphs (`i`, `l`, `.`, `,` ...)
pub const NARROW_CHAR_WIDTH_RATIO: f32 = 0.28;

/// Helvetica-like advance for a space
pub const SPACE_WIDTH_RATIO: f32 = 0.28;

/// Helvetica-like advance for regular lower-case glyphs
pub const REGULAR_CHAR_WIDTH_RATIO: f32 = 0.5;

/// Helvetica-like advance for capitals and digits
pub const CAPITAL_CHAR_WIDTH_RATIO: f32 = 0.62;

/// Helvetica-like advance for the widest glyphs (`m`, `w`, `M`, `W`, `@`)
pub const WIDE_CHAR_WIDTH_RATIO: f32 = 0.83;

/// Advance of East Asian wide glyphs in a proportional face
pub const FULLWIDTH_CHAR_WIDTH_RATIO: f32 = 1.0;

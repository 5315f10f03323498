//! Rendering of placement plans
//!
//! This module maps a finished `PlacementPlan` onto a drawing surface:
//! - `Canvas`: the small set of drawing operations a backend provides
//! - `render`: walks the plan and issues canvas calls at the planned positions
//! - `PdfCanvas`: printpdf backend producing PDF bytes
//! - `RecordingCanvas`: in-memory backend that records every call
//!
//! Canvas coordinates are in points, measured from the top-left corner of
//! the page. Backends with a bottom-left origin flip the y axis themselves.

mod pdf;
mod recording;

pub use pdf::{PdfCanvas, generate_pdf, render_pdf_bytes, render_pdf_bytes_with_font};
pub use recording::{DrawCall, RecordingCanvas};

use crate::constants::*;
use crate::layout::{
    ItemKind, PlacedHeading, PlacedItem, PlacedRow, PlacementPlan, subheader_font_size,
    title_font_size,
};
use crate::measure::TextMeasurer;
use crate::types::Result;

/// Typeface used for a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    /// Descriptions
    Regular,
    /// Title and section headers
    Bold,
    /// Subsection headers
    Oblique,
    /// Key labels
    MonospaceBold,
}

impl FontFace {
    /// Width model matching the face
    pub fn measurer(self) -> TextMeasurer {
        match self {
            FontFace::MonospaceBold => TextMeasurer::MONOSPACE,
            FontFace::Regular | FontFace::Bold | FontFace::Oblique => TextMeasurer::PROPORTIONAL,
        }
    }
}

/// Drawing surface a plan is rendered onto
pub trait Canvas {
    type Output;

    /// Start a new page; all following calls draw on it
    fn begin_page(&mut self, width: f32, height: f32) -> Result<()>;

    /// Draw a single line of text with its baseline at `baseline`
    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        face: FontFace,
        size: f32,
    ) -> Result<()>;

    /// Draw a horizontal rule from `x1` to `x2`
    fn draw_rule(&mut self, x1: f32, x2: f32, y: f32, thickness: f32) -> Result<()>;

    /// Close the surface and hand back what was drawn
    fn finish(self) -> Result<Self::Output>;

    /// Width of `text` when set in `face` at `size`
    fn text_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        face.measurer().text_width(text, size)
    }
}

/// Draw every item of the plan, in order, onto `canvas`.
///
/// Positions come straight from the plan; nothing is re-wrapped or moved.
pub fn render<C: Canvas>(plan: &PlacementPlan, mut canvas: C) -> Result<C::Output> {
    for item in &plan.items {
        match &item.kind {
            ItemKind::PageStart => {
                canvas.begin_page(plan.geometry.page_width, plan.geometry.page_height)?;
                if item.page == 0 {
                    draw_title(plan, &mut canvas)?;
                }
            }
            ItemKind::ColumnStart(_) | ItemKind::Spacer(_) => {}
            ItemKind::Header(heading) => draw_header(plan, item, heading, &mut canvas)?,
            ItemKind::Subheader(heading) => {
                let size = subheader_font_size(&plan.config);
                let (left, top) = item_origin(plan, item);
                draw_lines(
                    &mut canvas,
                    &heading.lines,
                    left + SUBHEADER_INDENT,
                    top + SUBHEADER_PADDING / 2.0 + size,
                    FontFace::Oblique,
                    size,
                )?;
            }
            ItemKind::Row(row) => draw_row(plan, item, row, &mut canvas)?,
        }
    }

    canvas.finish()
}

/// Left edge of the item's column and top edge of the item, from the page origin
fn item_origin(plan: &PlacementPlan, item: &PlacedItem) -> (f32, f32) {
    (
        plan.geometry.column_left(item.column),
        plan.geometry.column_top(item.page) + item.offset,
    )
}

fn draw_title<C: Canvas>(plan: &PlacementPlan, canvas: &mut C) -> Result<()> {
    let size = title_font_size(&plan.config);
    let width = canvas.text_width(&plan.title, FontFace::Bold, size);
    let x = ((plan.geometry.page_width - width) / 2.0).max(plan.geometry.margin);
    canvas.draw_text(
        &plan.title,
        x,
        plan.geometry.margin + size,
        FontFace::Bold,
        size,
    )
}

/// Draw pre-wrapped lines downwards from the first baseline
fn draw_lines<C: Canvas>(
    canvas: &mut C,
    lines: &[String],
    x: f32,
    first_baseline: f32,
    face: FontFace,
    size: f32,
) -> Result<()> {
    for (i, line) in lines.iter().enumerate() {
        let baseline = first_baseline + i as f32 * size * LINE_HEIGHT_FACTOR;
        canvas.draw_text(line, x, baseline, face, size)?;
    }
    Ok(())
}

fn draw_header<C: Canvas>(
    plan: &PlacementPlan,
    item: &PlacedItem,
    heading: &PlacedHeading,
    canvas: &mut C,
) -> Result<()> {
    let size = plan.config.header_font_size;
    let (left, top) = item_origin(plan, item);

    draw_lines(
        canvas,
        &heading.lines,
        left,
        top + HEADER_PADDING / 2.0 + size,
        FontFace::Bold,
        size,
    )?;
    canvas.draw_rule(
        left,
        left + plan.geometry.column_width,
        top + item.height - HEADER_PADDING / 4.0,
        HEADER_RULE_WIDTH,
    )
}

fn draw_row<C: Canvas>(
    plan: &PlacementPlan,
    item: &PlacedItem,
    row: &PlacedRow,
    canvas: &mut C,
) -> Result<()> {
    let geometry = &plan.geometry;
    let size = plan.config.font_size;
    let (left, top) = item_origin(plan, item);

    // Center the text block when the minimum row height exceeds it
    let text_height = row.line_count as f32 * geometry.line_height;
    let inset = ((item.height - text_height) / 2.0).max(0.0);
    let first_baseline = top + inset + size;

    draw_lines(
        canvas,
        &row.key_lines,
        left + CELL_PADDING,
        first_baseline,
        FontFace::MonospaceBold,
        size,
    )?;
    draw_lines(
        canvas,
        &row.description_lines,
        left + geometry.key_cell_width() + CELL_PADDING,
        first_baseline,
        FontFace::Regular,
        size,
    )?;

    if row.rule_below {
        canvas.draw_rule(
            left,
            left + geometry.column_width,
            top + item.height,
            ROW_RULE_WIDTH,
        )?;
    }

    Ok(())
}

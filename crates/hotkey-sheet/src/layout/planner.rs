//! Flow planner
//!
//! Walks the content tree once and places every header, subheader and row
//! on the column grid, breaking to the next column (or page) when the
//! remaining height runs out. All running state lives in a `Cursor` owned by
//! the planning run.

use crate::measure::TextMeasurer;
use crate::model::{Document, HotkeyEntry, Section, SectionChild};
use crate::types::Result;

use super::{
    ItemKind, PageGeometry, PlacedHeading, PlacedItem, PlacedRow, PlacementPlan,
    subheader_font_size,
};

/// Lay out a document.
///
/// Validates the document (content and configuration) first and returns the
/// full violation list if anything is wrong. Once planning starts it never
/// fails: content too tall for a column is placed on its own.
pub fn plan(document: &Document) -> Result<PlacementPlan> {
    document.ensure_valid()?;

    let plan = FlowPlanner::new(document).run();
    log::info!(
        "Planned {} rows in {} section(s) across {} page(s)",
        plan.rows().count(),
        document.sections.len(),
        plan.page_count()
    );
    Ok(plan)
}

/// Position of the planner on the grid
#[derive(Debug, Clone, Copy)]
struct Cursor {
    page: usize,
    column: usize,
    /// Consumed height of the current column
    offset: f32,
    /// Usable height of the current column
    height: f32,
    /// A heading was just placed and must stay with the row below it
    holding_heading: bool,
}

impl Cursor {
    fn at_top(&self) -> bool {
        self.offset <= 0.0
    }

    fn fits(&self, height: f32) -> bool {
        self.offset + height <= self.height
    }
}

/// A row measured against the column grid, not yet positioned
struct MeasuredRow {
    row: PlacedRow,
    height: f32,
}

/// A heading wrapped to its column, not yet positioned
struct MeasuredHeading {
    heading: PlacedHeading,
    height: f32,
}

enum MeasuredChild {
    Subsection {
        heading: MeasuredHeading,
        rows: Vec<MeasuredRow>,
    },
    Entry(MeasuredRow),
}

impl MeasuredChild {
    /// Height that must fit before this child starts: a subsection's heading
    /// plus its first row, or the entry's own row
    fn lead_height(&self) -> f32 {
        match self {
            MeasuredChild::Subsection { heading, rows } => {
                heading.height + rows.first().map_or(0.0, |r| r.height)
            }
            MeasuredChild::Entry(row) => row.height,
        }
    }
}

struct FlowPlanner<'a> {
    document: &'a Document,
    geometry: PageGeometry,
    cursor: Cursor,
    items: Vec<PlacedItem>,
    /// Index of the previous row while a run of rows continues in one column
    last_row: Option<usize>,
}

impl<'a> FlowPlanner<'a> {
    fn new(document: &'a Document) -> Self {
        let geometry = PageGeometry::new(&document.config);
        Self {
            document,
            geometry,
            cursor: Cursor {
                page: 0,
                column: 0,
                offset: 0.0,
                height: geometry.column_height(0),
                holding_heading: false,
            },
            items: Vec::new(),
            last_row: None,
        }
    }

    fn run(mut self) -> PlacementPlan {
        self.push_marker(ItemKind::PageStart);
        self.push_marker(ItemKind::ColumnStart(0));

        let document = self.document;
        for (index, section) in document.sections.iter().enumerate() {
            if index > 0 {
                self.spacer(document.config.section_spacing);
            }
            self.place_section(section);
        }

        PlacementPlan {
            title: self.document.title.clone(),
            config: self.document.config.clone(),
            geometry: self.geometry,
            items: self.items,
        }
    }

    fn place_section(&mut self, section: &Section) {
        let header = self.measure_header(&section.name);
        let children: Vec<MeasuredChild> = section
            .children
            .iter()
            .map(|child| self.measure_child(child))
            .collect();

        // Header, optional leading subheader and the first row travel together
        let lead = header.height + children.first().map_or(0.0, MeasuredChild::lead_height);
        self.break_unless_fits(lead);
        self.push_heading(ItemKind::Header(header.heading), header.height);

        let count = children.len();
        for (index, child) in children.into_iter().enumerate() {
            match child {
                MeasuredChild::Entry(row) => self.place_row(row),
                MeasuredChild::Subsection { heading, rows } => {
                    if index > 0 {
                        let first = rows.first().map_or(0.0, |r| r.height);
                        self.break_unless_fits(heading.height + first);
                    }
                    self.push_heading(ItemKind::Subheader(heading.heading), heading.height);
                    for row in rows {
                        self.place_row(row);
                    }
                    if index + 1 < count {
                        self.spacer(self.document.config.subsection_spacing);
                    }
                }
            }
        }
    }

    fn measure_child(&self, child: &SectionChild) -> MeasuredChild {
        match child {
            SectionChild::Subsection(sub) => MeasuredChild::Subsection {
                heading: self.measure_subheader(&sub.name),
                rows: sub.entries.iter().map(|e| self.measure_entry(e)).collect(),
            },
            SectionChild::Entry(entry) => MeasuredChild::Entry(self.measure_entry(entry)),
        }
    }

    /// Section headers are drawn upper-cased, so that is what gets wrapped
    fn measure_header(&self, name: &str) -> MeasuredHeading {
        let lines = TextMeasurer::PROPORTIONAL.wrap(
            &name.to_uppercase(),
            self.document.config.header_font_size,
            self.geometry.column_width,
        );
        MeasuredHeading {
            height: self.geometry.header_height_for(lines.len()),
            heading: PlacedHeading {
                text: name.to_string(),
                lines,
            },
        }
    }

    fn measure_subheader(&self, name: &str) -> MeasuredHeading {
        let lines = TextMeasurer::PROPORTIONAL.wrap(
            name,
            subheader_font_size(&self.document.config),
            self.geometry.subheader_text_width(),
        );
        MeasuredHeading {
            height: self.geometry.subheader_height_for(lines.len()),
            heading: PlacedHeading {
                text: name.to_string(),
                lines,
            },
        }
    }

    /// Wrap both cells of an entry. Column widths are uniform, so the result
    /// holds wherever the row ends up.
    fn measure_entry(&self, entry: &HotkeyEntry) -> MeasuredRow {
        let font_size = self.document.config.font_size;
        let key_lines =
            TextMeasurer::MONOSPACE.wrap(&entry.keys, font_size, self.geometry.key_text_width());
        let description_lines = TextMeasurer::PROPORTIONAL.wrap(
            &entry.description,
            font_size,
            self.geometry.description_text_width(),
        );
        let line_count = key_lines.len().max(description_lines.len());

        MeasuredRow {
            height: self.geometry.row_height_for(line_count),
            row: PlacedRow {
                keys: entry.keys.clone(),
                description: entry.description.clone(),
                key_lines,
                description_lines,
                line_count,
                rule_below: false,
            },
        }
    }

    fn place_row(&mut self, measured: MeasuredRow) {
        self.break_unless_fits(measured.height);

        if measured.height > self.cursor.height {
            log::debug!(
                "Row {:?} is {:.1}pt tall but the column holds {:.1}pt; letting it overflow",
                measured.row.keys,
                measured.height,
                self.cursor.height
            );
        }

        if let Some(previous) = self.last_row {
            if let ItemKind::Row(row) = &mut self.items[previous].kind {
                row.rule_below = true;
            }
        }

        self.last_row = Some(self.items.len());
        self.push(ItemKind::Row(measured.row), measured.height);
        self.cursor.holding_heading = false;
    }

    fn push_heading(&mut self, kind: ItemKind, height: f32) {
        self.last_row = None;
        self.push(kind, height);
        self.cursor.holding_heading = true;
    }

    /// Gap between groups. Never placed at the top of a column, and dropped
    /// (with a column break) when it doesn't fit.
    fn spacer(&mut self, height: f32) {
        self.last_row = None;
        if self.cursor.at_top() {
            return;
        }
        if !self.cursor.fits(height) {
            self.advance_column();
            return;
        }
        self.push(ItemKind::Spacer(height), height);
    }

    /// Move to the next column unless `height` fits here.
    ///
    /// A column that holds nothing yet, or whose last item is a heading,
    /// always accepts the content so headings are never stranded and
    /// oversized rows still terminate.
    fn break_unless_fits(&mut self, height: f32) {
        if self.cursor.holding_heading || self.cursor.at_top() || self.cursor.fits(height) {
            return;
        }
        self.advance_column();
    }

    fn advance_column(&mut self) {
        self.last_row = None;
        self.cursor.offset = 0.0;

        if self.cursor.column + 1 < self.geometry.columns {
            self.cursor.column += 1;
            log::debug!(
                "Column break: page {} column {}",
                self.cursor.page,
                self.cursor.column
            );
            self.push_marker(ItemKind::ColumnStart(self.cursor.column));
        } else {
            self.cursor.page += 1;
            self.cursor.column = 0;
            self.cursor.height = self.geometry.column_height(self.cursor.page);
            log::debug!("Page break: page {}", self.cursor.page);
            self.push_marker(ItemKind::PageStart);
            self.push_marker(ItemKind::ColumnStart(0));
        }
    }

    fn push_marker(&mut self, kind: ItemKind) {
        self.items.push(PlacedItem {
            page: self.cursor.page,
            column: self.cursor.column,
            offset: 0.0,
            height: 0.0,
            kind,
        });
    }

    fn push(&mut self, kind: ItemKind, height: f32) {
        self.items.push(PlacedItem {
            page: self.cursor.page,
            column: self.cursor.column,
            offset: self.cursor.offset,
            height,
            kind,
        });
        self.cursor.offset += height;
    }
}

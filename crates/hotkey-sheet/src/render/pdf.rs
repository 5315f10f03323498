use super::{Canvas, FontFace, render};
use crate::layout::{PlacementPlan, plan};
use crate::model::Document;
use crate::types::{Result, SheetError};
use printpdf::graphics::{LinePoint, PaintMode, Point, Polygon, PolygonRing, WindingOrder};
use printpdf::*;
use std::path::Path;

/// Plan, render and write a document to `output_path`.
///
/// Text is set in the builtin fonts unless the config names a `font_file`,
/// which is then embedded and used for every face.
///
/// Returns the plan that was drawn so callers can report on it without
/// planning twice.
pub async fn generate_pdf(
    document: &Document,
    output_path: impl AsRef<Path>,
) -> Result<PlacementPlan> {
    let document = document.clone();
    let output_path = output_path.as_ref().to_owned();

    let font_bytes = match &document.config.font_file {
        Some(path) => Some(tokio::fs::read(path).await?),
        None => None,
    };

    let (plan, bytes) = tokio::task::spawn_blocking(move || {
        let plan = plan(&document)?;
        let bytes = match &font_bytes {
            Some(font_bytes) => render_pdf_bytes_with_font(&plan, font_bytes)?,
            None => render_pdf_bytes(&plan)?,
        };
        Ok::<_, SheetError>((plan, bytes))
    })
    .await??;

    tokio::fs::write(&output_path, &bytes).await?;
    log::info!(
        "Wrote {} page(s), {} bytes to {}",
        plan.page_count(),
        bytes.len(),
        output_path.display()
    );

    Ok(plan)
}

/// Render a plan to PDF bytes using the builtin fonts.
///
/// The builtin fonts only encode ASCII; any other text fails with
/// `SheetError::Pdf`.
pub fn render_pdf_bytes(plan: &PlacementPlan) -> Result<Vec<u8>> {
    render(plan, PdfCanvas::new(&plan.title))
}

/// Render a plan to PDF bytes with a TrueType/OpenType font embedded
pub fn render_pdf_bytes_with_font(plan: &PlacementPlan, font_bytes: &[u8]) -> Result<Vec<u8>> {
    render(plan, PdfCanvas::with_font(&plan.title, font_bytes)?)
}

/// printpdf backend.
///
/// Draws with the builtin Helvetica and Courier faces, or with a single
/// embedded font for every face when one is given.
pub struct PdfCanvas {
    doc: PdfDocument,
    page: Option<PageInProgress>,
    font: Option<EmbeddedFont>,
}

struct EmbeddedFont {
    id: FontId,
    parsed: ParsedFont,
}

impl EmbeddedFont {
    fn glyph(&self, ch: char) -> Option<u16> {
        self.parsed.lookup_glyph_index(ch as u32)
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        let units_per_em = f32::from(self.parsed.font_metrics.units_per_em.max(1));
        let units: f32 = text
            .chars()
            .filter_map(|ch| self.glyph(ch))
            .map(|glyph| f32::from(self.parsed.get_horizontal_advance(glyph)))
            .sum();
        units / units_per_em * size
    }
}

struct PageInProgress {
    width_pt: f32,
    height_pt: f32,
    ops: Vec<Op>,
}

impl PdfCanvas {
    pub fn new(title: &str) -> Self {
        Self {
            doc: PdfDocument::new(title),
            page: None,
            font: None,
        }
    }

    /// Embed `font_bytes` and draw every face with it
    pub fn with_font(title: &str, font_bytes: &[u8]) -> Result<Self> {
        let mut doc = PdfDocument::new(title);

        let mut font_warnings = Vec::new();
        let parsed = ParsedFont::from_bytes(font_bytes, 0, &mut font_warnings)
            .ok_or_else(|| SheetError::Pdf("Failed to parse font".to_string()))?;
        let id = doc.add_font(&parsed);

        Ok(Self {
            doc,
            page: None,
            font: Some(EmbeddedFont { id, parsed }),
        })
    }

    fn current_page(&mut self) -> Result<&mut PageInProgress> {
        self.page
            .as_mut()
            .ok_or_else(|| SheetError::Pdf("drawing before the first page was started".to_string()))
    }

    fn flush_page(&mut self) {
        if let Some(page) = self.page.take() {
            self.doc.pages.push(PdfPage::new(
                Mm::from(Pt(page.width_pt)),
                Mm::from(Pt(page.height_pt)),
                page.ops,
            ));
        }
    }
}

fn builtin_font(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Regular => BuiltinFont::Helvetica,
        FontFace::Bold => BuiltinFont::HelveticaBold,
        FontFace::Oblique => BuiltinFont::HelveticaOblique,
        FontFace::MonospaceBold => BuiltinFont::CourierBold,
    }
}

impl Canvas for PdfCanvas {
    type Output = Vec<u8>;

    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        self.flush_page();
        self.page = Some(PageInProgress {
            width_pt: width,
            height_pt: height,
            ops: Vec::new(),
        });
        Ok(())
    }

    fn draw_text(
        &mut self,
        text: &str,
        x: f32,
        baseline: f32,
        face: FontFace,
        size: f32,
    ) -> Result<()> {
        let (size_op, write_op) = match &self.font {
            Some(font) => {
                let missing = text
                    .chars()
                    .filter(|ch| !ch.is_whitespace() && font.glyph(*ch).is_none())
                    .count();
                if missing > 0 {
                    log::warn!("Font has no glyph for {missing} character(s) of {text:?}");
                }
                (
                    Op::SetFontSize {
                        font: font.id.clone(),
                        size: Pt(size),
                    },
                    Op::WriteText {
                        items: vec![TextItem::Text(text.to_string())],
                        font: font.id.clone(),
                    },
                )
            }
            None => {
                if !text.is_ascii() {
                    return Err(SheetError::Pdf(format!(
                        "{text:?} can't be set in the builtin fonts; \
                         set `font_file` in the config to a TrueType font that covers it"
                    )));
                }
                (
                    Op::SetFontSizeBuiltinFont {
                        font: builtin_font(face),
                        size: Pt(size),
                    },
                    Op::WriteTextBuiltinFont {
                        items: vec![TextItem::Text(text.to_string())],
                        font: builtin_font(face),
                    },
                )
            }
        };

        let page = self.current_page()?;
        let y = page.height_pt - baseline;

        page.ops.push(Op::StartTextSection);
        page.ops.push(Op::SetTextCursor {
            pos: Point { x: Pt(x), y: Pt(y) },
        });
        page.ops.push(size_op);
        page.ops.push(write_op);
        page.ops.push(Op::EndTextSection);
        Ok(())
    }

    fn text_width(&self, text: &str, face: FontFace, size: f32) -> f32 {
        match &self.font {
            Some(font) => font.text_width(text, size),
            None => face.measurer().text_width(text, size),
        }
    }

    fn draw_rule(&mut self, x1: f32, x2: f32, y: f32, thickness: f32) -> Result<()> {
        let page = self.current_page()?;
        let y = page.height_pt - y;

        page.ops.push(Op::SetOutlineThickness { pt: Pt(thickness) });
        page.ops.push(Op::DrawPolygon {
            polygon: Polygon {
                rings: vec![PolygonRing {
                    points: vec![
                        LinePoint {
                            p: Point { x: Pt(x1), y: Pt(y) },
                            bezier: false,
                        },
                        LinePoint {
                            p: Point { x: Pt(x2), y: Pt(y) },
                            bezier: false,
                        },
                    ],
                }],
                mode: PaintMode::Stroke,
                winding_order: WindingOrder::NonZero,
            },
        });
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<u8>> {
        self.flush_page();

        let mut warnings = Vec::new();
        let bytes = self.doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            log::debug!("PDF writer reported {} warning(s)", warnings.len());
        }

        Ok(bytes)
    }
}

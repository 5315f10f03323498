use super::{Canvas, FontFace};
use crate::types::Result;

/// One call made against a `RecordingCanvas`
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    BeginPage {
        width: f32,
        height: f32,
    },
    Text {
        text: String,
        x: f32,
        baseline: f32,
        face: FontFace,
        size: f32,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
    },
}

/// Canvas that keeps every draw call in memory.
///
/// Useful for checking what a plan draws without producing a real document.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Canvas for RecordingCanvas {
    type Output = Vec<DrawCall>;

    fn begin_page(&mut self, width: f32, height: f32) -> Result<()> {
        self.calls.push(DrawCall::BeginPage { width, height });
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
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            baseline,
            face,
            size,
        });
        Ok(())
    }

    fn draw_rule(&mut self, x1: f32, x2: f32, y: f32, thickness: f32) -> Result<()> {
        self.calls.push(DrawCall::Rule {
            x1,
            x2,
            y,
            thickness,
        });
        Ok(())
    }

    fn finish(self) -> Result<Vec<DrawCall>> {
        Ok(self.calls)
    }
}

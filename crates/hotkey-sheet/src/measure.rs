//! Text measurement and greedy word wrapping
//!
//! Widths come from a per-character approximation of the builtin PDF faces
//! rather than real font tables. The approximation only has to be stable:
//! the planner and the renderer both go through it, so the page count always
//! matches what gets drawn.

use crate::constants::*;
use unicode_width::UnicodeWidthChar;

/// Which glyph width model to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphMetrics {
    /// Every glyph has the same advance (Courier)
    Monospace,
    /// Advances vary by glyph class (Helvetica)
    Proportional,
}

/// Result of measuring a piece of text against a width limit
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measurement {
    /// Number of wrapped lines; zero for blank text
    pub line_count: usize,
    /// Width of the longest wrapped line in points
    pub width: f32,
}

/// A wrapped line together with its measured width
#[derive(Debug, Clone, PartialEq)]
pub struct MeasuredLine {
    pub text: String,
    pub width: f32,
}

/// Measures and wraps text for one font face
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextMeasurer {
    metrics: GlyphMetrics,
}

impl TextMeasurer {
    /// Measurer for the key column (Courier-Bold)
    pub const MONOSPACE: TextMeasurer = TextMeasurer::new(GlyphMetrics::Monospace);
    /// Measurer for descriptions and headings (Helvetica)
    pub const PROPORTIONAL: TextMeasurer = TextMeasurer::new(GlyphMetrics::Proportional);

    pub const fn new(metrics: GlyphMetrics) -> Self {
        Self { metrics }
    }

    /// Advance of a single character in points
    pub fn char_width(&self, ch: char, font_size: f32) -> f32 {
        let columns = ch.width().unwrap_or(0);
        if columns == 0 {
            return 0.0;
        }

        let ratio = match self.metrics {
            GlyphMetrics::Monospace if columns > 1 => MONOSPACE_WIDE_CHAR_WIDTH_RATIO,
            GlyphMetrics::Monospace => MONOSPACE_CHAR_WIDTH_RATIO,
            GlyphMetrics::Proportional if columns > 1 => FULLWIDTH_CHAR_WIDTH_RATIO,
            GlyphMetrics::Proportional => proportional_ratio(ch),
        };
        ratio * font_size
    }

    /// Width of `text` set on a single line
    pub fn text_width(&self, text: &str, font_size: f32) -> f32 {
        text.chars().map(|ch| self.char_width(ch, font_size)).sum()
    }

    /// Greedy whitespace wrap.
    ///
    /// Words are added to the current line until the next one would push it
    /// past `max_width`. A word that is wider than `max_width` on its own gets
    /// a line to itself and is never split. Runs of whitespace collapse to a
    /// single space.
    pub fn wrap_measured(&self, text: &str, font_size: f32, max_width: f32) -> Vec<MeasuredLine> {
        let space = self.char_width(' ', font_size);
        let mut lines = Vec::new();
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in text.split_whitespace() {
            let word_width = self.text_width(word, font_size);

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            let candidate = current_width + space + word_width;
            if candidate > max_width {
                lines.push(MeasuredLine {
                    text: std::mem::take(&mut current),
                    width: current_width,
                });
                current.push_str(word);
                current_width = word_width;
            } else {
                current.push(' ');
                current.push_str(word);
                current_width = candidate;
            }
        }

        if !current.is_empty() {
            lines.push(MeasuredLine {
                text: current,
                width: current_width,
            });
        }

        lines
    }

    /// Wrapped lines without their widths
    pub fn wrap(&self, text: &str, font_size: f32, max_width: f32) -> Vec<String> {
        self.wrap_measured(text, font_size, max_width)
            .into_iter()
            .map(|line| line.text)
            .collect()
    }

    /// Line count and longest line width of `text` wrapped to `max_width`
    pub fn measure(&self, text: &str, font_size: f32, max_width: f32) -> Measurement {
        let lines = self.wrap_measured(text, font_size, max_width);
        Measurement {
            line_count: lines.len(),
            width: lines.iter().map(|l| l.width).fold(0.0, f32::max),
        }
    }
}

fn proportional_ratio(ch: char) -> f32 {
    match ch {
        ' ' => SPACE_WIDTH_RATIO,
        'i' | 'j' | 'l' | 'I' | 'f' | 't' | 'r' | '.' | ',' | ':' | ';' | '\'' | '"' | '|'
        | '!' | '`' | '(' | ')' | '[' | ']' | '-' => NARROW_CHAR_WIDTH_RATIO,
        'm' | 'w' | 'M' | 'W' | '@' | '%' => WIDE_CHAR_WIDTH_RATIO,
        c if c.is_ascii_uppercase() || c.is_ascii_digit() => CAPITAL_CHAR_WIDTH_RATIO,
        _ => REGULAR_CHAR_WIDTH_RATIO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_no_lines() {
        let m = TextMeasurer::PROPORTIONAL.measure("", 9.0, 100.0);
        assert_eq!(m, Measurement::default());

        let m = TextMeasurer::PROPORTIONAL.measure("   \t ", 9.0, 100.0);
        assert_eq!(m.line_count, 0);
    }

    #[test]
    fn test_short_text_fits_on_one_line() {
        let m = TextMeasurer::MONOSPACE.measure("Ctrl+C", 10.0, 100.0);
        assert_eq!(m.line_count, 1);
        assert!((m.width - 36.0).abs() < 1e-4);
    }

    #[test]
    fn test_greedy_wrap_breaks_on_whitespace() {
        // Monospace at 10pt: 6pt per glyph, "aaaa" = 24pt, space = 6pt
        let lines = TextMeasurer::MONOSPACE.wrap("aaaa bbbb cccc", 10.0, 54.5);
        assert_eq!(lines, vec!["aaaa bbbb", "cccc"]);

        let lines = TextMeasurer::MONOSPACE.wrap("aaaa bbbb cccc", 10.0, 53.5);
        assert_eq!(lines, vec!["aaaa", "bbbb", "cccc"]);
    }

    #[test]
    fn test_overlong_word_is_not_split() {
        let word = "x".repeat(500);
        let text = format!("go {word} now");
        let m = TextMeasurer::PROPORTIONAL.measure(&text, 9.0, 40.0);
        assert_eq!(m.line_count, 3);
        assert!(m.width > 40.0);

        let lines = TextMeasurer::PROPORTIONAL.wrap(&text, 9.0, 40.0);
        assert_eq!(lines[1], word);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        let lines = TextMeasurer::PROPORTIONAL.wrap("  open \n  file  ", 9.0, 500.0);
        assert_eq!(lines, vec!["open file"]);
    }

    #[test]
    fn test_width_is_monotonic_in_length_and_size() {
        let m = TextMeasurer::PROPORTIONAL;
        let mut previous = 0.0;
        for len in 1..40 {
            let w = m.text_width(&"Wil".repeat(len), 9.0);
            assert!(w > previous);
            previous = w;
        }
        assert!(m.text_width("Paste", 12.0) > m.text_width("Paste", 9.0));
    }

    #[test]
    fn test_wide_glyphs_are_wider() {
        let m = TextMeasurer::PROPORTIONAL;
        assert!(m.char_width('保', 10.0) > m.char_width('a', 10.0));
        let mono = TextMeasurer::MONOSPACE;
        assert!(mono.char_width('保', 10.0) > mono.char_width('a', 10.0));
    }

    #[test]
    fn test_wider_limit_never_adds_lines() {
        let text = "Move the cursor to the beginning of the next paragraph";
        let m = TextMeasurer::PROPORTIONAL;
        let mut previous = usize::MAX;
        for width in [20.0, 40.0, 80.0, 160.0, 320.0] {
            let count = m.measure(text, 9.0, width).line_count;
            assert!(count <= previous);
            previous = count;
        }
        assert_eq!(previous, 1);
    }
}

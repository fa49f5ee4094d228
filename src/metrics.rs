//! Text measurement used to size the composing input

/// Tab width for visual column calculations
pub const TABULATOR_WIDTH: usize = 4;

/// Host text-measurement service
pub trait TextMetrics {
    /// Rendered width of `text` in pixels
    fn text_width(&self, text: &str) -> f32;
}

/// Fixed-advance metrics: every column is `char_width` pixels wide
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMetrics {
    pub char_width: f32,
}

impl MonospaceMetrics {
    pub fn new(char_width: f32) -> Self {
        Self { char_width }
    }
}

impl Default for MonospaceMetrics {
    fn default() -> Self {
        Self { char_width: 8.0 }
    }
}

impl TextMetrics for MonospaceMetrics {
    fn text_width(&self, text: &str) -> f32 {
        visual_width(text) as f32 * self.char_width
    }
}

/// Number of columns `text` occupies, expanding tabs to the next tab stop.
pub fn visual_width(text: &str) -> usize {
    let mut visual_col = 0;
    for ch in text.chars() {
        if ch == '\t' {
            visual_col += TABULATOR_WIDTH - (visual_col % TABULATOR_WIDTH);
        } else {
            visual_col += 1;
        }
    }
    visual_col
}

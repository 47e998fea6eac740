//! Flat-shading brightness ramp

const MIN_LEVEL: f32 = 0.1;
const MAX_LEVEL: f32 = 2.0;

/// Ordered glyphs from dimmest to brightest
#[derive(Debug, Clone, PartialEq)]
pub struct BrightnessRamp {
    glyphs: Vec<char>,
}

impl BrightnessRamp {
    pub fn new(glyphs: &str) -> Self {
        Self {
            glyphs: glyphs.chars().collect(),
        }
    }

    pub fn levels(&self) -> usize {
        self.glyphs.len()
    }

    /// Glyph for a lighting intensity in `[-1, 1]`
    pub fn glyph(&self, intensity: f32) -> char {
        let Some(last) = self.glyphs.len().checked_sub(1) else {
            return crate::buffer::BLANK;
        };
        let level = (intensity + 1.0).max(MIN_LEVEL).min(MAX_LEVEL);
        let index = ((level - MIN_LEVEL) / (MAX_LEVEL - MIN_LEVEL) * last as f32) as usize;
        self.glyphs[index.min(last)]
    }
}

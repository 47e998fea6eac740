//! Glyph and depth buffers for one frame

/// Glyph of an untouched cell
pub const BLANK: char = ' ';

/// Row-major glyph grid; index = `x + width * y`
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            glyphs: vec![BLANK; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.glyphs.fill(BLANK);
    }

    /// Buffer index for a pixel, or `None` outside the grid
    pub fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x < self.width && y < self.height {
            Some(x + self.width * y)
        } else {
            None
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<char> {
        self.index(x, y).map(|idx| self.glyphs[idx])
    }

    pub fn put(&mut self, x: i32, y: i32, glyph: char) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.glyphs[idx] = glyph;
                true
            }
            None => false,
        }
    }

    pub(crate) fn set(&mut self, idx: usize, glyph: char) {
        self.glyphs[idx] = glyph;
    }

    pub fn as_slice(&self) -> &[char] {
        &self.glyphs
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.glyphs.chunks(self.width.max(1))
    }

    /// Row `y` as a string, or `None` past the last row
    pub fn row_string(&self, y: usize) -> Option<String> {
        if y >= self.height {
            return None;
        }
        let start = self.width * y;
        Some(self.glyphs[start..start + self.width].iter().collect())
    }
}

/// Inverse-depth per pixel; larger values are nearer
#[derive(Debug, Clone, PartialEq)]
pub struct DepthBuffer {
    depths: Vec<f32>,
}

impl DepthBuffer {
    pub fn new(len: usize) -> Self {
        Self {
            depths: vec![f32::NEG_INFINITY; len],
        }
    }

    pub fn clear(&mut self) {
        self.depths.fill(f32::NEG_INFINITY);
    }

    pub fn get(&self, idx: usize) -> f32 {
        self.depths[idx]
    }

    /// Store `depth` if strictly nearer than the current value
    pub fn test_and_set(&mut self, idx: usize, depth: f32) -> bool {
        if depth > self.depths[idx] {
            self.depths[idx] = depth;
            true
        } else {
            false
        }
    }
}

//! The drawing surface the game renders onto.
//!
//! Coordinates are logical playfield pixels (see [`crate::config`]); the
//! backend decides how they map onto real output.

use glam::Vec2;

use crate::geometry::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(245, 245, 245);
pub const INK: Rgb = Rgb(0, 0, 0);
pub const PIPE: Rgb = Rgb(0, 228, 48);
pub const GOLD: Rgb = Rgb(255, 203, 0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    /// `x` is the left edge of the text.
    Left,
    /// `x` is the horizontal center of the text.
    Center,
}

pub trait Surface {
    fn clear(&mut self, color: Rgb);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb);
    fn fill_rect(&mut self, rect: Rect, color: Rgb);
    /// `size` is a nominal font height in playfield pixels; backends that
    /// cannot scale text may only use it for emphasis.
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: u16, align: Align, color: Rgb);
}

/// Records draw calls so tests can assert on what a frame produced.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recording {
    pub circles: Vec<(Vec2, f32, Rgb)>,
    pub rects: Vec<(Rect, Rgb)>,
    pub texts: Vec<String>,
    pub clears: usize,
}

#[cfg(test)]
impl Recording {
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.contains(needle))
    }
}

#[cfg(test)]
impl Surface for Recording {
    fn clear(&mut self, _color: Rgb) {
        self.clears += 1;
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        self.circles.push((center, radius, color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        self.rects.push((rect, color));
    }

    fn draw_text(&mut self, text: &str, _x: f32, _y: f32, _size: u16, _align: Align, _color: Rgb) {
        self.texts.push(text.to_string());
    }
}

//! Terminal backend for [`Surface`]: a pixel grid two pixels per cell tall,
//! drawn with upper-half-block characters, plus a text overlay.
//!
//! The 1280x720 playfield is stretched over whatever the terminal offers.

use std::io::{self, Write};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color as CColor},
};
use glam::Vec2;

use crate::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::geometry::Rect;
use crate::surface::{Align, BACKGROUND, Rgb, Surface};

/// Text at this nominal size and above is printed bold.
const BOLD_SIZE: u16 = 30;

#[derive(Debug, Clone, PartialEq)]
struct Label {
    col: usize,
    row: usize,
    text: String,
    fg: Rgb,
    bold: bool,
}

pub struct PixelBuf {
    w: usize,
    h: usize, // pixel height = terminal rows * 2
    px: Vec<Rgb>,
    labels: Vec<Label>,
}

fn ccolor(c: Rgb) -> CColor {
    CColor::Rgb {
        r: c.0,
        g: c.1,
        b: c.2,
    }
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BACKGROUND; w * h],
            labels: Vec::new(),
        }
    }

    /// Buffer covering a terminal of `cols` x `rows` cells.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BACKGROUND);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(self.w as f32 / SCREEN_WIDTH, self.h as f32 / SCREEN_HEIGHT)
    }

    fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    /// Text characters keyed by cell index, later labels on top.
    fn overlay(&self) -> Vec<Option<(char, &Label)>> {
        let rows = self.h / 2;
        let mut cells = vec![None; self.w * rows];
        for label in self.labels.iter().filter(|l| l.row < rows) {
            for (i, ch) in label.text.chars().enumerate() {
                let col = label.col + i;
                if col < self.w {
                    cells[label.row * self.w + col] = Some((ch, label));
                }
            }
        }
        cells
    }

    fn cell(&self, col: usize, row: usize, text: Option<(char, &Label)>) -> Cell {
        let top = self.get(col, row * 2);
        let bot = self.get(col, row * 2 + 1);
        match text {
            // Text sits on the cell's lower pixel
            Some((glyph, label)) => Cell {
                glyph,
                fg: Some(label.fg),
                bg: bot,
                bold: label.bold,
            },
            None if top == bot => Cell {
                glyph: ' ',
                fg: None,
                bg: top,
                bold: false,
            },
            None => Cell {
                glyph: '\u{2580}', // ▀
                fg: Some(top),
                bg: bot,
                bold: false,
            },
        }
    }

    /// Write the whole frame in one top-to-bottom pass.
    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        let rows = self.h / 2;
        let text = self.overlay();

        queue!(out, cursor::MoveTo(0, 0))?;
        for row in 0..rows {
            let mut pen = Pen::default();
            for col in 0..self.w {
                let cell = self.cell(col, row, text[row * self.w + col]);
                pen.draw(out, cell)?;
            }
            queue!(out, style::SetAttribute(Attribute::Reset))?;
            if row + 1 < rows {
                queue!(out, style::Print("\r\n"))?;
            }
        }
        out.flush()
    }
}

/// One terminal cell after compositing pixels and text.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Cell {
    glyph: char,
    fg: Option<Rgb>, // None: glyph has no ink
    bg: Rgb,
    bold: bool,
}

/// Terminal style state within a row, so unchanged attributes are not resent.
#[derive(Debug, Default)]
struct Pen {
    fg: Option<Rgb>,
    bg: Option<Rgb>,
    bold: bool,
}

impl Pen {
    fn draw(&mut self, out: &mut impl Write, cell: Cell) -> io::Result<()> {
        if cell.bold != self.bold {
            let attr = if cell.bold {
                Attribute::Bold
            } else {
                Attribute::NormalIntensity
            };
            queue!(out, style::SetAttribute(attr))?;
            self.bold = cell.bold;
        }
        if let Some(fg) = cell.fg.filter(|&fg| self.fg != Some(fg)) {
            queue!(out, style::SetForegroundColor(ccolor(fg)))?;
            self.fg = Some(fg);
        }
        if self.bg != Some(cell.bg) {
            queue!(out, style::SetBackgroundColor(ccolor(cell.bg)))?;
            self.bg = Some(cell.bg);
        }
        queue!(out, style::Print(cell.glyph))
    }
}

impl Surface for PixelBuf {
    fn clear(&mut self, color: Rgb) {
        self.px.fill(color);
        self.labels.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgb) {
        let s = self.scale();
        let x0 = (rect.x * s.x).round() as i32;
        let x1 = (rect.right() * s.x).round() as i32;
        let y0 = (rect.y * s.y).round() as i32;
        let y1 = (rect.bottom() * s.y).round() as i32;
        for y in y0.max(0)..y1.min(self.h as i32) {
            for x in x0.max(0)..x1.min(self.w as i32) {
                self.set(x, y, color);
            }
        }
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgb) {
        let s = self.scale();
        let c = center * s;
        let r = radius * s;
        if r.x <= 0.0 || r.y <= 0.0 {
            return;
        }

        // The stretch makes the circle an ellipse in pixel space
        for y in (c.y - r.y).floor() as i32..=(c.y + r.y).ceil() as i32 {
            for x in (c.x - r.x).floor() as i32..=(c.x + r.x).ceil() as i32 {
                let d = (Vec2::new(x as f32 + 0.5, y as f32 + 0.5) - c) / r;
                if d.length_squared() <= 1.0 {
                    self.set(x, y, color);
                }
            }
        }
        // Never vanish on tiny terminals
        self.set(c.x as i32, c.y as i32, color);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: u16, align: Align, color: Rgb) {
        let s = self.scale();
        let rows = self.h / 2;
        let row = (y * s.y) as usize / 2;
        if row >= rows || self.w == 0 {
            return;
        }

        let len = text.chars().count() as i32;
        let anchor = (x * s.x) as i32;
        let col = match align {
            Align::Left => anchor,
            Align::Center => anchor - len / 2,
        }
        .clamp(0, self.w as i32 - 1) as usize;

        let text: String = text.chars().take(self.w - col).collect();
        self.labels.push(Label {
            col,
            row,
            text,
            fg: color,
            bold: size >= BOLD_SIZE,
        });
    }
}

use crate::surface::{Rgba, Surface};
use std::f64::consts::TAU;

/// RGBA raster meant to be shown as braille, 2×4 pixels per terminal cell.
///
/// A fill covering the whole canvas sets the backdrop; every pixel that
/// differs from it counts as ink when encoding braille.
pub struct PixelCanvas {
    w: u32,
    h: u32,
    px: Vec<Rgba>,
    background: Rgba,
}

impl PixelCanvas {
    pub fn new(w: u32, h: u32) -> Self {
        Self {
            w,
            h,
            px: vec![Rgba::default(); (w as usize) * (h as usize)],
            background: Rgba::default(),
        }
    }

    /// Canvas sized for a grid of terminal cells.
    pub fn for_cells(cols: u16, rows: u16) -> Self {
        Self::new(cols as u32 * 2, rows as u32 * 4)
    }

    pub fn width(&self) -> u32 {
        self.w
    }

    pub fn height(&self) -> u32 {
        self.h
    }

    fn idx(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.w || y >= self.h {
            return None;
        }
        Some(self.px[self.idx(x, y)])
    }

    pub fn is_ink(&self, x: u32, y: u32) -> bool {
        self.pixel(x, y).map_or(false, |p| p.a >= 32 && p != self.background)
    }

    fn blend_over(&mut self, x: i32, y: i32, src: Rgba) {
        let (Ok(x), Ok(y)) = (u32::try_from(x), u32::try_from(y)) else {
            return;
        };
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.px[i] = src.over(self.px[i]);
        }
    }

    /// Encode one terminal cell: braille glyph plus the mean ink colour.
    /// `None` when the cell has no ink.
    pub fn braille_cell(&self, col: u32, row: u32) -> Option<(char, Rgba)> {
        let px0 = col * 2;
        let py0 = row * 4;

        let mut mask: u8 = 0;
        let (mut sum_r, mut sum_g, mut sum_b, mut ink) = (0u32, 0u32, 0u32, 0u32);

        for dy in 0..4 {
            for dx in 0..2 {
                let (x, y) = (px0 + dx, py0 + dy);
                if !self.is_ink(x, y) {
                    continue;
                }
                let p = self.px[self.idx(x, y)];
                mask |= BRAILLE_DOTS[dy as usize][dx as usize];
                sum_r += p.r as u32;
                sum_g += p.g as u32;
                sum_b += p.b as u32;
                ink += 1;
            }
        }

        if ink == 0 {
            return None;
        }
        let ch = char::from_u32(0x2800 + mask as u32).unwrap_or(' ');
        Some((
            ch,
            Rgba::rgb((sum_r / ink) as u8, (sum_g / ink) as u8, (sum_b / ink) as u8),
        ))
    }
}

/// Braille dot bit for each sub-pixel, indexed `[dy][dx]`.
const BRAILLE_DOTS: [[u8; 2]; 4] = [[0x01, 0x08], [0x02, 0x10], [0x04, 0x20], [0x40, 0x80]];

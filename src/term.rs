use anyhow::{Context, Result};
use crossterm::{
    cursor,
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute, queue,
    style::{Color, Colors, Print, ResetColor, SetColors},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use solarium::canvas::PixelCanvas;
use solarium::surface::Rgba;
use std::io::{self, Write};

pub(crate) const HUD_WIDTH: u16 = 34;
/// Canvas pixels covered by one terminal cell.
pub(crate) const CELL_PX: (f64, f64) = (2.0, 4.0);
const MIN_CANVAS_COLS: u16 = 12;
const MIN_CANVAS_ROWS: u16 = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            ch: ' ',
            fg: Color::White,
            bg: Color::Black,
        }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::default(); (w as usize) * (h as usize)],
        }
    }
    pub(crate) fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }
    pub(crate) fn set(&mut self, x: u16, y: u16, c: Cell) {
        if x < self.w && y < self.h {
            let i = self.idx(x, y);
            self.cells[i] = c;
        }
    }
    pub(crate) fn clear(&mut self, bg: Color) {
        self.cells.fill(Cell { bg, ..Cell::default() });
    }

    fn rows(&self) -> std::slice::Chunks<'_, Cell> {
        self.cells.chunks(self.w.max(1) as usize)
    }
}

/// Split of the terminal: braille canvas on the left, control panel on the right.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) canvas_cols: u16,
}

impl Layout {
    pub(crate) fn new(cols: u16, rows: u16) -> Self {
        let hud = HUD_WIDTH.min(cols / 2);
        Self {
            cols,
            rows,
            canvas_cols: cols.saturating_sub(hud),
        }
    }

    pub(crate) fn hud_x(&self) -> u16 {
        self.canvas_cols
    }

    pub(crate) fn canvas_usable(&self) -> bool {
        self.canvas_cols >= MIN_CANVAS_COLS && self.rows >= MIN_CANVAS_ROWS
    }

    /// Canvas pixel at the centre of a terminal cell, `None` outside the canvas.
    pub(crate) fn cell_to_canvas(&self, col: u16, row: u16) -> Option<(f64, f64)> {
        if col >= self.canvas_cols || row >= self.rows {
            return None;
        }
        let (cw, ch) = CELL_PX;
        Some(((col as f64 + 0.5) * cw, (row as f64 + 0.5) * ch))
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) layout: Layout,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
    pub(crate) canvas: PixelCanvas,
}

impl Terminal {
    pub(crate) fn begin() -> Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            EnableFocusChange,
            terminal::Clear(ClearType::All)
        )
        .context("preparing terminal")?;
        terminal::enable_raw_mode().context("enabling raw mode")?;

        let (cols, rows) = terminal::size()?;
        let layout = Layout::new(cols, rows);
        Ok(Self {
            out,
            layout,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
            canvas: PixelCanvas::for_cells(layout.canvas_cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> Result<()> {
        queue!(
            self.out,
            BeginSynchronizedUpdate,
            ResetColor,
            Clear(ClearType::All),
            DisableFocusChange,
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            EndSynchronizedUpdate,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.layout.cols && r == self.layout.rows {
            return Ok(false);
        }
        self.layout = Layout::new(c, r);
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        self.canvas = PixelCanvas::for_cells(self.layout.canvas_cols, r);
        execute!(self.out, terminal::Clear(ClearType::All))?;
        log::debug!("resized to {c}x{r}, canvas {}x{}", self.canvas.width(), self.canvas.height());
        Ok(true)
    }

    /// Write the cells that changed since the last frame, then swap buffers.
    pub(crate) fn present(&mut self) -> Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut pen: Option<(Color, Color)> = None;
        for (y, (row, old)) in self.cur.rows().zip(self.prev.rows()).enumerate() {
            // column the terminal cursor sits on after the last print, if known
            let mut cursor_x = None;
            for (x, (c, o)) in row.iter().zip(old).enumerate() {
                if c == o {
                    continue;
                }
                if cursor_x != Some(x) {
                    queue!(self.out, cursor::MoveTo(x as u16, y as u16))?;
                }
                if pen != Some((c.fg, c.bg)) {
                    queue!(self.out, SetColors(Colors::new(c.fg, c.bg)))?;
                    pen = Some((c.fg, c.bg));
                }
                queue!(self.out, Print(c.ch))?;
                cursor_x = single_width(c.ch).then_some(x + 1);
            }
        }

        queue!(self.out, ResetColor, EndSynchronizedUpdate)?;
        self.out.flush()?;
        std::mem::swap(&mut self.prev, &mut self.cur);
        Ok(())
    }
}

/// Glyphs every terminal draws one column wide: ASCII, box drawing, braille.
fn single_width(ch: char) -> bool {
    ch.is_ascii() || ('\u{2500}'..='\u{257F}').contains(&ch) || ('\u{2800}'..='\u{28FF}').contains(&ch)
}

pub(crate) fn to_color(c: Rgba) -> Color {
    Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Copy the braille canvas into the left part of the cell buffer.
pub(crate) fn canvas_to_cells(canvas: &PixelCanvas, out: &mut CellBuffer, enable_color: bool, bg: Color) {
    let cols = (canvas.width() / 2).min(out.w as u32);
    let rows = (canvas.height() / 4).min(out.h as u32);

    for cy in 0..rows {
        for cx in 0..cols {
            let Some((ch, ink)) = canvas.braille_cell(cx, cy) else {
                continue;
            };
            let fg = if enable_color { to_color(ink) } else { Color::White };
            out.set(cx as u16, cy as u16, Cell { ch, fg, bg });
        }
    }
}

pub(crate) fn draw_text(buf: &mut CellBuffer, x: u16, y: u16, s: &str, fg: Color, bg: Color) {
    for (i, ch) in s.chars().enumerate() {
        let xx = x.saturating_add(i as u16);
        if xx >= buf.w || y >= buf.h {
            break;
        }
        buf.set(xx, y, Cell { ch, fg, bg });
    }
}

pub(crate) fn box_draw(buf: &mut CellBuffer, x0: u16, y0: u16, bw: u16, bh: u16, fg: Color, bg: Color) {
    if bw < 2 || bh < 2 {
        return;
    }
    let x1 = x0 + bw - 1;
    let y1 = y0 + bh - 1;
    for x in x0..=x1 {
        buf.set(x, y0, Cell { ch: '─', fg, bg });
        buf.set(x, y1, Cell { ch: '─', fg, bg });
    }
    for y in y0..=y1 {
        buf.set(x0, y, Cell { ch: '│', fg, bg });
        buf.set(x1, y, Cell { ch: '│', fg, bg });
    }
    buf.set(x0, y0, Cell { ch: '┌', fg, bg });
    buf.set(x1, y0, Cell { ch: '┐', fg, bg });
    buf.set(x0, y1, Cell { ch: '└', fg, bg });
    buf.set(x1, y1, Cell { ch: '┘', fg, bg });
}

/// Blank the interior of a box so overlays hide what's under them.
pub(crate) fn fill_box(buf: &mut CellBuffer, x0: u16, y0: u16, bw: u16, bh: u16, bg: Color) {
    for y in y0..y0.saturating_add(bh) {
        for x in x0..x0.saturating_add(bw) {
            buf.set(x, y, Cell { bg, ..Cell::default() });
        }
    }
}

use crate::term::{box_draw, draw_text, fill_box, to_color, CellBuffer, Layout};
use crossterm::style::Color;
use solarium::{BodyInfo, Catalog, Control, Interaction, Parameters};

const FG: Color = Color::Rgb { r: 220, g: 220, b: 220 };
const DIM: Color = Color::Rgb { r: 120, g: 120, b: 120 };
const EDGE: Color = Color::Rgb { r: 80, g: 95, b: 120 };
const HI: Color = Color::Yellow;
const BG: Color = Color::Black;

fn bar(value01: f64, width: usize) -> String {
    let v = value01.clamp(0.0, 1.0);
    let fill = (v * width as f64 + 0.5) as usize;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < fill { '█' } else { '·' });
    }
    s.push(']');
    s
}

fn slider_fraction(control: Control, value: f64) -> f64 {
    let r = control.range();
    (value - r.start()) / (r.end() - r.start())
}

/// Right-hand panel: view toggles, sliders, hover readout, key help.
pub(crate) fn draw_panel(
    buf: &mut CellBuffer,
    layout: &Layout,
    params: &Parameters,
    focus: Control,
    interaction: &Interaction,
    catalog: &Catalog,
) {
    let x0 = layout.hud_x();
    let w = layout.cols.saturating_sub(x0);
    if w < 4 {
        return;
    }
    box_draw(buf, x0, 0, w, layout.rows, EDGE, BG);
    let px = x0 + 2;
    let inner = w.saturating_sub(4) as usize;

    draw_text(buf, px, 1, "Solar System", FG, BG);
    let mode = format!("View:   {}  (v)", params.view_mode.label());
    draw_text(buf, px, 3, &mode, FG, BG);
    let orbits = format!("Orbits: {}  (o)", if params.show_orbits { "on" } else { "off" });
    draw_text(buf, px, 4, &orbits, FG, BG);

    let bar_w = inner.saturating_sub(10).clamp(4, 16);
    let mut y = 6;
    for c in Control::ALL {
        let selected = c == focus;
        let value = params.get(c);
        let head = format!("{} {}", if selected { ">" } else { " " }, c.label());
        draw_text(buf, px, y, &head, if selected { HI } else { FG }, BG);
        let line = format!("  {} {:>4.1}", bar(slider_fraction(c, value), bar_w), value);
        draw_text(buf, px, y + 1, &line, if selected { HI } else { DIM }, BG);
        y += 2;
    }

    y += 1;
    let hover = interaction
        .hovered
        .and_then(|i| catalog.get(i))
        .map(|b| b.name)
        .unwrap_or("-");
    draw_text(buf, px, y, &format!("Hover: {hover}"), FG, BG);

    let help_rows = [
        "Tab/↑↓ pick slider, ←→ adjust",
        "[ ] speed   - = distance",
        ", . sun     ; ' planets",
        "click planet, Esc close",
        "r reset  h help  q quit",
    ];
    let first = layout.rows.saturating_sub(help_rows.len() as u16 + 1);
    if first > y {
        for (i, line) in help_rows.iter().enumerate() {
            draw_text(buf, px, first + i as u16, line, DIM, BG);
        }
    }
}

/// Selection display, anchored top-left over the canvas.
pub(crate) fn draw_selection(buf: &mut CellBuffer, layout: &Layout, info: &BodyInfo, color: Color) {
    let bw = 30u16.min(layout.canvas_cols.saturating_sub(2));
    let bh = 7u16.min(layout.rows);
    if bw < 10 || bh < 5 {
        return;
    }
    let (x0, y0) = (1u16, 0u16);
    fill_box(buf, x0, y0, bw, bh, BG);
    box_draw(buf, x0, y0, bw, bh, EDGE, BG);
    draw_text(buf, x0 + 2, y0 + 1, &format!("● {}", info.name), color, BG);
    draw_text(
        buf,
        x0 + 2,
        y0 + 3,
        &format!("Distance: {:.1} million km", info.distance_mkm),
        FG,
        BG,
    );
    draw_text(
        buf,
        x0 + 2,
        y0 + 4,
        &format!("Diameter: {:.0} km", info.diameter_km),
        FG,
        BG,
    );
    draw_text(buf, x0 + 2, y0 + bh - 2, "Esc to close", DIM, BG);
}

pub(crate) fn draw_help(buf: &mut CellBuffer, layout: &Layout) {
    let body = [
        "Planets circle the Sun on simple ellipses.",
        "",
        "Realistic view keeps true distances and",
        "sizes to one scale; illustrative view puts",
        "planets on evenly spaced rings and shrinks",
        "the size gap so all of them stay visible.",
        "",
        "Move the mouse over a planet to highlight",
        "it, click it for details.",
        "",
        "h or Esc to close.",
    ];
    let bw = 48u16.min(layout.cols.saturating_sub(2));
    let bh = (body.len() as u16 + 4).min(layout.rows);
    if bw < 10 || bh < 5 {
        return;
    }
    let x0 = (layout.cols - bw) / 2;
    let y0 = (layout.rows - bh) / 2;
    fill_box(buf, x0, y0, bw, bh, BG);
    box_draw(buf, x0, y0, bw, bh, Color::White, BG);
    draw_text(buf, x0 + 2, y0 + 1, "Help", Color::White, BG);
    for (i, line) in body.iter().enumerate() {
        let yy = y0 + 3 + i as u16;
        if yy >= y0 + bh - 1 {
            break;
        }
        draw_text(buf, x0 + 2, yy, line, FG, BG);
    }
}

pub(crate) fn draw_too_small(buf: &mut CellBuffer, layout: &Layout) {
    draw_text(buf, 0, layout.rows / 2, "terminal too small", DIM, BG);
}

pub(crate) fn body_color(catalog: &Catalog, index: usize) -> Color {
    catalog.get(index).map(|b| to_color(b.color)).unwrap_or(FG)
}

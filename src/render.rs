use crate::catalog::Catalog;
use crate::frame::Frame;
use crate::surface::{Rgba, Surface};

pub const BACKGROUND: Rgba = Rgba::BLACK;
pub const HOVER_ENLARGE: f64 = 1.2;
/// Smallest radius a body is drawn with, in pixels.
pub const MIN_DRAW_RADIUS: f64 = 0.5;
const ORBIT_ALPHA: f32 = 0.3;

/// Disk radius for a stored diameter. Hit-testing uses the same halving.
pub fn draw_radius(size: f64, hovered: bool) -> f64 {
    let k = if hovered { HOVER_ENLARGE } else { 1.0 };
    (size * k / 2.0).max(MIN_DRAW_RADIUS)
}

/// Paint one frame: backdrop, central body, then orbits and bodies in catalog order.
pub fn paint_frame<S: Surface + ?Sized>(
    surface: &mut S,
    catalog: &Catalog,
    frame: &Frame,
    show_orbits: bool,
    hovered: Option<usize>,
) {
    let (w, h) = surface.size();
    surface.fill_rect(0.0, 0.0, w, h, BACKGROUND);

    let (cx, cy) = frame.center;
    surface.fill_disk(cx, cy, frame.central_size / 2.0, catalog.central.color);

    let orbit_color = Rgba::WHITE.with_alpha(ORBIT_ALPHA);
    for (i, (body, pl)) in catalog.bodies().iter().zip(&frame.bodies).enumerate() {
        if show_orbits {
            surface.stroke_ellipse(cx, cy, pl.orbit_rx, pl.orbit_ry, orbit_color);
        }
        let r = draw_radius(pl.size, hovered == Some(i));
        surface.fill_disk(pl.x, pl.y, r, body.color);
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::mapper::{compute_frame, Geometry};
    use crate::params::{Parameters, ViewMode};

    #[derive(Clone, Debug, PartialEq)]
    pub(crate) enum Op {
        Rect(f64, f64, f64, f64, Rgba),
        Disk(f64, f64, f64, Rgba),
        Ellipse(f64, f64, f64, f64, Rgba),
    }

    pub(crate) struct Recorder {
        pub(crate) w: f64,
        pub(crate) h: f64,
        pub(crate) ops: Vec<Op>,
    }

    impl Recorder {
        pub(crate) fn new(w: f64, h: f64) -> Self {
            Self { w, h, ops: Vec::new() }
        }
    }

    impl Surface for Recorder {
        fn size(&self) -> (f64, f64) {
            (self.w, self.h)
        }
        fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba) {
            self.ops.push(Op::Rect(x, y, w, h, color));
        }
        fn fill_disk(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba) {
            self.ops.push(Op::Disk(cx, cy, radius, color));
        }
        fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba) {
            self.ops.push(Op::Ellipse(cx, cy, rx, ry, color));
        }
    }

    fn frame(p: &Parameters) -> (Catalog, Frame) {
        let cat = Catalog::default();
        let f = compute_frame(&cat, 42_000.0, p, &Geometry::from_size(800.0, 800.0));
        (cat, f)
    }

    #[test]
    fn clears_whole_surface_first() {
        let p = Parameters::default();
        let (cat, f) = frame(&p);
        let mut s = Recorder::new(800.0, 800.0);
        paint_frame(&mut s, &cat, &f, true, None);
        assert_eq!(s.ops[0], Op::Rect(0.0, 0.0, 800.0, 800.0, BACKGROUND));
        assert_eq!(s.ops[1], Op::Disk(400.0, 400.0, 10.0, cat.central.color));
    }

    #[test]
    fn hidden_orbits_mean_no_strokes() {
        let p = Parameters { show_orbits: false, ..Parameters::default() };
        let (cat, f) = frame(&p);
        let mut s = Recorder::new(800.0, 800.0);
        paint_frame(&mut s, &cat, &f, p.show_orbits, None);
        assert!(!s.ops.iter().any(|op| matches!(op, Op::Ellipse(..))));
        let disks = s.ops.iter().filter(|op| matches!(op, Op::Disk(..))).count();
        assert_eq!(disks, cat.len() + 1);
    }

    #[test]
    fn orbit_precedes_its_body() {
        let p = Parameters::default();
        let (cat, f) = frame(&p);
        let mut s = Recorder::new(800.0, 800.0);
        paint_frame(&mut s, &cat, &f, true, None);
        let body_ops = &s.ops[2..];
        assert_eq!(body_ops.len(), cat.len() * 2);
        for (chunk, pl) in body_ops.chunks(2).zip(&f.bodies) {
            assert!(matches!(chunk[0], Op::Ellipse(_, _, rx, ry, _) if rx == pl.orbit_rx && ry == pl.orbit_ry));
            assert!(matches!(chunk[1], Op::Disk(x, y, _, _) if x == pl.x && y == pl.y));
        }
    }

    #[test]
    fn hovered_body_is_enlarged() {
        let p = Parameters { view_mode: ViewMode::Illustrative, show_orbits: false, ..Parameters::default() };
        let (cat, f) = frame(&p);
        let mut s = Recorder::new(800.0, 800.0);
        paint_frame(&mut s, &cat, &f, false, Some(3));
        let Op::Disk(_, _, r, _) = s.ops[2 + 3] else { panic!("expected disk") };
        assert!((r - f.bodies[3].size * 1.2 / 2.0).abs() < 1e-9);
        let Op::Disk(_, _, r0, _) = s.ops[2] else { panic!("expected disk") };
        assert!((r0 - f.bodies[0].size / 2.0).abs() < 1e-9);
    }

    #[test]
    fn draw_radius_has_floor() {
        assert_eq!(draw_radius(0.2, false), MIN_DRAW_RADIUS);
        assert!((draw_radius(10.0, true) - 6.0).abs() < 1e-9);
    }
}

//! Orbital parameters plus wall-clock time to canvas pixels.
//!
//! Two projections share one interface:
//!
//! - [`RealisticProjection`] scales every orbit and size by one factor so the
//!   outermost orbit touches the canvas margin.
//! - [`IllustrativeProjection`] puts body `i` on the `i`-th of evenly spaced
//!   rings and compresses sizes so giants and dwarfs stay comparable.
//!
//! [`compute_frame`] is a pure function of its inputs.

use crate::catalog::{Body, Catalog};
use crate::frame::{Frame, Placement};
use crate::params::{Parameters, ViewMode};

/// Radians per millisecond per unit of angular speed.
pub const TIME_SCALE: f64 = 1e-5;
/// Pixels kept free between the outermost orbit and the canvas edge.
pub const MARGIN: f64 = 20.0;
pub const MIN_BODY_SIZE: f64 = 1.0;
pub const MIN_CENTRAL_SIZE: f64 = 2.0;
pub const ILLUSTRATIVE_CENTRAL_SIZE: f64 = 20.0;

const ILLUSTRATIVE_BASE_SIZE: f64 = 5.0;
const ILLUSTRATIVE_GROWTH: f64 = 15.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geometry {
    pub center_x: f64,
    pub center_y: f64,
    pub half_extent: f64,
}

impl Geometry {
    pub fn from_size(w: f64, h: f64) -> Self {
        Self {
            center_x: w / 2.0,
            center_y: h / 2.0,
            half_extent: w.min(h) / 2.0,
        }
    }

    /// Radius available for orbits. Tiny canvases keep at least half their extent.
    pub fn usable_extent(&self) -> f64 {
        (self.half_extent - MARGIN)
            .max(self.half_extent * 0.5)
            .max(1.0)
    }
}

pub fn angle(body: &Body, time_ms: f64, params: &Parameters) -> f64 {
    time_ms * TIME_SCALE * body.angular_speed * params.speed_multiplier + body.phase_offset
}

pub trait Projection {
    /// Pixel semi-axes of the orbit of the `index`-th body.
    fn orbit_radii(&self, index: usize, body: &Body) -> (f64, f64);
    /// Pixel diameter of a body.
    fn body_size(&self, body: &Body) -> f64;
    /// Pixel diameter of the central body.
    fn central_size(&self) -> f64;
}

#[derive(Clone, Copy, Debug)]
pub struct RealisticProjection {
    scale_factor: f64,
    distance_scale: f64,
    body_size_scale: f64,
    central_size: f64,
}

impl RealisticProjection {
    pub fn new(catalog: &Catalog, geometry: &Geometry, params: &Parameters) -> Self {
        let max_orbit = catalog.max_orbit_radius().max(f64::EPSILON);
        let scale_factor = geometry.usable_extent() / max_orbit;
        let central_size = (catalog.central.visual_size
            * scale_factor
            * params.central_body_size_scale)
            .max(MIN_CENTRAL_SIZE);
        Self {
            scale_factor,
            distance_scale: params.distance_scale,
            body_size_scale: params.body_size_scale,
            central_size,
        }
    }

    pub fn scale_factor(&self) -> f64 {
        self.scale_factor
    }
}

impl Projection for RealisticProjection {
    fn orbit_radii(&self, _index: usize, body: &Body) -> (f64, f64) {
        let k = self.scale_factor * self.distance_scale;
        (body.orbit_radius_x * k, body.orbit_radius_y * k)
    }

    fn body_size(&self, body: &Body) -> f64 {
        (body.visual_size * self.scale_factor * self.body_size_scale).max(MIN_BODY_SIZE)
    }

    fn central_size(&self) -> f64 {
        self.central_size
    }
}

#[derive(Clone, Copy, Debug)]
pub struct IllustrativeProjection {
    ring_spacing: f64,
    distance_scale: f64,
    body_size_scale: f64,
    central_visual_size: f64,
    central_size_scale: f64,
}

impl IllustrativeProjection {
    pub fn new(catalog: &Catalog, geometry: &Geometry, params: &Parameters) -> Self {
        let rings = catalog.len().max(1) as f64;
        Self {
            ring_spacing: geometry.usable_extent() / rings,
            distance_scale: params.distance_scale,
            body_size_scale: params.body_size_scale,
            central_visual_size: catalog.central.visual_size.max(f64::EPSILON),
            central_size_scale: params.central_body_size_scale,
        }
    }

    pub fn ring_spacing(&self) -> f64 {
        self.ring_spacing
    }
}

impl Projection for IllustrativeProjection {
    fn orbit_radii(&self, index: usize, body: &Body) -> (f64, f64) {
        let rx = (self.ring_spacing + index as f64 * self.ring_spacing) * self.distance_scale;
        let ry = if body.orbit_radius_x > 0.0 {
            rx * body.orbit_radius_y / body.orbit_radius_x
        } else {
            rx
        };
        (rx, ry)
    }

    fn body_size(&self, body: &Body) -> f64 {
        // sqrt keeps a 30x diameter spread inside [5, 20] before scaling.
        let ratio = (body.visual_size / self.central_visual_size).clamp(0.0, 1.0);
        ((ILLUSTRATIVE_BASE_SIZE + ratio.sqrt() * ILLUSTRATIVE_GROWTH) * self.body_size_scale)
            .max(MIN_BODY_SIZE)
    }

    fn central_size(&self) -> f64 {
        (ILLUSTRATIVE_CENTRAL_SIZE * self.central_size_scale).max(MIN_CENTRAL_SIZE)
    }
}

pub fn projection_for(
    catalog: &Catalog,
    geometry: &Geometry,
    params: &Parameters,
) -> Box<dyn Projection> {
    match params.view_mode {
        ViewMode::Realistic => Box::new(RealisticProjection::new(catalog, geometry, params)),
        ViewMode::Illustrative => Box::new(IllustrativeProjection::new(catalog, geometry, params)),
    }
}

pub fn map_body(
    projection: &dyn Projection,
    geometry: &Geometry,
    index: usize,
    body: &Body,
    time_ms: f64,
    params: &Parameters,
) -> Placement {
    let a = angle(body, time_ms, params);
    let (rx, ry) = projection.orbit_radii(index, body);
    Placement {
        x: geometry.center_x + rx * a.cos(),
        y: geometry.center_y + ry * a.sin(),
        size: projection.body_size(body),
        orbit_rx: rx,
        orbit_ry: ry,
    }
}

pub fn compute_frame(
    catalog: &Catalog,
    time_ms: f64,
    params: &Parameters,
    geometry: &Geometry,
) -> Frame {
    let projection = projection_for(catalog, geometry, params);
    let bodies = catalog
        .bodies()
        .iter()
        .enumerate()
        .map(|(i, b)| map_body(projection.as_ref(), geometry, i, b, time_ms, params))
        .collect();
    Frame {
        center: (geometry.center_x, geometry.center_y),
        central_size: projection.central_size(),
        bodies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::Control;
    use std::f64::consts::TAU;

    fn geo() -> Geometry {
        Geometry::from_size(800.0, 800.0)
    }

    fn params(mode: ViewMode) -> Parameters {
        Parameters { view_mode: mode, ..Parameters::default() }
    }

    #[test]
    fn sizes_never_drop_below_minimum() {
        let cat = Catalog::default();
        for mode in [ViewMode::Realistic, ViewMode::Illustrative] {
            let mut p = params(mode);
            for c in Control::ALL {
                p.set(c, 0.1);
            }
            for g in [geo(), Geometry::from_size(40.0, 30.0), Geometry::from_size(2.0, 2.0)] {
                let f = compute_frame(&cat, 1.7e12, &p, &g);
                for b in &f.bodies {
                    assert!(b.size >= MIN_BODY_SIZE, "{mode:?} size {}", b.size);
                }
                assert!(f.central_size >= MIN_CENTRAL_SIZE);
            }
        }
    }

    #[test]
    fn illustrative_rings_increase_with_index() {
        let cat = Catalog::default();
        let f = compute_frame(&cat, 0.0, &params(ViewMode::Illustrative), &geo());
        for pair in f.bodies.windows(2) {
            assert!(pair[0].orbit_rx < pair[1].orbit_rx);
        }
        // outermost ring sits on the margin
        let last = f.bodies.last().unwrap();
        assert!((last.orbit_rx - (400.0 - MARGIN)).abs() < 1e-9);
    }

    #[test]
    fn realistic_preserves_distance_order() {
        let cat = Catalog::default();
        let mut p = params(ViewMode::Realistic);
        p.distance_scale = 0.7;
        let f = compute_frame(&cat, 0.0, &p, &geo());
        for (pair, bodies) in f.bodies.windows(2).zip(cat.bodies().windows(2)) {
            assert!(bodies[0].orbit_radius_x < bodies[1].orbit_radius_x);
            assert!(pair[0].orbit_rx < pair[1].orbit_rx);
        }
    }

    #[test]
    fn realistic_outermost_orbit_touches_margin() {
        let cat = Catalog::default();
        let proj = RealisticProjection::new(&cat, &geo(), &params(ViewMode::Realistic));
        let neptune = cat.get(7).unwrap();
        let (rx, ry) = proj.orbit_radii(7, neptune);
        assert!((rx - 380.0).abs() < 1e-9);
        assert_eq!(rx, ry);
    }

    #[test]
    fn angle_matches_earth_scenario() {
        let cat = Catalog::default();
        let earth = cat.get(2).unwrap();
        let t0 = 1_000_000.0;
        let p = Parameters::default();
        let expected = t0 * 1e-5 * 29.78 + 2.0;
        assert!((angle(earth, t0, &p) - expected).abs() < 1e-9);

        let doubled = Parameters { speed_multiplier: 2.0, ..p };
        let elapsed = angle(earth, t0, &p) - earth.phase_offset;
        let elapsed2 = angle(earth, t0, &doubled) - earth.phase_offset;
        assert!((elapsed2 - 2.0 * elapsed).abs() < 1e-9);
    }

    #[test]
    fn position_follows_angle_on_the_ellipse() {
        let cat = Catalog::default();
        let p = params(ViewMode::Illustrative);
        let g = geo();
        let f = compute_frame(&cat, 123_456.0, &p, &g);
        for (b, pl) in cat.bodies().iter().zip(&f.bodies) {
            let a = angle(b, 123_456.0, &p).rem_euclid(TAU);
            let got = (pl.y - g.center_y).atan2(pl.x - g.center_x).rem_euclid(TAU);
            let diff = (a - got).abs();
            assert!(diff < 1e-6 || (TAU - diff) < 1e-6);
        }
    }

    #[test]
    fn frame_compute_is_idempotent() {
        let cat = Catalog::default();
        for mode in [ViewMode::Realistic, ViewMode::Illustrative] {
            let p = params(mode);
            let a = compute_frame(&cat, 5e11, &p, &geo());
            let b = compute_frame(&cat, 5e11, &p, &geo());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn illustrative_sizes_are_compressed() {
        let cat = Catalog::default();
        let proj = IllustrativeProjection::new(&cat, &geo(), &Parameters::default());
        let mercury = proj.body_size(cat.get(0).unwrap());
        let jupiter = proj.body_size(cat.get(4).unwrap());
        assert!(mercury < jupiter);
        assert!(mercury >= 5.0 && jupiter <= 20.0);
        assert!(jupiter / mercury < 3.0);
        assert_eq!(proj.central_size(), 20.0);
    }

    #[test]
    fn projection_scales_follow_usable_extent() {
        let cat = Catalog::default();
        let g = geo();
        assert_eq!(g.usable_extent(), 380.0);

        let ill = IllustrativeProjection::new(&cat, &g, &Parameters::default());
        assert!((ill.ring_spacing() - 380.0 / 8.0).abs() < 1e-12);

        let real = RealisticProjection::new(&cat, &g, &params(ViewMode::Realistic));
        assert!((real.scale_factor() - 380.0 / 4495.0).abs() < 1e-12);
        let (rx, _) = real.orbit_radii(2, cat.get(2).unwrap());
        assert!((rx - 149.6 * real.scale_factor()).abs() < 1e-9);
    }
}

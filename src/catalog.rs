use crate::surface::Rgba;

/// Real-world kilometres to abstract visual units.
pub const SCALE_FACTOR: f64 = 1e-5;

pub const SUN_DIAMETER_KM: f64 = 1_392_700.0;

#[derive(Clone, Debug, PartialEq)]
pub struct Body {
    pub name: &'static str,
    pub color: Rgba,
    /// Semi-axes in million km.
    pub orbit_radius_x: f64,
    pub orbit_radius_y: f64,
    /// Relative angular velocity (mean orbital speed, km/s).
    pub angular_speed: f64,
    /// Diameter in km times `SCALE_FACTOR`.
    pub visual_size: f64,
    /// Starting angle in radians.
    pub phase_offset: f64,
}

impl Body {
    pub fn diameter_km(&self) -> f64 {
        self.visual_size / SCALE_FACTOR
    }

    pub fn info(&self) -> BodyInfo {
        BodyInfo {
            name: self.name,
            distance_mkm: self.orbit_radius_x,
            diameter_km: self.diameter_km(),
        }
    }
}

/// What the selection panel shows for a body.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyInfo {
    pub name: &'static str,
    pub distance_mkm: f64,
    pub diameter_km: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CentralBody {
    pub name: &'static str,
    pub color: Rgba,
    pub visual_size: f64,
}

/// Fixed, ordered set of bodies. Index is identity for the whole session.
#[derive(Clone, Debug)]
pub struct Catalog {
    pub central: CentralBody,
    bodies: Vec<Body>,
}

impl Catalog {
    pub fn new(central: CentralBody, bodies: Vec<Body>) -> Self {
        Self { central, bodies }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn get(&self, index: usize) -> Option<&Body> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn max_orbit_radius(&self) -> f64 {
        self.bodies
            .iter()
            .map(|b| b.orbit_radius_x)
            .fold(0.0, f64::max)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(
            CentralBody {
                name: "Sun",
                color: Rgba::rgb(0xff, 0xd7, 0x00),
                visual_size: SUN_DIAMETER_KM * SCALE_FACTOR,
            },
            default_bodies(),
        )
    }
}

fn planet(
    name: &'static str,
    color: Rgba,
    distance_mkm: f64,
    speed: f64,
    diameter_km: f64,
    phase: f64,
) -> Body {
    Body {
        name,
        color,
        orbit_radius_x: distance_mkm,
        orbit_radius_y: distance_mkm,
        angular_speed: speed,
        visual_size: diameter_km * SCALE_FACTOR,
        phase_offset: phase,
    }
}

fn default_bodies() -> Vec<Body> {
    vec![
        planet("Mercury", Rgba::rgb(0x8c, 0x8c, 0x8c), 57.9, 47.87, 4879.0, 0.0),
        planet("Venus", Rgba::rgb(0xe6, 0xe6, 0xfa), 108.2, 35.02, 12104.0, 1.0),
        planet("Earth", Rgba::rgb(0x41, 0x69, 0xe1), 149.6, 29.78, 12742.0, 2.0),
        planet("Mars", Rgba::rgb(0xff, 0x45, 0x00), 227.9, 24.07, 6779.0, 3.0),
        planet("Jupiter", Rgba::rgb(0xff, 0xa5, 0x00), 778.5, 13.07, 139820.0, 4.0),
        planet("Saturn", Rgba::rgb(0xf4, 0xa4, 0x60), 1434.0, 9.69, 116460.0, 5.0),
        planet("Uranus", Rgba::rgb(0x40, 0xe0, 0xd0), 2871.0, 6.81, 50724.0, 6.0),
        planet("Neptune", Rgba::rgb(0x41, 0x69, 0xe1), 4495.0, 5.43, 49244.0, 7.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_catalog_is_ordered_by_distance() {
        let cat = Catalog::default();
        assert_eq!(cat.len(), 8);
        for pair in cat.bodies().windows(2) {
            assert!(pair[0].orbit_radius_x < pair[1].orbit_radius_x);
        }
        assert_eq!(cat.max_orbit_radius(), 4495.0);
    }

    #[test]
    fn phases_are_distinct() {
        let cat = Catalog::default();
        let mut phases: Vec<f64> = cat.bodies().iter().map(|b| b.phase_offset).collect();
        phases.dedup();
        assert_eq!(phases.len(), cat.len());
    }

    #[test]
    fn info_recovers_true_diameter() {
        let cat = Catalog::default();
        let earth = cat.get(2).unwrap().info();
        assert_eq!(earth.name, "Earth");
        assert_eq!(earth.distance_mkm, 149.6);
        assert!((earth.diameter_km - 12742.0).abs() < 1e-6);
    }

    #[test]
    fn empty_catalog_has_no_orbits() {
        let cat = Catalog::new(Catalog::default().central, Vec::new());
        assert!(cat.is_empty());
        assert!(!Catalog::default().is_empty());
        assert_eq!(cat.max_orbit_radius(), 0.0);
        assert!(cat.get(0).is_none());
    }
}

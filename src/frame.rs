/// Where one body was drawn. `size` is a diameter in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub orbit_rx: f64,
    pub orbit_ry: f64,
}

impl Placement {
    /// Hit radius is half the stored diameter, same as the draw radius.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let dx = px - self.x;
        let dy = py - self.y;
        (dx * dx + dy * dy).sqrt() <= self.size / 2.0
    }
}

/// Everything needed to paint one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub center: (f64, f64),
    pub central_size: f64,
    pub bodies: Vec<Placement>,
}

/// Last completed frame's placements, indexed by catalog position.
///
/// Only ever replaced as a whole, so readers never see a half-updated frame.
#[derive(Clone, Debug, Default)]
pub struct FrameCache {
    entries: Vec<Option<Placement>>,
    frame_no: u64,
}

impl FrameCache {
    pub fn new(body_count: usize) -> Self {
        Self {
            entries: vec![None; body_count],
            frame_no: 0,
        }
    }

    pub fn commit(&mut self, frame: &Frame) {
        self.entries = frame.bodies.iter().copied().map(Some).collect();
        self.frame_no += 1;
    }

    pub fn get(&self, index: usize) -> Option<&Placement> {
        self.entries.get(index).and_then(|e| e.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Option<&Placement>)> {
        self.entries.iter().enumerate().map(|(i, e)| (i, e.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of frames committed so far.
    pub fn frame_no(&self) -> u64 {
        self.frame_no
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64, size: f64) -> Placement {
        Placement { x, y, size, orbit_rx: 10.0, orbit_ry: 10.0 }
    }

    #[test]
    fn contains_uses_half_the_size() {
        let p = at(10.0, 10.0, 8.0);
        assert!(p.contains(10.0, 10.0));
        assert!(p.contains(14.0, 10.0));
        assert!(!p.contains(14.1, 10.0));
    }

    #[test]
    fn commit_replaces_every_entry() {
        let mut cache = FrameCache::new(2);
        assert!(cache.get(0).is_none());
        let frame = Frame {
            center: (0.0, 0.0),
            central_size: 4.0,
            bodies: vec![at(1.0, 1.0, 2.0), at(5.0, 5.0, 2.0)],
        };
        cache.commit(&frame);
        assert_eq!(cache.get(1), Some(&at(5.0, 5.0, 2.0)));
        assert_eq!(cache.frame_no(), 1);
    }

    #[test]
    fn cache_has_a_slot_per_body_before_any_frame() {
        let cache = FrameCache::new(3);
        assert_eq!(cache.len(), 3);
        assert!(!cache.is_empty());
        assert!(cache.iter().all(|(_, pl)| pl.is_none()));
        assert!(FrameCache::default().is_empty());
    }
}

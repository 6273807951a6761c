use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Realistic,
    Illustrative,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Realistic => ViewMode::Illustrative,
            ViewMode::Illustrative => ViewMode::Realistic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewMode::Realistic => "realistic",
            ViewMode::Illustrative => "illustrative",
        }
    }
}

/// The four continuous sliders of the control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Speed,
    Distance,
    CentralSize,
    BodySize,
}

pub const SLIDER_STEP: f64 = 0.1;
pub const SPEED_RANGE: RangeInclusive<f64> = 0.1..=10.0;
pub const SCALE_RANGE: RangeInclusive<f64> = 0.1..=2.0;

impl Control {
    pub const ALL: [Control; 4] = [
        Control::Speed,
        Control::Distance,
        Control::CentralSize,
        Control::BodySize,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Control::Speed => "Speed",
            Control::Distance => "Distance",
            Control::CentralSize => "Sun size",
            Control::BodySize => "Planet size",
        }
    }

    pub fn range(self) -> RangeInclusive<f64> {
        match self {
            Control::Speed => SPEED_RANGE,
            _ => SCALE_RANGE,
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|c| *c == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Live values of the control panel. Read by the core each frame, never written by it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    pub view_mode: ViewMode,
    pub speed_multiplier: f64,
    pub distance_scale: f64,
    pub central_body_size_scale: f64,
    pub body_size_scale: f64,
    pub show_orbits: bool,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::Illustrative,
            speed_multiplier: 1.0,
            distance_scale: 1.0,
            central_body_size_scale: 1.0,
            body_size_scale: 1.0,
            show_orbits: true,
        }
    }
}

impl Parameters {
    pub fn get(&self, control: Control) -> f64 {
        match control {
            Control::Speed => self.speed_multiplier,
            Control::Distance => self.distance_scale,
            Control::CentralSize => self.central_body_size_scale,
            Control::BodySize => self.body_size_scale,
        }
    }

    pub fn set(&mut self, control: Control, value: f64) {
        let v = snap(value, control.range());
        match control {
            Control::Speed => self.speed_multiplier = v,
            Control::Distance => self.distance_scale = v,
            Control::CentralSize => self.central_body_size_scale = v,
            Control::BodySize => self.body_size_scale = v,
        }
    }

    /// Move a slider by whole steps, staying inside its range.
    pub fn nudge(&mut self, control: Control, steps: i32) {
        let v = self.get(control) + steps as f64 * SLIDER_STEP;
        self.set(control, v);
    }

    /// Force every slider back into its range.
    pub fn clamped(mut self) -> Self {
        for c in Control::ALL {
            let v = self.get(c);
            self.set(c, v);
        }
        self
    }
}

fn snap(value: f64, range: RangeInclusive<f64>) -> f64 {
    let (lo, hi) = (*range.start(), *range.end());
    if !value.is_finite() {
        return lo;
    }
    let stepped = (value / SLIDER_STEP).round() * SLIDER_STEP;
    stepped.clamp(lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nudge_stays_in_range() {
        let mut p = Parameters::default();
        for _ in 0..200 {
            p.nudge(Control::Speed, 1);
        }
        assert_eq!(p.speed_multiplier, 10.0);
        for _ in 0..200 {
            p.nudge(Control::BodySize, -1);
        }
        assert!((p.body_size_scale - 0.1).abs() < 1e-9);
    }

    #[test]
    fn clamped_fixes_bad_values() {
        let p = Parameters {
            speed_multiplier: -3.0,
            distance_scale: 50.0,
            central_body_size_scale: f64::NAN,
            ..Parameters::default()
        }
        .clamped();
        assert!((p.speed_multiplier - 0.1).abs() < 1e-9);
        assert_eq!(p.distance_scale, 2.0);
        assert!((p.central_body_size_scale - 0.1).abs() < 1e-9);
    }

    #[test]
    fn control_cycle_wraps() {
        assert_eq!(Control::BodySize.next(), Control::Speed);
        assert_eq!(Control::Speed.prev(), Control::BodySize);
    }

    #[test]
    fn view_mode_toggles() {
        assert_eq!(ViewMode::Illustrative.toggled(), ViewMode::Realistic);
        assert_eq!(ViewMode::Realistic.toggled().label(), "illustrative");
    }
}

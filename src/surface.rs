#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0 + 0.5) as u8,
            ..self
        }
    }

    /// Composite `self` on top of `dst` (straight alpha, source-over).
    pub fn over(self, dst: Rgba) -> Rgba {
        if self.a == 255 || dst.a == 0 {
            return self;
        }
        if self.a == 0 {
            return dst;
        }
        let sa = self.a as f32 / 255.0;
        let da = dst.a as f32 / 255.0 * (1.0 - sa);
        let a = sa + da;
        let mix = |s: u8, d: u8| ((s as f32 * sa + d as f32 * da) / a).round().clamp(0.0, 255.0) as u8;
        Rgba {
            r: mix(self.r, dst.r),
            g: mix(self.g, dst.g),
            b: mix(self.b, dst.b),
            a: (a * 255.0).round().clamp(0.0, 255.0) as u8,
        }
    }
}


/// A 2D drawing context over a pixel buffer owned by the host.
///
/// Coordinates are pixels from the top-left corner; `fill_disk` takes a
/// radius, `stroke_ellipse` takes semi-axes.
pub trait Surface {
    fn size(&self) -> (f64, f64);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64, color: Rgba);
    fn fill_disk(&mut self, cx: f64, cy: f64, radius: f64, color: Rgba);
    fn stroke_ellipse(&mut self, cx: f64, cy: f64, rx: f64, ry: f64, color: Rgba);
}

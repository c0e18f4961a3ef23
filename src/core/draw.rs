use super::constants::*;
use super::field::ParticleField;
use glam::Vec2;
use rand::Rng;

/// Straight-alpha colour as handed to a 2D context.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl Rgba {
    #[inline]
    pub const fn new(rgb: [u8; 3], alpha: f32) -> Self {
        Self { rgb, alpha }
    }

    #[inline]
    pub const fn opaque(rgb: [u8; 3]) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    /// CSS `rgba(...)` string, usable for fill, stroke and shadow styles.
    pub fn css(&self) -> String {
        format!(
            "rgba({},{},{},{})",
            self.rgb[0], self.rgb[1], self.rgb[2], self.alpha
        )
    }
}

/// The subset of a 2D drawing context the backdrop needs. Coordinates are
/// CSS pixels; the implementation owns any device-pixel-ratio transform.
pub trait Canvas2d {
    fn fill_rect(&mut self, origin: Vec2, size: Vec2, color: Rgba);
    fn stroke_line(&mut self, from: Vec2, to: Vec2, color: Rgba, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba, glow_blur: f32);
}

/// Per-frame draw cycle over a `ParticleField`.
///
/// Each rendered tick paints the translucent trail rectangle, the link pass
/// (desktop only), the glowing particles, and finally integrates positions.
/// On mobile only every other tick renders; skipped ticks leave the field
/// untouched.
pub struct FieldRenderer<R: Rng> {
    field: ParticleField<R>,
    ticks: u64,
}

impl<R: Rng> FieldRenderer<R> {
    pub fn new(field: ParticleField<R>) -> Self {
        Self { field, ticks: 0 }
    }

    #[inline]
    pub fn field(&self) -> &ParticleField<R> {
        &self.field
    }

    #[inline]
    pub fn field_mut(&mut self) -> &mut ParticleField<R> {
        &mut self.field
    }

    /// Run one animation tick. Returns whether anything was drawn.
    pub fn tick<C: Canvas2d>(&mut self, canvas: &mut C) -> bool {
        let stride = self.field.config().mode.profile().frame_stride.max(1);
        let tick = self.ticks;
        self.ticks = self.ticks.wrapping_add(1);
        if tick % stride != 0 {
            return false;
        }
        self.draw(canvas);
        self.field.step();
        true
    }

    /// Paint the current state without advancing it.
    pub fn draw<C: Canvas2d>(&self, canvas: &mut C) {
        let profile = self.field.config().mode.profile();
        canvas.fill_rect(
            Vec2::ZERO,
            self.field.size(),
            Rgba::new(TRAIL_RGB, profile.trail_alpha),
        );

        let particles = self.field.particles();
        if profile.draw_links {
            for link in self.field.links() {
                canvas.stroke_line(
                    particles[link.a].pos,
                    particles[link.b].pos,
                    Rgba::new(LINK_RGB, link.strength * LINK_PEAK_ALPHA),
                    LINK_LINE_WIDTH,
                );
            }
        }

        for p in particles {
            canvas.fill_circle(p.pos, p.radius, Rgba::opaque(p.rgb()), profile.glow_blur);
        }
    }
}

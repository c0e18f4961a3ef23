use super::constants::*;
use glam::Vec2;
use rand::Rng;

/// Layout class of the host viewport. Picked once when the backdrop starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldMode {
    Mobile,
    Desktop,
}

impl FieldMode {
    pub fn classify(viewport_width: f64) -> Self {
        if viewport_width <= MOBILE_MAX_VIEWPORT_PX {
            FieldMode::Mobile
        } else {
            FieldMode::Desktop
        }
    }

    #[inline]
    pub fn profile(self) -> &'static ModeProfile {
        match self {
            FieldMode::Mobile => &MOBILE_PROFILE,
            FieldMode::Desktop => &DESKTOP_PROFILE,
        }
    }
}

/// Number of particles for a surface `width` CSS pixels wide.
pub fn particle_count(mode: FieldMode, width: f32) -> usize {
    let p = mode.profile();
    (width / p.count_divisor)
        .clamp(p.count_min, p.count_max)
        .floor() as usize
}

/// Maximum separation at which two particles are joined by a line.
pub fn link_distance(mode: FieldMode, width: f32) -> f32 {
    let p = mode.profile();
    (width / p.link_divisor).clamp(p.link_min, p.link_max)
}

/// Device pixel ratio as the backdrop uses it: missing or bogus values
/// fall back to 1, anything above 2 is capped.
pub fn effective_dpr(raw: f64) -> f64 {
    if raw.is_finite() && raw > 0.0 {
        raw.min(MAX_DEVICE_PIXEL_RATIO)
    } else {
        1.0
    }
}

/// Backing store resolution for a surface of `size` CSS pixels.
pub fn backing_size(size: Vec2, dpr: f64) -> (u32, u32) {
    let w = (size.x as f64 * dpr).floor().max(0.0) as u32;
    let h = (size.y as f64 * dpr).floor().max(0.0) as u32;
    (w, h)
}

/// Values derived from the surface width and mode; recomputed on resize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldConfig {
    pub mode: FieldMode,
    pub particle_count: usize,
    pub max_speed: f32,
    pub link_distance: f32,
    pub device_pixel_ratio: f64,
}

impl FieldConfig {
    pub fn derive(mode: FieldMode, width: f32, raw_dpr: f64) -> Self {
        Self {
            mode,
            particle_count: particle_count(mode, width),
            max_speed: mode.profile().max_speed,
            link_distance: link_distance(mode, width),
            device_pixel_ratio: effective_dpr(raw_dpr),
        }
    }
}

/// A single point of the backdrop. `color` indexes `PARTICLE_PALETTE`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
    pub color: usize,
}

impl Particle {
    #[inline]
    pub fn rgb(&self) -> [u8; 3] {
        PARTICLE_PALETTE[self.color % PARTICLE_PALETTE.len()]
    }
}

/// A pair of particles close enough to be joined. `strength` is
/// `1 - distance / link_distance`, so it lies in `(0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub strength: f32,
}

/// The particle set plus the random source used to populate it.
///
/// The field never redistributes existing particles: resizing only truncates
/// from the end or appends fresh ones, and `step` moves every particle by its
/// velocity with a toroidal wrap `WRAP_MARGIN_PX` outside the surface.
pub struct ParticleField<R: Rng> {
    config: FieldConfig,
    size: Vec2,
    particles: Vec<Particle>,
    rng: R,
}

impl<R: Rng> ParticleField<R> {
    /// Build a field for a surface of `size` CSS pixels and populate it.
    pub fn new(size: Vec2, mode: FieldMode, raw_dpr: f64, rng: R) -> Self {
        let config = FieldConfig::derive(mode, size.x, raw_dpr);
        let mut field = Self {
            config,
            size,
            particles: Vec::with_capacity(config.particle_count),
            rng,
        };
        field.fill_to(config.particle_count);
        field
    }

    /// Build a field around an explicit particle set; no particles are spawned.
    pub fn with_particles(
        size: Vec2,
        mode: FieldMode,
        raw_dpr: f64,
        particles: Vec<Particle>,
        rng: R,
    ) -> Self {
        Self {
            config: FieldConfig::derive(mode, size.x, raw_dpr),
            size,
            particles,
            rng,
        }
    }

    #[inline]
    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn backing_size(&self) -> (u32, u32) {
        backing_size(self.size, self.config.device_pixel_ratio)
    }

    /// Draw a fresh particle uniformly over the current surface.
    pub fn spawn(&mut self) -> Particle {
        let profile = self.config.mode.profile();
        let speed = self.config.max_speed;
        let rng = &mut self.rng;
        Particle {
            pos: Vec2::new(rng.gen::<f32>() * self.size.x, rng.gen::<f32>() * self.size.y),
            vel: Vec2::new(
                (rng.gen::<f32>() - 0.5) * speed,
                (rng.gen::<f32>() - 0.5) * speed,
            ),
            radius: rng.gen::<f32>() * profile.radius_span + profile.radius_min,
            color: rng.gen_range(0..PARTICLE_PALETTE.len()),
        }
    }

    fn fill_to(&mut self, count: usize) {
        self.particles.truncate(count);
        while self.particles.len() < count {
            let p = self.spawn();
            self.particles.push(p);
        }
    }

    /// Adopt a new surface size. Mode and pixel ratio stay as they were;
    /// count and link distance follow the new width. Returns the new count.
    pub fn resize(&mut self, size: Vec2) -> usize {
        self.size = size;
        let mode = self.config.mode;
        self.config.particle_count = particle_count(mode, size.x);
        self.config.link_distance = link_distance(mode, size.x);
        let before = self.particles.len();
        self.fill_to(self.config.particle_count);
        if before != self.particles.len() {
            log::debug!(
                "[field] resize {:.0}x{:.0}: {} -> {} particles",
                size.x,
                size.y,
                before,
                self.particles.len()
            );
        }
        self.particles.len()
    }

    /// Advance every particle one frame, wrapping past the margin.
    pub fn step(&mut self) {
        let max = self.size + Vec2::splat(WRAP_MARGIN_PX);
        for p in &mut self.particles {
            p.pos += p.vel;
            p.pos.x = wrap_axis(p.pos.x, max.x);
            p.pos.y = wrap_axis(p.pos.y, max.y);
        }
    }

    /// Every unordered pair closer than the link distance.
    pub fn links(&self) -> impl Iterator<Item = Link> + '_ {
        let max = self.config.link_distance;
        let ps = &self.particles;
        (0..ps.len()).flat_map(move |a| {
            ((a + 1)..ps.len()).filter_map(move |b| {
                let d = ps[a].pos.distance(ps[b].pos);
                (d < max).then(|| Link {
                    a,
                    b,
                    strength: 1.0 - d / max,
                })
            })
        })
    }
}

#[inline]
fn wrap_axis(v: f32, max: f32) -> f32 {
    if v < -WRAP_MARGIN_PX {
        max
    } else if v > max {
        -WRAP_MARGIN_PX
    } else {
        v
    }
}

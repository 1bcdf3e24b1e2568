//! Per-frame scene composition.
//!
//! Every animation frame the compositor re-projects the particle set at
//! the current rotation, applies the dust shell's independent drift and
//! shimmer, integrates dispersal motion when the card has exploded, and
//! emits a back-to-front render list (painter's algorithm). The particle
//! buffer is owned and mutated exclusively here; nothing else writes to
//! it between frames.

use crate::config::SceneConfig;
use crate::particles::{Particle, ParticleKind};
use crate::projection::project;

/// Lifecycle phase supplied by the surrounding application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Intro screen; rotation input is withheld
    Waiting,
    /// Tree rotating under tilt control
    Steady,
    /// The hidden gift is projected and tappable
    GiftVisible,
    /// Terminal explosion; particles fly apart under constant velocity
    Dispersed,
}

/// Current drawing surface dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Screen-space projection origin, nudged up so the tree sits above
    /// the card's greeting text
    pub fn center(&self, config: &SceneConfig) -> (f32, f32) {
        (
            self.width / 2.0,
            self.height / 2.0 - config.center_y_offset,
        )
    }

    /// World-to-pixel factor that fits the tree on the smaller dimension
    pub fn base_scale(&self, config: &SceneConfig) -> f32 {
        self.width.min(self.height) / config.fit_reference
    }
}

/// One drawable element of a frame, in paint order
#[derive(Debug, Clone)]
pub struct RenderPrimitive {
    pub kind: ParticleKind,
    pub id: u32,
    /// Screen position in pixels
    pub x: f32,
    pub y: f32,
    /// On-screen sprite size in pixels
    pub size: f32,
    /// Final alpha after shimmer modulation, clamped to [0, 1]
    pub alpha: f32,
    /// Per-particle rotation for non-circular sprites
    pub spin: f32,
    /// Pre-perspective rotated z; ascending order = back to front
    pub depth: f32,
    /// Index into the config's color table
    pub color: u32,
    /// Tappable radius in pixels; zero for everything but the gift
    pub hit_radius: f32,
}

impl RenderPrimitive {
    pub fn interactive(&self) -> bool {
        self.hit_radius > 0.0
    }
}

/// Owns the particle buffer and produces the render list each frame
pub struct SceneCompositor {
    particles: Vec<Particle>,
    gift: Particle,
    /// Slow monotone angle driving the dust shell independent of tilt
    drift: f32,
}

impl SceneCompositor {
    pub fn new(particles: Vec<Particle>, gift: Particle) -> Self {
        Self {
            particles,
            gift,
            drift: 0.0,
        }
    }

    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn gift(&self) -> &Particle {
        &self.gift
    }

    pub fn drift(&self) -> f32 {
        self.drift
    }

    /// Advance one frame and produce the depth-sorted render list
    pub fn frame(
        &mut self,
        angle: f32,
        phase: Phase,
        viewport: Viewport,
        config: &SceneConfig,
    ) -> Vec<RenderPrimitive> {
        self.drift += config.drift_step;
        if phase == Phase::Dispersed {
            self.integrate();
        }
        self.compose(angle, phase, viewport, config)
    }

    /// One step of dispersal motion: constant velocity, accumulating spin.
    /// Particles without a velocity never move.
    fn integrate(&mut self) {
        for p in &mut self.particles {
            if let Some(velocity) = p.velocity {
                p.position += velocity;
                p.spin += p.drift_rate;
            }
        }
    }

    /// Project the current particle state without mutating it
    pub fn compose(
        &self,
        angle: f32,
        phase: Phase,
        viewport: Viewport,
        config: &SceneConfig,
    ) -> Vec<RenderPrimitive> {
        let center = viewport.center(config);
        let scale = viewport.base_scale(config);

        let mut primitives = Vec::with_capacity(self.particles.len() + 1);

        for p in &self.particles {
            let (rotation, alpha) = match p.kind {
                ParticleKind::DustMote => {
                    let rotation = angle * p.angular_follow + self.drift * p.drift_rate;
                    (rotation, p.opacity * self.breathing(p))
                }
                _ => (angle, p.opacity),
            };

            let projected = project(p.position, rotation, center, scale, config.focal_length);
            if !projected.is_renderable(config.max_perspective) {
                // Near-singular perspective; dropping beats smearing
                continue;
            }

            primitives.push(RenderPrimitive {
                kind: p.kind,
                id: p.id,
                x: projected.x,
                y: projected.y,
                size: config.sprite_unit * p.scale * projected.perspective,
                alpha: alpha.clamp(0.0, 1.0),
                spin: p.spin,
                depth: projected.depth,
                color: p.color,
                hit_radius: 0.0,
            });
        }

        if phase == Phase::GiftVisible {
            let projected =
                project(self.gift.position, angle, center, scale, config.focal_length);
            if projected.is_renderable(config.max_perspective) {
                // The gift sprite scales by perspective alone so it stays
                // readable at any viewport size
                let size = config.gift_size * projected.perspective;
                primitives.push(RenderPrimitive {
                    kind: ParticleKind::Gift,
                    id: self.gift.id,
                    x: projected.x,
                    y: projected.y,
                    size,
                    alpha: 1.0,
                    spin: 0.0,
                    depth: projected.depth,
                    color: self.gift.color,
                    hit_radius: size * config.gift_hit_frac,
                });
            }
        }

        primitives.sort_unstable_by(|a, b| a.depth.total_cmp(&b.depth));
        primitives
    }

    /// Phase-offset breathing in [0, 1], decorrelated across the shell by
    /// each mote's follow coefficient
    fn breathing(&self, p: &Particle) -> f32 {
        let phase = p.angular_follow * 100.0;
        let speed = 1.5 + p.drift_rate;
        let wave = ((self.drift * speed * 5.0 + phase).sin() + 1.0) / 2.0;
        0.3 + 0.7 * wave
    }
}

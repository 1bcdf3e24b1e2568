//! Procedural generation of the tree's particle layout.
//!
//! The whole scene is a flat list of typed particles produced once at
//! session start: trunk segments on the vertical axis, ornaments filling
//! a cone, an optional topper star and outer dust shell, and a single
//! hidden gift placed on the cone's surface. Generation is deterministic
//! given the injected RNG, which keeps tests reproducible.

use rand::Rng;

use crate::config::{SceneConfig, COLOR_DUST, COLOR_GIFT, COLOR_TOPPER, COLOR_TRUNK};
use crate::math::Vec3;

/// What a particle is drawn as, and how it behaves across phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleKind {
    /// Trunk silhouette segment, static through every phase
    Trunk,
    /// Tree body ornament; rotates rigidly, disperses on explosion
    Ornament,
    /// Outer shell mote; follows tilt loosely, shimmers, disperses
    DustMote,
    /// Star at the apex, static through every phase
    Topper,
    /// The single interactive particle, placed separately
    Gift,
}

impl ParticleKind {
    /// Numeric code used in the flat frame buffer handed to the host
    pub fn code(self) -> f32 {
        match self {
            ParticleKind::Trunk => 0.0,
            ParticleKind::Ornament => 1.0,
            ParticleKind::DustMote => 2.0,
            ParticleKind::Topper => 3.0,
            ParticleKind::Gift => 4.0,
        }
    }
}

/// The atomic visual unit of the scene.
///
/// Two fields carry kind-dependent meaning: `angular_follow` is the
/// fraction of the global tilt rotation a dust mote follows (rigid kinds
/// keep it at 1.0), and `drift_rate` is a dust mote's ambient drift speed
/// or, for ornaments, the spin rate applied after dispersal.
#[derive(Debug, Clone)]
pub struct Particle {
    pub id: u32,
    pub kind: ParticleKind,
    pub position: Vec3,
    pub scale: f32,
    /// Index into the config's color table, opaque to the engine
    pub color: u32,
    /// Base alpha in [0, 1], before any per-frame shimmer
    pub opacity: f32,
    pub angular_follow: f32,
    pub drift_rate: f32,
    /// Accumulated per-particle rotation, advanced during dispersal
    pub spin: f32,
    /// World units per frame during dispersal; `None` means the particle
    /// never disperses. Assigned at creation only.
    pub velocity: Option<Vec3>,
}

/// Builds the initial particle layout from the scene config
pub struct ParticleGenerator<'a> {
    config: &'a SceneConfig,
}

impl<'a> ParticleGenerator<'a> {
    pub fn new(config: &'a SceneConfig) -> Self {
        Self { config }
    }

    /// Generate the full scene layout with `count` ornaments.
    ///
    /// Trunk, topper and dust shell counts come from the config. Negative
    /// counts are a caller bug and rejected outright.
    pub fn generate<R: Rng>(&self, count: i32, rng: &mut R) -> Result<Vec<Particle>, String> {
        if count < 0 {
            return Err(format!("ornament count must be non-negative, got {}", count));
        }

        let config = self.config;
        let mut particles = Vec::with_capacity(
            count as usize + config.trunk_segments as usize + config.dust_count as usize + 1,
        );
        let mut next_id = 0u32;
        let mut id = || {
            let i = next_id;
            next_id += 1;
            i
        };

        if config.topper {
            particles.push(Particle {
                id: id(),
                kind: ParticleKind::Topper,
                position: Vec3::new(0.0, config.body_cone.top - 15.0, 0.0),
                scale: 2.5,
                color: COLOR_TOPPER,
                opacity: 1.0,
                angular_follow: 1.0,
                drift_rate: 0.0,
                spin: 0.0,
                velocity: None,
            });
        }

        // Trunk segments stacked straight down from the body's base
        let base = config.body_cone.bottom();
        for i in 0..config.trunk_segments {
            particles.push(Particle {
                id: id(),
                kind: ParticleKind::Trunk,
                position: Vec3::new(0.0, base + i as f32 * 6.0, 0.0),
                scale: 0.5,
                color: COLOR_TRUNK,
                opacity: 1.0,
                angular_follow: 1.0,
                drift_rate: 0.0,
                spin: 0.0,
                velocity: None,
            });
        }

        for _ in 0..count {
            particles.push(self.ornament(id(), rng));
        }

        for _ in 0..config.dust_count {
            particles.push(self.dust_mote(id(), rng));
        }

        Ok(particles)
    }

    /// Place the hidden gift on the tree's surface envelope.
    ///
    /// Called once per session; the gift's world position never changes
    /// afterwards, whatever the rotation does.
    pub fn place_gift<R: Rng>(&self, rng: &mut R) -> Particle {
        let config = self.config;
        let y = config.gift_y_min + rng.gen::<f32>() * config.gift_y_span;
        let radius = config.body_cone.radius_at(y) * config.gift_radius_frac;
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;

        Particle {
            id: u32::MAX,
            kind: ParticleKind::Gift,
            position: Vec3::new(angle.cos() * radius, y, angle.sin() * radius),
            scale: 1.0,
            color: COLOR_GIFT,
            opacity: 1.0,
            angular_follow: 1.0,
            drift_rate: 0.0,
            spin: 0.0,
            velocity: None,
        }
    }

    /// Sample a body ornament inside the cone bound
    fn ornament<R: Rng>(&self, id: u32, rng: &mut R) -> Particle {
        let config = self.config;
        let cone = &config.body_cone;

        let y = cone.top + rng.gen::<f32>() * cone.span;
        let radius = cone.radius_at(y) * rng.gen::<f32>();
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);

        Particle {
            id,
            kind: ParticleKind::Ornament,
            position,
            scale: 0.5 + rng.gen::<f32>() * 0.8,
            color: config.palette_color(rng.gen_range(0..config.palette.len())),
            opacity: 0.2 + rng.gen::<f32>() * 0.5,
            angular_follow: 1.0,
            drift_rate: (rng.gen::<f32>() - 0.5) * config.ornament_spin,
            spin: rng.gen::<f32>() * std::f32::consts::PI,
            velocity: Some(burst_velocity(position, config.ornament_burst, rng)),
        }
    }

    /// Sample a shell mote outside the rigid body
    fn dust_mote<R: Rng>(&self, id: u32, rng: &mut R) -> Particle {
        let config = self.config;
        let cone = &config.dust_cone;

        let y = cone.top + rng.gen::<f32>() * cone.span;
        let radius =
            cone.radius_at(y) * (config.shell_inner + rng.gen::<f32>() * config.shell_spread);
        let angle = rng.gen::<f32>() * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos() * radius, y, angle.sin() * radius);

        Particle {
            id,
            kind: ParticleKind::DustMote,
            position,
            scale: 0.02 + rng.gen::<f32>() * 0.04,
            color: COLOR_DUST,
            opacity: 0.2 + rng.gen::<f32>() * 0.5,
            angular_follow: 0.05 + rng.gen::<f32>() * 0.15,
            drift_rate: 0.5 + rng.gen::<f32>() * 1.5,
            spin: 0.0,
            velocity: Some(Vec3::new(
                (rng.gen::<f32>() - 0.5) * config.dust_burst,
                (rng.gen::<f32>() - 0.5) * config.dust_burst,
                (rng.gen::<f32>() - 0.5) * config.dust_burst,
            )),
        }
    }
}

/// Random dispersal velocity with a bias away from the trunk axis, so the
/// explosion reads as outward rather than a shapeless scatter
fn burst_velocity<R: Rng>(position: Vec3, magnitude: f32, rng: &mut R) -> Vec3 {
    let mut velocity = Vec3::new(
        (rng.gen::<f32>() - 0.5) * magnitude,
        (rng.gen::<f32>() - 0.5) * magnitude,
        (rng.gen::<f32>() - 0.5) * magnitude,
    );

    let radial = position.radial();
    if radial > 0.001 {
        let bias = magnitude * 0.25 / radial;
        velocity.x += position.x * bias;
        velocity.z += position.z * bias;
    }
    velocity
}

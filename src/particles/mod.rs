pub mod generator;

pub use generator::{Particle, ParticleGenerator, ParticleKind};

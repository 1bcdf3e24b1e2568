use wasm_bindgen::prelude::*;

pub mod config;
pub mod input;
pub mod interaction;
pub mod math;
pub mod particles;
pub mod projection;
pub mod scene;

use rand::rngs::SmallRng;
use rand::SeedableRng;

use config::SceneConfig;
use input::TiltController;
use particles::ParticleGenerator;
use scene::{Phase, RenderPrimitive, SceneCompositor, Viewport};

/// Initialize panic hook for better error messages
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Lifecycle phase as seen by JavaScript
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPhase {
    Waiting,
    Steady,
    GiftVisible,
    Dispersed,
}

impl From<CardPhase> for Phase {
    fn from(phase: CardPhase) -> Self {
        match phase {
            CardPhase::Waiting => Phase::Waiting,
            CardPhase::Steady => Phase::Steady,
            CardPhase::GiftVisible => Phase::GiftVisible,
            CardPhase::Dispersed => Phase::Dispersed,
        }
    }
}

impl From<Phase> for CardPhase {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Waiting => CardPhase::Waiting,
            Phase::Steady => CardPhase::Steady,
            Phase::GiftVisible => CardPhase::GiftVisible,
            Phase::Dispersed => CardPhase::Dispersed,
        }
    }
}

/// Floats per primitive in the flat frame buffer:
/// kind code, particle id, x, y, size, alpha, spin, depth, color index
pub const FRAME_STRIDE: usize = 9;

/// Main engine state exposed to JavaScript.
///
/// The host registers one `tick` call per animation frame, feeds the
/// latest tilt sample through `set_tilt`, and draws the returned buffer.
/// Teardown is the host's job: stop scheduling ticks and drop the card.
#[wasm_bindgen]
pub struct GiftTreeCard {
    config: SceneConfig,
    compositor: SceneCompositor,
    tilt: TiltController,
    phase: Phase,
    /// Most recent tilt sample (degrees); newer samples overwrite older
    tilt_input: f32,
    viewport: Viewport,
    /// Session seed, kept so a config reload rebuilds the same scene
    seed: u64,
    last_frame: Vec<RenderPrimitive>,
}

#[wasm_bindgen]
impl GiftTreeCard {
    /// Create a card scene for a viewport of the given pixel size.
    ///
    /// Pass a seed for a reproducible scene; omit it to randomize the
    /// session (gift position included).
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, seed: Option<u32>) -> Result<GiftTreeCard, JsValue> {
        let seed = seed.map(u64::from).unwrap_or_else(entropy_seed);
        Self::build(SceneConfig::default(), width, height, seed)
            .map_err(|e| JsValue::from_str(&e))
    }

    fn build(
        config: SceneConfig,
        width: f32,
        height: f32,
        seed: u64,
    ) -> Result<GiftTreeCard, String> {
        config.validate()?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let generator = ParticleGenerator::new(&config);
        let particles = generator.generate(config.ornament_count, &mut rng)?;
        let gift = generator.place_gift(&mut rng);
        let tilt = TiltController::new(&config);

        Ok(GiftTreeCard {
            compositor: SceneCompositor::new(particles, gift),
            tilt,
            phase: Phase::Waiting,
            tilt_input: 0.0,
            viewport: Viewport::new(width, height),
            seed,
            config,
            last_frame: Vec::new(),
        })
    }

    /// Replace the tuning config from YAML and rebuild the scene.
    ///
    /// The session seed is reused so a tuning tweak keeps the same tree;
    /// the lifecycle restarts at the waiting phase.
    pub fn load_config(&mut self, yaml: &str) -> Result<(), JsValue> {
        let config = SceneConfig::from_yaml(yaml).map_err(|e| JsValue::from_str(&e))?;
        let rebuilt =
            Self::build(config, self.viewport.width, self.viewport.height, self.seed)
                .map_err(|e| JsValue::from_str(&e))?;
        *self = rebuilt;

        #[cfg(target_arch = "wasm32")]
        web_sys::console::log_1(
            &format!("scene rebuilt: {} particles", self.compositor.particle_count()).into(),
        );

        Ok(())
    }

    /// One animation frame: advance physics and return the flat render
    /// buffer, depth-sorted back to front (`FRAME_STRIDE` floats each).
    pub fn tick(&mut self) -> Vec<f32> {
        // The waiting phase keeps the frame loop alive but withholds
        // controller updates, freezing the angle
        let angle = if self.phase == Phase::Waiting {
            self.tilt.angle()
        } else {
            self.tilt.update(self.tilt_input)
        };

        let frame = self
            .compositor
            .frame(angle, self.phase, self.viewport, &self.config);

        let mut buffer = Vec::with_capacity(frame.len() * FRAME_STRIDE);
        for p in &frame {
            buffer.push(p.kind.code());
            buffer.push(p.id as f32);
            buffer.push(p.x);
            buffer.push(p.y);
            buffer.push(p.size);
            buffer.push(p.alpha);
            buffer.push(p.spin);
            buffer.push(p.depth);
            buffer.push(p.color as f32);
        }

        self.last_frame = frame;
        buffer
    }

    /// Latest tilt sample in degrees; clamped so the physics never sees
    /// extreme sensor readings
    pub fn set_tilt(&mut self, degrees: f32) {
        self.tilt_input = degrees.clamp(-self.config.max_tilt, self.config.max_tilt);
    }

    pub fn set_phase(&mut self, phase: CardPhase) {
        self.phase = phase.into();
    }

    pub fn phase(&self) -> CardPhase {
        self.phase.into()
    }

    /// Tap or click at screen coordinates. Returns true when the gift was
    /// hit, which is the only trigger for the dispersal phase.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        if self.phase != Phase::GiftVisible {
            return false;
        }
        if interaction::pick_interactive(&self.last_frame, x, y).is_some() {
            self.phase = Phase::Dispersed;
            true
        } else {
            false
        }
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Viewport::new(width, height);
    }

    /// Accumulated yaw of the tree in radians
    pub fn rotation(&self) -> f32 {
        self.tilt.angle()
    }

    pub fn particle_count(&self) -> usize {
        self.compositor.particle_count()
    }

    /// Hex colors indexed by the color column of the frame buffer
    pub fn color_table(&self) -> js_sys::Array {
        self.config
            .color_table()
            .iter()
            .map(|c| JsValue::from_str(c))
            .collect()
    }
}

/// Session seed when the host does not supply one
#[cfg(target_arch = "wasm32")]
fn entropy_seed() -> u64 {
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

#[cfg(not(target_arch = "wasm32"))]
fn entropy_seed() -> u64 {
    0x57a4_11fe
}

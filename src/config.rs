//! Scene tuning knobs.
//!
//! Every constant the card animation depends on lives here, with the
//! reference values baked into `Default`. A host can override them by
//! passing a YAML document to [`SceneConfig::from_yaml`].

use serde::Deserialize;

/// Color table index of the trunk color.
pub const COLOR_TRUNK: u32 = 0;
/// Color table index of the topper star color.
pub const COLOR_TOPPER: u32 = 1;
/// Color table index of the dust shell color.
pub const COLOR_DUST: u32 = 2;
/// Color table index of the gift sprite accent color.
pub const COLOR_GIFT: u32 = 3;
/// First ornament palette entry; palette colors follow contiguously.
pub const COLOR_PALETTE_BASE: u32 = 4;

/// Linear cone bound: the maximum horizontal radius allowed at a given
/// height, growing from zero at the apex to `base_radius` at the bottom
/// of the band. This bound is what gives the silhouette its tree shape.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConeBand {
    /// Height of the apex (more negative = higher on screen)
    pub top: f32,
    /// Vertical extent of the band below the apex
    pub span: f32,
    /// Radius at the bottom of the band
    pub base_radius: f32,
}

impl ConeBand {
    /// Maximum radius at height `y` within the band
    pub fn radius_at(&self, y: f32) -> f32 {
        (y - self.top) / self.span * self.base_radius
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.span
    }

    pub fn contains(&self, y: f32) -> bool {
        y >= self.top && y <= self.bottom()
    }
}

impl Default for ConeBand {
    fn default() -> Self {
        Self {
            top: -180.0,
            span: 300.0,
            base_radius: 125.0,
        }
    }
}

/// All tunable constants for the card scene
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Ornaments generated for the tree body
    pub ornament_count: i32,
    /// Dust motes in the outer shell (0 disables the shell)
    pub dust_count: u32,
    /// Trunk segments stacked below the body
    pub trunk_segments: u32,
    /// Whether to emit the topper star at the apex
    pub topper: bool,

    /// Ornament colors (hex strings, opaque to the engine)
    pub palette: Vec<String>,
    pub trunk_color: String,
    pub topper_color: String,
    pub dust_color: String,
    pub gift_color: String,

    /// Cone bound for the tree body
    pub body_cone: ConeBand,
    /// Wider, shifted cone bound enveloping the body with dust
    pub dust_cone: ConeBand,
    /// Dust radius spreads over `[shell_inner, shell_inner + shell_spread]`
    /// times the cone bound, pushing the shell outside the rigid body
    pub shell_inner: f32,
    pub shell_spread: f32,

    /// Gift placement band (on the body cone's surface)
    pub gift_y_min: f32,
    pub gift_y_span: f32,
    /// Fraction of the cone bound the gift sits at
    pub gift_radius_frac: f32,

    /// Fraction of angular velocity retained per frame; higher coasts longer
    pub friction: f32,
    /// Tilt degrees to radians-per-frame-squared acceleration
    pub accel_factor: f32,
    /// Angular velocity clamp (radians per frame)
    pub max_velocity: f32,
    /// Tilt input clamp (degrees)
    pub max_tilt: f32,

    /// Perspective focal length (world units)
    pub focal_length: f32,
    /// Perspective factors above this are treated as degenerate and dropped
    pub max_perspective: f32,

    /// Ambient drift advance per frame (radians)
    pub drift_step: f32,
    /// Dispersal velocity magnitude per axis for ornaments
    pub ornament_burst: f32,
    /// Dispersal velocity magnitude per axis for dust
    pub dust_burst: f32,
    /// Ornament spin rate magnitude after dispersal
    pub ornament_spin: f32,

    /// Base sprite size in screen units before scale and perspective
    pub sprite_unit: f32,
    /// Gift sprite size in screen units, scaled by perspective only
    pub gift_size: f32,
    /// The gift's tappable radius as a fraction of its sprite size
    pub gift_hit_frac: f32,

    /// Viewport dimension the world scale is normalized against
    pub fit_reference: f32,
    /// Screen-space upward shift of the projection center
    pub center_y_offset: f32,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            ornament_count: 280,
            dust_count: 1200,
            trunk_segments: 8,
            topper: true,

            palette: [
                "#86efac", "#4ade80", "#22c55e", "#fef08a", "#fbbf24", "#d9f99d",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            trunk_color: "#713f12".to_string(),
            topper_color: "#fde047".to_string(),
            dust_color: "#ffffff".to_string(),
            gift_color: "#e11d48".to_string(),

            body_cone: ConeBand::default(),
            dust_cone: ConeBand {
                top: -220.0,
                span: 380.0,
                base_radius: 180.0,
            },
            shell_inner: 0.6,
            shell_spread: 0.6,

            gift_y_min: 20.0,
            gift_y_span: 80.0,
            gift_radius_frac: 0.95,

            friction: 0.92,
            accel_factor: 0.0006,
            max_velocity: 0.06,
            max_tilt: 45.0,

            focal_length: 400.0,
            max_perspective: 40.0,

            drift_step: 0.0015,
            ornament_burst: 10.0,
            dust_burst: 12.0,
            ornament_spin: 0.1,

            sprite_unit: 18.0,
            gift_size: 24.0,
            gift_hit_frac: 0.9,

            fit_reference: 450.0,
            center_y_offset: 20.0,
        }
    }
}

impl SceneConfig {
    /// Parse from a YAML string and validate
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let config: SceneConfig =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<(), String> {
        if self.ornament_count < 0 {
            return Err(format!(
                "ornament_count must be non-negative, got {}",
                self.ornament_count
            ));
        }
        if self.palette.is_empty() {
            return Err("palette must contain at least one color".to_string());
        }
        if self.focal_length <= 0.0 {
            return Err(format!(
                "focal_length must be positive, got {}",
                self.focal_length
            ));
        }
        if !(0.0..1.0).contains(&self.friction) {
            return Err(format!(
                "friction must be in [0, 1) to guarantee decay, got {}",
                self.friction
            ));
        }
        if self.max_velocity <= 0.0 {
            return Err(format!(
                "max_velocity must be positive, got {}",
                self.max_velocity
            ));
        }
        if self.body_cone.span <= 0.0 || self.dust_cone.span <= 0.0 {
            return Err("cone spans must be positive".to_string());
        }
        if self.fit_reference <= 0.0 {
            return Err(format!(
                "fit_reference must be positive, got {}",
                self.fit_reference
            ));
        }
        // The tree must stay well clear of the focal plane or the
        // perspective divide blows up.
        let reach = self
            .body_cone
            .base_radius
            .max(self.dust_cone.base_radius * (self.shell_inner + self.shell_spread));
        if reach >= self.focal_length {
            return Err(format!(
                "tree radius {} reaches the focal plane at {}",
                reach, self.focal_length
            ));
        }
        Ok(())
    }

    /// Hex colors indexed by the `COLOR_*` constants, for the drawing layer
    pub fn color_table(&self) -> Vec<String> {
        let mut table = vec![
            self.trunk_color.clone(),
            self.topper_color.clone(),
            self.dust_color.clone(),
            self.gift_color.clone(),
        ];
        table.extend(self.palette.iter().cloned());
        table
    }

    /// Color table index of the `i`-th palette entry
    pub fn palette_color(&self, i: usize) -> u32 {
        COLOR_PALETTE_BASE + (i % self.palette.len()) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SceneConfig::default().validate().is_ok());
    }

    #[test]
    fn test_cone_radius_grows_toward_base() {
        let cone = ConeBand::default();
        assert!(cone.radius_at(-180.0).abs() < 0.001);
        assert!((cone.radius_at(120.0) - 125.0).abs() < 0.001);
        assert!(cone.radius_at(-30.0) < cone.radius_at(60.0));
    }

    #[test]
    fn test_cone_contains_band() {
        let cone = ConeBand::default();
        assert!(cone.contains(-180.0));
        assert!(cone.contains(120.0));
        assert!(!cone.contains(-181.0));
        assert!(!cone.contains(121.0));
    }

    #[test]
    fn test_from_yaml_overrides() {
        let config = SceneConfig::from_yaml(
            r#"
ornament_count: 450
dust_count: 0
topper: false
friction: 0.95
"#,
        )
        .unwrap();
        assert_eq!(config.ornament_count, 450);
        assert_eq!(config.dust_count, 0);
        assert!(!config.topper);
        assert!((config.friction - 0.95).abs() < 0.0001);
        // Untouched fields keep their defaults
        assert!((config.focal_length - 400.0).abs() < 0.0001);
    }

    #[test]
    fn test_from_yaml_rejects_garbage() {
        assert!(SceneConfig::from_yaml("ornament_count: [not a number]").is_err());
        assert!(SceneConfig::from_yaml("no_such_field: 1").is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = SceneConfig::default();
        config.palette.clear();
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.focal_length = 0.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.friction = 1.0;
        assert!(config.validate().is_err());

        let mut config = SceneConfig::default();
        config.ornament_count = -1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_tree_reaching_focal_plane() {
        let mut config = SceneConfig::default();
        config.body_cone.base_radius = 500.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_color_table_layout() {
        let config = SceneConfig::default();
        let table = config.color_table();
        assert_eq!(table[COLOR_TRUNK as usize], "#713f12");
        assert_eq!(table[COLOR_TOPPER as usize], "#fde047");
        assert_eq!(table[COLOR_DUST as usize], "#ffffff");
        assert_eq!(table[COLOR_GIFT as usize], "#e11d48");
        assert_eq!(table.len(), 4 + config.palette.len());
        assert_eq!(config.palette_color(0), COLOR_PALETTE_BASE);
    }
}

//! Screen-space hit testing for the interactive gift sprite.
//!
//! The card has exactly one tappable element, so picking reduces to a
//! circle test against the interactive primitives of the current frame.
//! When overlaps ever happen, the frontmost (largest depth) hit wins,
//! matching what the user sees on top.

use crate::scene::RenderPrimitive;

/// Find the interactive primitive under a screen point, if any.
///
/// Returns the particle id of the frontmost hit.
pub fn pick_interactive(primitives: &[RenderPrimitive], x: f32, y: f32) -> Option<u32> {
    let mut best: Option<(f32, u32)> = None;

    for p in primitives {
        if !p.interactive() {
            continue;
        }
        let dx = x - p.x;
        let dy = y - p.y;
        if dx * dx + dy * dy <= p.hit_radius * p.hit_radius {
            match best {
                Some((depth, _)) if depth >= p.depth => {}
                _ => best = Some((p.depth, p.id)),
            }
        }
    }

    best.map(|(_, id)| id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::ParticleKind;

    fn gift_primitive(id: u32, x: f32, y: f32, depth: f32, hit_radius: f32) -> RenderPrimitive {
        RenderPrimitive {
            kind: ParticleKind::Gift,
            id,
            x,
            y,
            size: hit_radius / 0.9,
            alpha: 1.0,
            spin: 0.0,
            depth,
            color: 3,
            hit_radius,
        }
    }

    fn ornament_primitive(id: u32, x: f32, y: f32) -> RenderPrimitive {
        RenderPrimitive {
            kind: ParticleKind::Ornament,
            id,
            x,
            y,
            size: 10.0,
            alpha: 0.5,
            spin: 0.0,
            depth: 0.0,
            color: 4,
            hit_radius: 0.0,
        }
    }

    #[test]
    fn test_hit_inside_radius() {
        let frame = vec![gift_primitive(7, 100.0, 100.0, 10.0, 20.0)];
        assert_eq!(pick_interactive(&frame, 105.0, 95.0), Some(7));
        // Exactly on the rim still counts
        assert_eq!(pick_interactive(&frame, 120.0, 100.0), Some(7));
    }

    #[test]
    fn test_miss_outside_radius() {
        let frame = vec![gift_primitive(7, 100.0, 100.0, 10.0, 20.0)];
        assert_eq!(pick_interactive(&frame, 130.0, 100.0), None);
        assert_eq!(pick_interactive(&frame, 0.0, 0.0), None);
    }

    #[test]
    fn test_non_interactive_never_hit() {
        let frame = vec![ornament_primitive(3, 50.0, 50.0)];
        assert_eq!(pick_interactive(&frame, 50.0, 50.0), None);
    }

    #[test]
    fn test_frontmost_hit_wins() {
        let frame = vec![
            gift_primitive(1, 100.0, 100.0, -5.0, 30.0),
            gift_primitive(2, 100.0, 100.0, 5.0, 30.0),
        ];
        assert_eq!(pick_interactive(&frame, 100.0, 100.0), Some(2));
    }

    #[test]
    fn test_empty_frame() {
        assert_eq!(pick_interactive(&[], 10.0, 10.0), None);
    }
}

//! Ground bounce response.
//!
//! The bounce splits the impact velocity into its vertical and horizontal
//! parts and scales them independently:
//!
//! - **Vertical**: reflected upward and scaled by a fixed coefficient of
//!   restitution. Court surfaces are regulated tightly enough that a single
//!   constant covers them.
//! - **Horizontal**: scaled by the configured retention ratio, the friction
//!   model. This is the knob that distinguishes a gripping clay court from a
//!   skidding grass court.
//!
//! ```text
//!      ↘ v_in                ↗ v_out
//!        \                  /     vy_out = |vy_in| * RESTITUTION
//!         \                /      vh_out = vh_in * retention
//! ═════════╳══════════════════
//! ```

use crate::types::Vec3;

/// Fraction of vertical speed preserved (sign-inverted) through the bounce.
pub const RESTITUTION: f64 = 0.7;

/// Velocity of the ball immediately after a ground bounce.
///
/// `retention` is the horizontal retention ratio from the configuration,
/// expected in [0, 1]; it is clamped so a hostile value cannot add energy.
pub fn bounce_response(impact_velocity: &Vec3, retention: f64) -> Vec3 {
    let retention = retention.clamp(0.0, 1.0);
    Vec3::new(
        impact_velocity.x * retention,
        impact_velocity.y.abs() * RESTITUTION,
        impact_velocity.z * retention,
    )
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_component_reflects_with_loss() {
        let incoming = Vec3::new(5.0, -8.0, 12.0);
        let out = bounce_response(&incoming, 1.0);

        assert!(out.y > 0.0, "Bounce must send the ball upward");
        assert!((out.y - 8.0 * RESTITUTION).abs() < 1e-12);
        assert!(
            out.y.abs() < incoming.y.abs(),
            "Restitution below 1 must lose vertical speed"
        );
    }

    #[test]
    fn test_horizontal_components_scale_with_retention() {
        let incoming = Vec3::new(4.0, -6.0, 10.0);
        let out = bounce_response(&incoming, 0.5);

        assert!((out.x - 2.0).abs() < 1e-12);
        assert!((out.z - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_retention_kills_horizontal_motion() {
        let incoming = Vec3::new(4.0, -6.0, 10.0);
        let out = bounce_response(&incoming, 0.0);

        assert_eq!(out.x, 0.0);
        assert_eq!(out.z, 0.0);
        assert!(out.y > 0.0);
    }

    #[test]
    fn test_retention_is_clamped() {
        let incoming = Vec3::new(4.0, -6.0, 10.0);
        let out = bounce_response(&incoming, 1.5);

        assert!((out.x - 4.0).abs() < 1e-12, "Retention must clamp to 1");
        assert!((out.z - 10.0).abs() < 1e-12);
    }
}

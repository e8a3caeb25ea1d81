//! Axis-aligned collision tests for the platformer sim.
//!
//! Everything here is pure geometry: given positions, sizes, and the
//! velocity that produced the current overlap, decide whether the player
//! landed on a platform, bumped its underside, or ran into a side. The
//! caller applies the actual position/velocity corrections.

use glam::Vec2;

use crate::consts::CONTACT_TOLERANCE;
use crate::level::Platform;

/// Strict AABB overlap test. Boxes that merely touch along an edge do
/// not count as overlapping.
#[inline]
pub fn aabb_overlap(a_pos: Vec2, a_size: Vec2, b_pos: Vec2, b_size: Vec2) -> bool {
    a_pos.x < b_pos.x + b_size.x
        && a_pos.x + a_size.x > b_pos.x
        && a_pos.y < b_pos.y + b_size.y
        && a_pos.y + a_size.y > b_pos.y
}

/// How an overlapping player box should be resolved against a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Falling onto the top surface. Snap to the top and zero vertical
    /// velocity.
    Land,
    /// Rising into the underside. Snap below and zero vertical velocity.
    Bump,
    /// Moving right into the left face. Push out to the left.
    WallLeft,
    /// Moving left into the right face. Push out to the right.
    WallRight,
}

/// Classifies the contact between a moving box and a platform, or `None`
/// when the boxes do not overlap at the current position.
///
/// The vertical cases reconstruct where the box was before this tick's
/// movement (`pos - vel`) and accept the surface if the relevant edge was
/// within [`CONTACT_TOLERANCE`] of it. A box moving fast enough that its
/// previous bottom edge was already well below a platform's top will fall
/// through to the side cases instead of landing.
pub fn classify_contact(pos: Vec2, size: Vec2, vel: Vec2, platform: &Platform) -> Option<Contact> {
    if !aabb_overlap(pos, size, platform.pos, platform.size) {
        return None;
    }

    if vel.y > 0.0 && pos.y + size.y - vel.y <= platform.pos.y + CONTACT_TOLERANCE {
        return Some(Contact::Land);
    }
    if vel.y < 0.0 && pos.y - vel.y >= platform.pos.y + platform.size.y - CONTACT_TOLERANCE {
        return Some(Contact::Bump);
    }
    if vel.x > 0.0 {
        return Some(Contact::WallLeft);
    }
    if vel.x < 0.0 {
        return Some(Contact::WallRight);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::PlatformKind;
    use glam::vec2;

    fn platform(x: f32, y: f32, w: f32, h: f32) -> Platform {
        Platform {
            pos: vec2(x, y),
            size: vec2(w, h),
            kind: PlatformKind::Stone,
        }
    }

    #[test]
    fn test_aabb_overlap_basic() {
        let a = vec2(0.0, 0.0);
        let size = vec2(64.0, 64.0);

        assert!(aabb_overlap(a, size, vec2(32.0, 32.0), size));
        assert!(!aabb_overlap(a, size, vec2(100.0, 0.0), size));
        assert!(!aabb_overlap(a, size, vec2(0.0, 100.0), size));
    }

    #[test]
    fn test_aabb_touching_edges_do_not_overlap() {
        let size = vec2(64.0, 64.0);

        // Right edge of a exactly at left edge of b
        assert!(!aabb_overlap(vec2(0.0, 0.0), size, vec2(64.0, 0.0), size));
        // Bottom edge of a exactly at top edge of b
        assert!(!aabb_overlap(vec2(0.0, 0.0), size, vec2(0.0, 64.0), size));
    }

    #[test]
    fn test_land_within_tolerance() {
        let plat = platform(0.0, 550.0, 300.0, 100.0);

        // Bottom edge finished 5px into the platform, was 3px above it
        // before the move. Well inside the tolerance.
        let pos = vec2(100.0, 491.0);
        let vel = vec2(0.0, 8.0);
        assert_eq!(
            classify_contact(pos, vec2(64.0, 64.0), vel, &plat),
            Some(Contact::Land)
        );
    }

    #[test]
    fn test_land_at_exact_tolerance_boundary() {
        let plat = platform(0.0, 550.0, 300.0, 100.0);

        // Previous bottom edge exactly tolerance px below the surface:
        // pos.y + 64 - vel.y == 560 == platform top + 10, still a landing.
        let pos = vec2(100.0, 516.0);
        let vel = vec2(0.0, 20.0);
        assert_eq!(
            classify_contact(pos, vec2(64.0, 64.0), vel, &plat),
            Some(Contact::Land)
        );
    }

    #[test]
    fn test_past_tolerance_is_not_a_landing() {
        let plat = platform(0.0, 550.0, 300.0, 100.0);

        // Previous bottom edge was 10.5px below the surface. Too deep to
        // count as a landing; with rightward drift it resolves as a wall.
        let pos = vec2(100.0, 516.5);
        let vel = vec2(2.0, 20.0);
        assert_eq!(
            classify_contact(pos, vec2(64.0, 64.0), vel, &plat),
            Some(Contact::WallLeft)
        );
    }

    #[test]
    fn test_bump_from_below() {
        let plat = platform(0.0, 300.0, 300.0, 35.0);

        // Rising into the underside (platform bottom = 335).
        let pos = vec2(100.0, 330.0);
        let vel = vec2(0.0, -9.0);
        assert_eq!(
            classify_contact(pos, vec2(64.0, 64.0), vel, &plat),
            Some(Contact::Bump)
        );
    }

    #[test]
    fn test_side_contacts() {
        let plat = platform(200.0, 400.0, 100.0, 35.0);
        let size = vec2(64.0, 64.0);

        // Horizontal approach, no vertical motion.
        let from_left = classify_contact(vec2(150.0, 390.0), size, vec2(4.0, 0.0), &plat);
        assert_eq!(from_left, Some(Contact::WallLeft));

        let from_right = classify_contact(vec2(290.0, 390.0), size, vec2(-4.0, 0.0), &plat);
        assert_eq!(from_right, Some(Contact::WallRight));
    }

    #[test]
    fn test_no_overlap_means_no_contact() {
        let plat = platform(0.0, 550.0, 300.0, 100.0);

        // Fast fall that ends fully past the platform: the swept path is
        // never examined, so nothing registers.
        let pos = vec2(100.0, 700.0);
        let vel = vec2(0.0, 200.0);
        assert_eq!(classify_contact(pos, vec2(64.0, 64.0), vel, &plat), None);
    }

    #[test]
    fn test_stationary_overlap_has_no_contact() {
        let plat = platform(0.0, 550.0, 300.0, 100.0);

        // Deep overlap with zero velocity resolves to nothing.
        let pos = vec2(100.0, 540.0);
        assert_eq!(
            classify_contact(pos, vec2(64.0, 64.0), Vec2::ZERO, &plat),
            None
        );
    }
}

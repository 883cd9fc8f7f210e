/// Play-area vector in pixels. +x points right, +y points down, so enemies
/// descend toward the bottom edge and "up" for the player is -y.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

/// Unit vector for an angle in radians. Angle 0 points along +x and
/// `FRAC_PI_2` points straight down.
pub(crate) fn unit_from_angle(radians: f32) -> Vec2 {
    Vec2 {
        x: radians.cos(),
        y: radians.sin(),
    }
}

/// Angle of the `from -> to` direction in radians.
pub(crate) fn bearing(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

pub(crate) fn distance_sq(a: Vec2, b: Vec2) -> f32 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use super::{bearing, distance_sq, unit_from_angle, Vec2};

    #[test]
    fn unit_vectors_follow_screen_convention() {
        let right = unit_from_angle(0.0);
        assert!((right.x - 1.0).abs() < 1e-6);
        assert!(right.y.abs() < 1e-6);

        let down = unit_from_angle(FRAC_PI_2);
        assert!(down.x.abs() < 1e-6);
        assert!((down.y - 1.0).abs() < 1e-6);

        let up = unit_from_angle(-FRAC_PI_2);
        assert!((up.y + 1.0).abs() < 1e-6);
    }

    #[test]
    fn bearing_points_from_source_to_target() {
        let from = Vec2 { x: 10.0, y: 10.0 };
        let below = Vec2 { x: 10.0, y: 50.0 };
        assert!((bearing(from, below) - FRAC_PI_2).abs() < 1e-6);

        let left = Vec2 { x: -30.0, y: 10.0 };
        assert!((bearing(from, left).abs() - std::f32::consts::PI).abs() < 1e-6);
    }

    #[test]
    fn distance_sq_is_squared_euclidean() {
        let a = Vec2 { x: 0.0, y: 0.0 };
        let b = Vec2 { x: 3.0, y: 4.0 };
        assert!((distance_sq(a, b) - 25.0).abs() < 1e-6);
    }
}

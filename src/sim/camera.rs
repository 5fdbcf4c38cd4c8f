//! Camera follow
//!
//! Horizontally the camera is locked to the player so the course scrolls at a
//! constant rate; vertically it eases toward the player and stays inside a bounded
//! offset range.

use super::state::{Player, Viewport};
use crate::consts::{CAMERA_IDEAL_Y, CAMERA_LEAD, CAMERA_MAX_Y, CAMERA_MIN_Y, CAMERA_SMOOTHING};

/// View offset into the world
///
/// Screen position of a world point is `(world_x - x, world_y + y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Camera {
    pub x: f32,
    pub y: f32,
}

impl Camera {
    /// Vertical offset the camera is easing toward
    pub fn target_y(player: &Player, viewport: &Viewport) -> f32 {
        let ideal = viewport.height * CAMERA_IDEAL_Y;
        (ideal - player.center_y()).clamp(CAMERA_MIN_Y, CAMERA_MAX_Y)
    }

    /// Advance one frame
    pub fn follow(&mut self, player: &Player, viewport: &Viewport) {
        self.x = player.x - viewport.width * CAMERA_LEAD;
        let target = Self::target_y(player, viewport);
        self.y += (target - self.y) * CAMERA_SMOOTHING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_x_is_hard_locked() {
        let mut cam = Camera::default();
        let viewport = Viewport::new(1000.0, 700.0);
        let player = Player {
            x: 5000.0,
            ..Default::default()
        };
        cam.follow(&player, &viewport);
        assert_eq!(cam.x, 4750.0);
    }

    #[test]
    fn test_y_eases_toward_target() {
        let mut cam = Camera::default();
        let viewport = Viewport::new(1000.0, 700.0);
        // Player center at 320 -> target 420 - 320 = 100
        let player = Player {
            y: 300.0,
            ..Default::default()
        };
        cam.follow(&player, &viewport);
        assert!((cam.y - 10.0).abs() < 1e-4);
        for _ in 0..200 {
            cam.follow(&player, &viewport);
        }
        assert!((cam.y - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_target_is_clamped() {
        let viewport = Viewport::new(1000.0, 700.0);
        let high = Player {
            y: -2000.0,
            ..Default::default()
        };
        assert_eq!(Camera::target_y(&high, &viewport), CAMERA_MAX_Y);

        let low = Player {
            y: 2000.0,
            ..Default::default()
        };
        assert_eq!(Camera::target_y(&low, &viewport), CAMERA_MIN_Y);
    }
}

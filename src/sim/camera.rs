//! Camera that follows the player
//!
//! The offset is the world position of the viewport's bottom-left corner.

use glam::Vec2;

use crate::lerp_vec;

#[derive(Debug, Clone)]
pub struct Camera {
    pub offset: Vec2,
    pub half_viewport: Vec2,
}

impl Camera {
    pub fn new(half_viewport: Vec2) -> Self {
        Self {
            offset: Vec2::ZERO,
            half_viewport,
        }
    }

    /// Offset that centers the viewport on `focus`
    #[inline]
    pub fn target_for(&self, focus: Vec2) -> Vec2 {
        focus - self.half_viewport
    }

    /// Jump straight to `focus` (level load)
    pub fn snap(&mut self, focus: Vec2) {
        self.offset = self.target_for(focus);
    }

    /// Close `smoothing` of the remaining distance to `focus`
    pub fn track(&mut self, focus: Vec2, smoothing: f32) {
        let target = self.target_for(focus);
        self.offset = lerp_vec(self.offset, target, smoothing.clamp(0.0, 1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_snap_centers_player() {
        let mut cam = Camera::new(Vec2::new(480.0, 320.0));
        cam.snap(Vec2::new(80.0, 80.0));
        assert_eq!(cam.offset, Vec2::new(-400.0, -240.0));
        assert_eq!(Vec2::new(80.0, 80.0) - cam.offset, Vec2::new(480.0, 320.0));
    }

    #[test]
    fn test_track_moves_partway() {
        let mut cam = Camera::new(Vec2::ZERO);
        cam.track(Vec2::new(100.0, 0.0), 0.25);
        assert_eq!(cam.offset, Vec2::new(25.0, 0.0));
        cam.track(Vec2::new(100.0, 0.0), 0.25);
        assert!((cam.offset.x - 43.75).abs() < 1e-4);
    }

    proptest! {
        #[test]
        fn prop_track_never_overshoots(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let mut cam = Camera::new(Vec2::new(480.0, 320.0));
            let focus = Vec2::new(x, y);
            let target = cam.target_for(focus);
            let mut last = (cam.offset - target).length();
            for _ in 0..30 {
                cam.track(focus, 0.25);
                let dist = (cam.offset - target).length();
                prop_assert!(dist <= last + 1e-3);
                last = dist;
            }
        }
    }
}

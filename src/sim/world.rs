//! Playfield dimensions and the legal range for a sprite's centre

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::tuning::Tuning;

/// Axis-aligned box a sprite's centre may occupy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

/// The playfield. Dimensions never change after construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct World {
    width: f32,
    height: f32,
    /// Present only for the pseudo-3D variant
    depth: Option<f32>,
}

impl World {
    /// Flat 2D world
    pub fn new(width: f32, height: f32) -> Result<Self, SimError> {
        Self::build(width, height, None)
    }

    /// World with a depth axis the ball can bounce along
    pub fn with_depth(width: f32, height: f32, depth: f32) -> Result<Self, SimError> {
        Self::build(width, height, Some(depth))
    }

    /// World of the given size whose depth axis follows `tuning.depth`
    pub fn for_tuning(width: f32, height: f32, tuning: &Tuning) -> Result<Self, SimError> {
        Self::build(width, height, tuning.depth)
    }

    fn build(width: f32, height: f32, depth: Option<f32>) -> Result<Self, SimError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(width) || !positive(height) || depth.is_some_and(|d| !positive(d)) {
            return Err(SimError::InvalidWorld {
                width,
                height,
                depth,
            });
        }
        Ok(Self {
            width,
            height,
            depth,
        })
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn depth(&self) -> Option<f32> {
        self.depth
    }

    pub fn is_3d(&self) -> bool {
        self.depth.is_some()
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Legal range for the centre of a sprite of the given size.
    ///
    /// Degenerates to a single point on an axis where the sprite is exactly
    /// as large as the world. The z range is `[0, depth]`, or `[0, 0]` when
    /// the world is flat.
    pub fn bounds(&self, size: Vec2) -> Bounds {
        let half = size / 2.0;
        Bounds {
            min: Vec3::new(half.x, half.y, 0.0),
            max: Vec3::new(
                self.width - half.x,
                self.height - half.y,
                self.depth.unwrap_or(0.0),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bounds_2d() {
        let world = World::new(800.0, 600.0).unwrap();
        let b = world.bounds(Vec2::new(40.0, 30.0));
        assert_eq!(b.min, Vec3::new(20.0, 15.0, 0.0));
        assert_eq!(b.max, Vec3::new(780.0, 585.0, 0.0));
    }

    #[test]
    fn test_bounds_3d_depth_range() {
        let world = World::with_depth(800.0, 600.0, 120.0).unwrap();
        let b = world.bounds(Vec2::splat(40.0));
        assert_eq!(b.min.z, 0.0);
        assert_eq!(b.max.z, 120.0);
    }

    #[test]
    fn test_bounds_degenerate_when_sprite_fills_world() {
        let world = World::new(100.0, 50.0).unwrap();
        let b = world.bounds(Vec2::new(100.0, 50.0));
        assert_eq!(b.min.x, b.max.x);
        assert_eq!(b.min.y, b.max.y);
        assert_eq!(b.min, Vec3::new(50.0, 25.0, 0.0));
    }

    #[test]
    fn test_for_tuning_follows_tuning_depth() {
        let flat = World::for_tuning(800.0, 600.0, &Tuning::default()).unwrap();
        assert!(!flat.is_3d());

        let tuning = Tuning {
            depth: Some(75.0),
            ..Tuning::default()
        };
        let deep = World::for_tuning(800.0, 600.0, &tuning).unwrap();
        assert_eq!(deep.depth(), Some(75.0));
    }

    #[test]
    fn test_invalid_world_rejected() {
        assert!(World::new(0.0, 600.0).is_err());
        assert!(World::new(800.0, -1.0).is_err());
        assert!(World::new(f32::NAN, 600.0).is_err());
        assert!(matches!(
            World::with_depth(800.0, 600.0, 0.0),
            Err(SimError::InvalidWorld { depth: Some(_), .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_bounds_inset_by_half_size(
            w in 1.0f32..4000.0,
            h in 1.0f32..4000.0,
            sw in 0.0f32..1.0,
            sh in 0.0f32..1.0,
        ) {
            let world = World::new(w, h).unwrap();
            let size = Vec2::new(sw * w, sh * h);
            let b = world.bounds(size);
            prop_assert_eq!(b.min.x, size.x / 2.0);
            prop_assert_eq!(b.max.x, w - size.x / 2.0);
            prop_assert_eq!(b.min.y, size.y / 2.0);
            prop_assert_eq!(b.max.y, h - size.y / 2.0);
        }
    }
}

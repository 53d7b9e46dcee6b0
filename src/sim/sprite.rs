//! Positioned, moving rectangles and the box overlap test
//!
//! A sprite doesn't own its image. It carries an [`AssetId`] the renderer
//! resolves, plus the size it was given when created.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Which image a sprite is drawn with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetId {
    Ball,
    Goal,
    Hole,
}

impl AssetId {
    /// File the browser build loads for this asset
    pub fn file_name(&self) -> &'static str {
        match self {
            AssetId::Ball => "ball.png",
            AssetId::Goal => "goal.png",
            AssetId::Hole => "hole.png",
        }
    }
}

/// Anything with an intrinsic pixel size that a surface can draw
pub trait Drawable {
    fn intrinsic_size(&self) -> Vec2;
}

impl Drawable for Vec2 {
    fn intrinsic_size(&self) -> Vec2 {
        *self
    }
}

/// A ball, goal or hole
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sprite {
    pub asset: AssetId,
    /// Width and height, fixed at creation
    pub size: Vec2,
    /// Centre position; z stays 0 in a flat world
    pub pos: Vec3,
    /// Distance moved per tick
    pub vel: Vec3,
    /// Extra draw scale per unit of z (0 = never scaled)
    pub depth_scale: f32,
}

impl Sprite {
    pub fn new(asset: AssetId, size: Vec2) -> Self {
        Self {
            asset,
            size,
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            depth_scale: 0.0,
        }
    }

    pub fn with_depth_scale(mut self, depth_scale: f32) -> Self {
        self.depth_scale = depth_scale;
        self
    }

    /// Move to a spot on the surface and come to rest
    pub fn place(&mut self, at: Vec2) {
        self.pos = at.extend(0.0);
        self.vel = Vec3::ZERO;
    }

    pub fn half_size(&self) -> Vec2 {
        self.size / 2.0
    }

    /// On-screen size once depth scaling is applied
    pub fn draw_size(&self) -> Vec2 {
        self.size * (1.0 + self.pos.z * self.depth_scale)
    }

    /// Box overlap test with adjustable slack.
    ///
    /// Each axis compares the centre distance against the mean half extent of
    /// the two sprites plus `delta`. A positive delta widens the hitbox, a
    /// negative one means the sprites must overlap deeply before this reports
    /// a hit. Depth only matches on the exact same z, so a ball in the air
    /// passes over holes.
    pub fn collides(&self, other: &Sprite, delta: f32) -> bool {
        let half = (self.size + other.size) / 4.0;
        let dist = (self.pos - other.pos).abs();
        dist.x < half.x + delta && dist.y < half.y + delta && self.pos.z == other.pos.z
    }
}

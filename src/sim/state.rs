//! Game state and the simulation context
//!
//! Everything one level needs lives in [`Maze`], which the run loop owns and
//! hands to update, draw and reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::error::SimError;
use super::layout;
use super::sprite::{AssetId, Sprite};
use super::world::World;
use crate::tuning::Tuning;

/// Where the current level stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    /// Ball is live
    #[default]
    Playing,
    /// Ball reached the goal
    Won,
    /// Ball fell into a hole
    Lost,
}

impl Outcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::Playing)
    }

    /// Banner shown once the level is over
    pub fn message(&self) -> Option<&'static str> {
        match self {
            Outcome::Playing => None,
            Outcome::Won => Some("YOU WIN!"),
            Outcome::Lost => Some("GAME OVER"),
        }
    }
}

/// Image sizes for the three sprite kinds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteSizes {
    pub ball: Vec2,
    pub goal: Vec2,
    pub hole: Vec2,
}

impl Default for SpriteSizes {
    fn default() -> Self {
        Self {
            ball: Vec2::splat(crate::consts::BALL_SIZE),
            goal: Vec2::splat(crate::consts::GOAL_SIZE),
            hole: Vec2::splat(crate::consts::HOLE_SIZE),
        }
    }
}

/// The simulation context: world, sprites, outcome and RNG
#[derive(Debug, Clone)]
pub struct Maze {
    pub world: World,
    pub tuning: Tuning,
    pub ball: Sprite,
    pub goal: Sprite,
    pub hazards: Vec<Sprite>,
    pub outcome: Outcome,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Levels generated so far (1 after construction)
    pub level: u32,
    /// Update steps run on the current level
    pub level_ticks: u64,
    rng: Pcg32,
}

impl Maze {
    /// Build sprites and lay out the first level.
    ///
    /// `tuning.depth` decides the variant; the world must agree with it.
    pub fn new(
        world: World,
        tuning: Tuning,
        sizes: SpriteSizes,
        seed: u64,
    ) -> Result<Self, SimError> {
        if world.depth() != tuning.depth {
            return Err(SimError::DepthMismatch {
                world: world.depth(),
                tuning: tuning.depth,
            });
        }
        let mut maze = Self {
            world,
            ball: Sprite::new(AssetId::Ball, sizes.ball).with_depth_scale(tuning.depth_scale),
            goal: Sprite::new(AssetId::Goal, sizes.goal),
            hazards: vec![Sprite::new(AssetId::Hole, sizes.hole); tuning.hazard_count],
            tuning,
            outcome: Outcome::Playing,
            seed,
            level: 0,
            level_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
        };
        maze.start_level()?;
        Ok(maze)
    }

    /// Ball back to the centre at rest, fresh goal and holes.
    ///
    /// If the generator gives up, the previous layout is kept: it was
    /// separated from the ball's start before, and the start never moves.
    pub fn reset(&mut self) {
        let previous = (self.goal.clone(), self.hazards.clone());
        if let Err(err) = self.start_level() {
            log::warn!("{}; replaying previous layout", err);
            (self.goal, self.hazards) = previous;
            self.outcome = Outcome::Playing;
        }
    }

    fn start_level(&mut self) -> Result<(), SimError> {
        self.outcome = Outcome::Playing;
        self.level_ticks = 0;
        self.ball.place(self.world.center());

        let attempts = layout::generate(
            &mut self.rng,
            &self.world,
            self.tuning.edge_padding,
            self.tuning.max_layout_attempts,
            &self.ball,
            &mut self.goal,
            &mut self.hazards,
        )?;
        self.level += 1;
        log::info!(
            "Level {} ready ({} holes, {} layout attempts)",
            self.level,
            self.hazards.len(),
            attempts
        );
        Ok(())
    }

    /// All sprites back to front: holes, goal, ball
    pub fn sprites(&self) -> impl Iterator<Item = &Sprite> {
        self.hazards
            .iter()
            .chain(std::iter::once(&self.goal))
            .chain(std::iter::once(&self.ball))
    }
}

//! Tilt Maze - roll a ball to the goal without falling into a hole
//!
//! Core modules:
//! - `sim`: Deterministic simulation (bounds, collisions, layout, game state)
//! - `renderer`: 2D canvas rendering behind a surface trait
//! - `input`: Keyboard, touch and tilt mapped to control input
//! - `tuning`: Data-driven game balance

pub mod input;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use sim::{ControlInput, Maze, Outcome, World};
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (one animation frame at 60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Sprite sizes used when no images are loaded (headless runs)
    pub const BALL_SIZE: f32 = 40.0;
    pub const GOAL_SIZE: f32 = 50.0;
    pub const HOLE_SIZE: f32 = 50.0;
}

//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay platform-free:
//! - Per-frame integration only, no wall-clock reads
//! - Seeded RNG only
//! - Deferred work goes through a [`Scheduler`]
//! - No rendering or input dependencies

pub mod error;
pub mod layout;
pub mod schedule;
pub mod sprite;
pub mod state;
pub mod tick;
pub mod world;

pub use error::SimError;
pub use schedule::{ImmediateScheduler, Scheduler, Task, TimerQueue};
pub use sprite::{AssetId, Drawable, Sprite};
pub use state::{Maze, Outcome, SpriteSizes};
pub use tick::{ControlInput, tick};
pub use world::{Bounds, World};

//! Simulation construction errors
//!
//! The per-frame update cannot fail; these only surface when a world or a
//! level layout is built.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// A world dimension was zero, negative or not finite
    InvalidWorld {
        width: f32,
        height: f32,
        depth: Option<f32>,
    },
    /// The placement range `[padding, dim - padding]` is empty on some axis
    WorldTooSmall { width: f32, height: f32, padding: f32 },
    /// The capped layout generator never found a non-overlapping layout
    LayoutExhausted { attempts: u32 },
    /// The world's depth axis disagrees with the tuning's `depth`
    DepthMismatch {
        world: Option<f32>,
        tuning: Option<f32>,
    },
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidWorld {
                width,
                height,
                depth: Some(depth),
            } => write!(f, "invalid world {width}x{height}x{depth}: dimensions must be positive"),
            Self::InvalidWorld { width, height, .. } => {
                write!(f, "invalid world {width}x{height}: dimensions must be positive")
            }
            Self::WorldTooSmall {
                width,
                height,
                padding,
            } => write!(
                f,
                "world {width}x{height} leaves no room for placement with padding {padding}"
            ),
            Self::LayoutExhausted { attempts } => {
                write!(f, "no overlap-free layout found after {attempts} attempts")
            }
            Self::DepthMismatch { world, tuning } => write!(
                f,
                "world depth {world:?} does not match tuning depth {tuning:?}"
            ),
        }
    }
}

impl std::error::Error for SimError {}

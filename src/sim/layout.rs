//! Random level layout
//!
//! Goal and holes are dropped anywhere away from the edges; if any two
//! sprites (ball start included) end up too close, the whole layout is thrown
//! away and rolled again.

use glam::Vec2;
use rand::Rng;

use super::error::SimError;
use super::sprite::Sprite;
use super::world::World;

/// Uniform point in `[padding, dim - padding]` on both axes
fn random_spot(rng: &mut impl Rng, world: &World, padding: f32) -> Vec2 {
    Vec2::new(
        padding + rng.random::<f32>() * (world.width() - padding * 2.0),
        padding + rng.random::<f32>() * (world.height() - padding * 2.0),
    )
}

/// True when no pair of sprites overlaps under the widened test
pub fn is_separated(sprites: &[&Sprite], delta: f32) -> bool {
    for i in 1..sprites.len() {
        for j in 0..i {
            if sprites[i].collides(sprites[j], delta) {
                return false;
            }
        }
    }
    true
}

/// Scatter `goal` and `hazards` so nothing overlaps within `padding * 2`.
///
/// `ball` is treated as a fixed obstacle at its current position. Returns
/// the number of attempts used. With `max_attempts == None` this keeps
/// rolling until it succeeds, which for a crowded world may be forever.
/// On error the sprites hold the last rejected placement.
pub fn generate(
    rng: &mut impl Rng,
    world: &World,
    padding: f32,
    max_attempts: Option<u32>,
    ball: &Sprite,
    goal: &mut Sprite,
    hazards: &mut [Sprite],
) -> Result<u32, SimError> {
    if world.width() < padding * 2.0 || world.height() < padding * 2.0 {
        return Err(SimError::WorldTooSmall {
            width: world.width(),
            height: world.height(),
            padding,
        });
    }

    let mut attempts = 0u32;
    loop {
        if max_attempts.is_some_and(|max| attempts >= max) {
            return Err(SimError::LayoutExhausted { attempts });
        }
        attempts += 1;

        goal.place(random_spot(rng, world, padding));
        for hazard in hazards.iter_mut() {
            hazard.place(random_spot(rng, world, padding));
        }

        let mut sprites = Vec::with_capacity(hazards.len() + 2);
        sprites.push(ball);
        sprites.push(&*goal);
        sprites.extend(hazards.iter());

        if is_separated(&sprites, padding * 2.0) {
            if attempts > 1 {
                log::debug!("Layout settled after {} attempts", attempts);
            }
            return Ok(attempts);
        }
    }
}

//! Platform input mapped onto [`ControlInput`]
//!
//! These take plain values (key codes, angles, positions) so they work the
//! same in the browser glue and in tests.

use glam::Vec2;

use crate::sim::ControlInput;
use crate::tuning::Tuning;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Jump,
}

impl Key {
    /// Map a `KeyboardEvent.code` value
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "ArrowUp" => Some(Key::Up),
            "ArrowDown" => Some(Key::Down),
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            "Space" => Some(Key::Jump),
            _ => None,
        }
    }
}

/// Handle key down. Returns true if the key was used.
pub fn key_down(code: &str, input: &mut ControlInput, tuning: &Tuning) -> bool {
    let speed = tuning.key_speed;
    match Key::from_code(code) {
        Some(Key::Up) => input.veloc_y = Some(-speed),
        Some(Key::Down) => input.veloc_y = Some(speed),
        Some(Key::Left) => input.veloc_x = Some(-speed),
        Some(Key::Right) => input.veloc_x = Some(speed),
        Some(Key::Jump) => input.jump = true,
        None => return false,
    }
    true
}

/// Handle key up: releasing either key on an axis stops that axis
pub fn key_up(code: &str, input: &mut ControlInput) -> bool {
    match Key::from_code(code) {
        Some(Key::Up | Key::Down) => input.veloc_y = Some(0.0),
        Some(Key::Left | Key::Right) => input.veloc_x = Some(0.0),
        Some(Key::Jump) | None => return false,
    }
    true
}

/// Device tilt in degrees. `gamma` is left/right, `beta` front/back.
/// Browsers report `null` for sensors they lack; those axes are left alone.
pub fn orientation(
    beta: Option<f64>,
    gamma: Option<f64>,
    input: &mut ControlInput,
    tuning: &Tuning,
) {
    if let Some(gamma) = gamma {
        input.veloc_x = Some(gamma as f32 / tuning.tilt_divisor);
    }
    if let Some(beta) = beta {
        input.veloc_y = Some(beta as f32 / tuning.tilt_divisor);
    }
}

/// A new finger on the screen jumps
pub fn touch_start(input: &mut ControlInput) {
    input.jump = true;
}

/// Roll towards the finger at key speed
pub fn touch_steer(touch: Vec2, ball: Vec2, input: &mut ControlInput, tuning: &Tuning) {
    let dir = (touch - ball).normalize_or_zero() * tuning.key_speed;
    input.veloc_x = Some(dir.x);
    input.veloc_y = Some(dir.y);
}

/// Finger lifted: stop steering
pub fn touch_end(input: &mut ControlInput) {
    input.veloc_x = Some(0.0);
    input.veloc_y = Some(0.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrow_keys_set_velocity() {
        let tuning = Tuning::default();
        let mut input = ControlInput::default();
        assert!(key_down("ArrowUp", &mut input, &tuning));
        assert!(key_down("ArrowRight", &mut input, &tuning));
        assert_eq!(input.veloc_y, Some(-5.0));
        assert_eq!(input.veloc_x, Some(5.0));

        assert!(key_down("ArrowDown", &mut input, &tuning));
        assert!(key_down("ArrowLeft", &mut input, &tuning));
        assert_eq!(input.veloc_y, Some(5.0));
        assert_eq!(input.veloc_x, Some(-5.0));
    }

    #[test]
    fn test_key_up_zeroes_axis() {
        let tuning = Tuning::default();
        let mut input = ControlInput::default();
        key_down("ArrowLeft", &mut input, &tuning);
        assert!(key_up("ArrowRight", &mut input));
        assert_eq!(input.veloc_x, Some(0.0));
        assert_eq!(input.veloc_y, None);
        assert!(key_up("ArrowUp", &mut input));
        assert_eq!(input.veloc_y, Some(0.0));
    }

    #[test]
    fn test_unknown_keys_ignored() {
        let tuning = Tuning::default();
        let mut input = ControlInput::default();
        assert!(!key_down("KeyQ", &mut input, &tuning));
        assert!(!key_up("Space", &mut input));
        assert_eq!(input, ControlInput::default());
    }

    #[test]
    fn test_space_jumps() {
        let tuning = Tuning::default();
        let mut input = ControlInput::default();
        assert!(key_down("Space", &mut input, &tuning));
        assert!(input.jump);
    }

    #[test]
    fn test_orientation_halves_angles() {
        let tuning = Tuning::default();
        let mut input = ControlInput::default();
        orientation(Some(30.0), Some(-12.0), &mut input, &tuning);
        assert_eq!(input.veloc_x, Some(-6.0));
        assert_eq!(input.veloc_y, Some(15.0));

        orientation(None, None, &mut input, &tuning);
        assert_eq!(input.veloc_x, Some(-6.0));
    }

    #[test]
    fn test_touch_steer_points_at_finger() {
        let tuning = Tuning::default();
        let mut input = ControlInput::default();
        touch_steer(Vec2::new(100.0, 0.0), Vec2::new(0.0, 0.0), &mut input, &tuning);
        assert_eq!(input.veloc_x, Some(5.0));
        assert_eq!(input.veloc_y, Some(0.0));

        // Finger right on the ball: no direction
        touch_steer(Vec2::ONE, Vec2::ONE, &mut input, &tuning);
        assert_eq!(input.veloc_x, Some(0.0));

        touch_start(&mut input);
        assert!(input.jump);
        touch_end(&mut input);
        assert_eq!(input.veloc_y, Some(0.0));
    }
}

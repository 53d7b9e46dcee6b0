//! Per-frame simulation step
//!
//! Moves the ball, stops it at the walls, bounces it off the far end of the
//! depth axis and checks the goal and holes.

use super::schedule::Scheduler;
use super::state::{Maze, Outcome};

/// Control writes gathered since the last tick.
///
/// Input handlers only record what they want; [`tick`] applies it. A `None`
/// axis leaves the ball's current velocity alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ControlInput {
    /// Horizontal velocity to set
    pub veloc_x: Option<f32>,
    /// Vertical (screen) velocity to set
    pub veloc_y: Option<f32>,
    /// Jump requested (depth variant only)
    pub jump: bool,
}

impl ControlInput {
    /// Forget everything once a tick has consumed it
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Advance the maze by one frame
pub fn tick(maze: &mut Maze, input: &ControlInput, scheduler: &mut dyn Scheduler) {
    // Frozen until the scheduled reset fires
    if maze.outcome.is_terminal() {
        return;
    }
    maze.level_ticks += 1;

    let ball = &mut maze.ball;
    if let Some(vx) = input.veloc_x {
        ball.vel.x = vx;
    }
    if let Some(vy) = input.veloc_y {
        ball.vel.y = vy;
    }
    // Jumps only launch from rest
    if input.jump && maze.world.is_3d() && ball.vel.z == 0.0 {
        ball.vel.z = maze.tuning.jump_speed;
    }

    let bounds = maze.world.bounds(ball.size);

    // Walls stop the ball dead
    ball.pos.x += ball.vel.x;
    if ball.pos.x < bounds.min.x {
        ball.pos.x = bounds.min.x;
        ball.vel.x = 0.0;
    }
    if ball.pos.x > bounds.max.x {
        ball.pos.x = bounds.max.x;
        ball.vel.x = 0.0;
    }

    ball.pos.y += ball.vel.y;
    if ball.pos.y < bounds.min.y {
        ball.pos.y = bounds.min.y;
        ball.vel.y = 0.0;
    }
    if ball.pos.y > bounds.max.y {
        ball.pos.y = bounds.max.y;
        ball.vel.y = 0.0;
    }

    // Depth: the surface stops the ball, the far end bounces it back
    if maze.world.is_3d() {
        ball.pos.z += ball.vel.z;
        if ball.pos.z < bounds.min.z {
            ball.pos.z = bounds.min.z;
            ball.vel.z = 0.0;
        }
        if ball.pos.z > bounds.max.z {
            ball.pos.z = bounds.max.z;
            ball.vel.z = -ball.vel.z;
        }
    }

    let delta = maze.tuning.target_delta;
    if maze.ball.collides(&maze.goal, delta) {
        maze.outcome = Outcome::Won;
    }
    // Holes are checked last, so landing on both counts as a loss
    if maze.hazards.iter().any(|hole| maze.ball.collides(hole, delta)) {
        maze.outcome = Outcome::Lost;
    }

    if maze.outcome.is_terminal() {
        log::info!(
            "Level {} over after {} ticks: {:?}",
            maze.level,
            maze.level_ticks,
            maze.outcome
        );
        scheduler.schedule(Box::new(Maze::reset), maze.tuning.reset_delay_secs);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{ImmediateScheduler, SpriteSizes, World};
    use crate::tuning::Tuning;
    use glam::{Vec2, Vec3};

    fn maze_2d() -> Maze {
        let world = World::new(800.0, 600.0).unwrap();
        Maze::new(world, Tuning::default(), SpriteSizes::default(), 12345).unwrap()
    }

    fn maze_3d(depth: f32) -> Maze {
        let world = World::with_depth(800.0, 600.0, depth).unwrap();
        let tuning = Tuning {
            depth: Some(depth),
            ..Tuning::default()
        };
        Maze::new(world, tuning, SpriteSizes::default(), 12345).unwrap()
    }

    /// Push goal and holes into a corner well away from the ball
    fn clear_field(maze: &mut Maze) {
        maze.goal.place(Vec2::new(760.0, 40.0));
        for hole in &mut maze.hazards {
            hole.place(Vec2::new(40.0, 560.0));
        }
    }

    #[test]
    fn test_velocity_integrates_position() {
        let mut maze = maze_2d();
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        let input = ControlInput {
            veloc_x: Some(5.0),
            veloc_y: Some(-3.0),
            jump: false,
        };
        tick(&mut maze, &input, &mut sched);
        assert_eq!(maze.ball.pos, Vec3::new(405.0, 297.0, 0.0));

        // Velocity persists without new writes
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.ball.pos, Vec3::new(410.0, 294.0, 0.0));
        assert_eq!(maze.level_ticks, 2);
    }

    #[test]
    fn test_clamp_and_stop_at_walls() {
        let mut maze = maze_2d();
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        let half = maze.ball.half_size();

        maze.ball.pos = Vec3::new(900.0, -50.0, 0.0);
        maze.ball.vel = Vec3::new(7.0, -4.0, 0.0);
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.ball.pos.x, 800.0 - half.x);
        assert_eq!(maze.ball.pos.y, half.y);
        assert_eq!(maze.ball.vel.x, 0.0);
        assert_eq!(maze.ball.vel.y, 0.0);

        maze.ball.pos = Vec3::new(half.x + 1.0, 300.0, 0.0);
        maze.ball.vel = Vec3::new(-10.0, 0.0, 0.0);
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.ball.pos.x, half.x);
        assert_eq!(maze.ball.vel.x, 0.0);
    }

    #[test]
    fn test_far_depth_bounces_elastically() {
        let mut maze = maze_3d(100.0);
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        maze.ball.pos.z = 104.0;
        maze.ball.vel.z = 6.0;
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.ball.pos.z, 100.0);
        assert_eq!(maze.ball.vel.z, -6.0);
    }

    #[test]
    fn test_surface_stops_falling_ball() {
        let mut maze = maze_3d(100.0);
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        maze.ball.pos.z = 3.0;
        maze.ball.vel.z = -8.0;
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.ball.pos.z, 0.0);
        assert_eq!(maze.ball.vel.z, 0.0);
    }

    #[test]
    fn test_jump_round_trip() {
        let mut maze = maze_3d(40.0);
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        let jump = ControlInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut maze, &jump, &mut sched);
        assert_eq!(maze.ball.pos.z, 8.0);
        assert_eq!(maze.ball.vel.z, 8.0);

        // Jumping again mid-air changes nothing
        tick(&mut maze, &jump, &mut sched);
        assert_eq!(maze.ball.vel.z, 8.0);

        for _ in 0..20 {
            tick(&mut maze, &ControlInput::default(), &mut sched);
        }
        assert_eq!(maze.ball.pos.z, 0.0);
        assert_eq!(maze.ball.vel.z, 0.0);
    }

    #[test]
    fn test_jump_ignored_in_flat_world() {
        let mut maze = maze_2d();
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        let jump = ControlInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut maze, &jump, &mut sched);
        assert_eq!(maze.ball.pos.z, 0.0);
        assert_eq!(maze.ball.vel.z, 0.0);
    }

    #[test]
    fn test_airborne_ball_passes_over_hole() {
        let mut maze = maze_3d(100.0);
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        maze.hazards[0].place(Vec2::new(400.0, 300.0));
        maze.ball.pos.z = 50.0;
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.outcome, Outcome::Playing);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_reaching_goal_wins_and_schedules_reset() {
        let mut maze = maze_2d();
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        maze.goal.place(Vec2::new(410.0, 305.0));
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.outcome, Outcome::Playing);

        maze.goal.place(Vec2::new(402.0, 300.0));
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.outcome, Outcome::Won);
        assert_eq!(sched.len(), 1);

        sched.run_pending(&mut maze);
        assert_eq!(maze.outcome, Outcome::Playing);
        assert_eq!(maze.level, 2);
    }

    #[test]
    fn test_hole_beats_goal_in_same_frame() {
        let mut maze = maze_2d();
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        maze.goal.place(Vec2::new(401.0, 300.0));
        maze.hazards[0].place(Vec2::new(399.0, 300.0));
        maze.hazards[1].place(Vec2::new(400.0, 301.0));
        tick(&mut maze, &ControlInput::default(), &mut sched);
        assert_eq!(maze.outcome, Outcome::Lost);
        // One reset per terminal transition
        assert_eq!(sched.len(), 1);
    }

    #[test]
    fn test_terminal_state_freezes_simulation() {
        let mut maze = maze_2d();
        clear_field(&mut maze);
        let mut sched = ImmediateScheduler::new();
        maze.outcome = Outcome::Lost;
        let input = ControlInput {
            veloc_x: Some(5.0),
            ..Default::default()
        };
        let before = maze.ball.clone();
        tick(&mut maze, &input, &mut sched);
        assert_eq!(maze.ball, before);
        assert_eq!(maze.level_ticks, 0);
        assert!(sched.is_empty());
    }

    #[test]
    fn test_clear_input() {
        let mut input = ControlInput {
            veloc_x: Some(1.0),
            veloc_y: Some(2.0),
            jump: true,
        };
        input.clear();
        assert_eq!(input, ControlInput::default());
    }
}

//! Deferred work against the maze
//!
//! The update step never resets a level itself. It hands a task to a
//! [`Scheduler`], which runs it later with the maze borrowed again.

use super::state::Maze;

/// A deferred action on the simulation context
pub type Task = Box<dyn FnOnce(&mut Maze)>;

/// Runs a task after a delay
pub trait Scheduler {
    fn schedule(&mut self, task: Task, delay_secs: f32);
}

/// Simulation-clock timers, advanced explicitly by the run loop
#[derive(Default)]
pub struct TimerQueue {
    now: f64,
    pending: Vec<(f64, Task)>,
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seconds elapsed on this queue's clock
    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward and run every task that came due, oldest first.
    /// Returns how many ran.
    pub fn advance(&mut self, dt: f32, maze: &mut Maze) -> usize {
        self.now += dt as f64;
        let now = self.now;

        let (mut due, waiting): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.pending).into_iter().partition(|(at, _)| *at <= now);
        self.pending = waiting;

        due.sort_by(|a, b| a.0.total_cmp(&b.0));
        let count = due.len();
        for (_, task) in due {
            task(maze);
        }
        count
    }
}

impl Scheduler for TimerQueue {
    fn schedule(&mut self, task: Task, delay_secs: f32) {
        self.pending.push((self.now + delay_secs.max(0.0) as f64, task));
    }
}

/// Ignores delays; tasks run on the next [`ImmediateScheduler::run_pending`]
#[derive(Default)]
pub struct ImmediateScheduler {
    pending: Vec<Task>,
}

impl ImmediateScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn run_pending(&mut self, maze: &mut Maze) -> usize {
        let tasks = std::mem::take(&mut self.pending);
        let count = tasks.len();
        for task in tasks {
            task(maze);
        }
        count
    }
}

impl Scheduler for ImmediateScheduler {
    fn schedule(&mut self, task: Task, _delay_secs: f32) {
        self.pending.push(task);
    }
}

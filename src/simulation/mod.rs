//! The bounded room and its step pipeline.
//!
//! `WorldCore` is the pure, immutable scene value the whole engine revolves
//! around: bounds plus an ordered list of balls, advanced tick by tick with
//! `step`. The `wasm_bindgen` surface consumed by the browser shell lives in
//! `facade`; scene snapshots in `scene`.

use crate::dynamics::Ball;
use crate::math::Vec2;

mod facade;
mod perf;
pub mod scene;

pub use facade::World;

/// Immutable physics scene: an axis-aligned room and the balls inside it.
///
/// The ball order is stable and significant: pairwise collisions resolve in
/// nested `(i, j > i)` order, so a given scene always steps to the same
/// result. Every operation returns a new world; existing values are never
/// written to, which makes sharing a world across readers safe without any
/// synchronization.
#[derive(Clone, Debug, PartialEq)]
pub struct WorldCore {
    lower_bound: Vec2,
    upper_bound: Vec2,
    balls: Vec<Ball>,
}

impl WorldCore {
    /// Create a world from the lower-left and upper-right room corners.
    ///
    /// Callers must keep `lower_bound` strictly below `upper_bound` on both
    /// axes.
    pub fn new(lower_bound: Vec2, upper_bound: Vec2, balls: Vec<Ball>) -> Self {
        Self {
            lower_bound,
            upper_bound,
            balls,
        }
    }

    /// The lower-left corner of the room.
    pub fn lower_bound(&self) -> Vec2 {
        self.lower_bound
    }

    /// The upper-right corner of the room.
    pub fn upper_bound(&self) -> Vec2 {
        self.upper_bound
    }

    /// The balls in the room, in resolution order.
    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn with_lower_bound(&self, lower_bound: Vec2) -> Self {
        Self {
            lower_bound,
            upper_bound: self.upper_bound,
            balls: self.balls.clone(),
        }
    }

    pub fn with_upper_bound(&self, upper_bound: Vec2) -> Self {
        Self {
            lower_bound: self.lower_bound,
            upper_bound,
            balls: self.balls.clone(),
        }
    }

    /// Returns a world with the same bounds and the given balls.
    pub fn with_balls(&self, balls: Vec<Ball>) -> Self {
        Self {
            lower_bound: self.lower_bound,
            upper_bound: self.upper_bound,
            balls,
        }
    }

    /// Returns a world that also contains `ball`, appended last.
    pub fn add_ball(&self, ball: Ball) -> Self {
        let mut balls = self.balls.clone();
        balls.push(ball);
        self.with_balls(balls)
    }

    /// Advance the whole scene by `delta_time` seconds.
    ///
    /// Fixed pipeline, in this order: resolve every distinct ball pair
    /// (greedy, in sequence order, each resolution visible to later pairs in
    /// the same tick), bounce every ball off the room edges, then integrate
    /// every ball. O(n^2) per tick, which is fine for the interactive ball
    /// counts this engine targets.
    pub fn step(&self, delta_time: f64) -> Self {
        let mut balls = self.balls.clone();

        for i in 0..balls.len() {
            for j in (i + 1)..balls.len() {
                let (ball_i, ball_j) = Ball::bounce_against_each_other(balls[i], balls[j]);
                balls[i] = ball_i;
                balls[j] = ball_j;
            }
        }

        let balls = balls
            .into_iter()
            .map(|b| b.bounce_against_edge(self.lower_bound, self.upper_bound))
            .map(|b| b.step(delta_time))
            .collect();

        self.with_balls(balls)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;

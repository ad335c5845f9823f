use wasm_bindgen::prelude::*;

use crate::dynamics::Ball;
use crate::math::Vec2;
use crate::simulation::perf::PerfTimer;
use crate::simulation::{scene, WorldCore};

/// Number of f64 slots per ball in [`World::ball_data`]:
/// `[x, y, radius, density, vx, vy, ax, ay]`.
const BALL_STRIDE: usize = 8;

/// Shell-facing wrapper around the pure [`WorldCore`].
///
/// The browser shell owns exactly one `World` and drives it once per
/// animation frame. Internally each call to [`World::step`] replaces the
/// held core with the newly computed one; the core values themselves are
/// never mutated.
#[wasm_bindgen]
pub struct World {
    core: WorldCore,
    gravity: Vec2,
    perf_enabled: bool,
    last_step_ms: f64,
}

#[wasm_bindgen]
impl World {
    /// Create an empty world from the room corners, in meters.
    #[wasm_bindgen(constructor)]
    pub fn new(lower_x: f64, lower_y: f64, upper_x: f64, upper_y: f64) -> Self {
        Self {
            core: WorldCore::new(
                Vec2::new(lower_x, lower_y),
                Vec2::new(upper_x, upper_y),
                Vec::new(),
            ),
            gravity: Vec2::ZERO,
            perf_enabled: false,
            last_step_ms: 0.0,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn lower_x(&self) -> f64 {
        self.core.lower_bound().x
    }

    #[wasm_bindgen(getter)]
    pub fn lower_y(&self) -> f64 {
        self.core.lower_bound().y
    }

    #[wasm_bindgen(getter)]
    pub fn upper_x(&self) -> f64 {
        self.core.upper_bound().x
    }

    #[wasm_bindgen(getter)]
    pub fn upper_y(&self) -> f64 {
        self.core.upper_bound().y
    }

    #[wasm_bindgen(getter)]
    pub fn ball_count(&self) -> usize {
        self.core.balls().len()
    }

    /// Advance the scene by `delta_time` seconds of wall-clock time.
    pub fn step(&mut self, delta_time: f64) {
        if self.perf_enabled {
            let timer = PerfTimer::start();
            self.core = self.core.step(delta_time);
            self.last_step_ms = timer.elapsed_ms();
        } else {
            self.core = self.core.step(delta_time);
        }
    }

    /// Add a ball at `(x, y)` with the given shape and initial velocity.
    /// New balls pick up the world's current gravity.
    pub fn add_ball(
        &mut self,
        radius: f64,
        density: f64,
        x: f64,
        y: f64,
        vx: f64,
        vy: f64,
    ) -> Result<(), JsValue> {
        let position = Vec2::new(x, y);
        let velocity = Vec2::new(vx, vy);
        scene::validate_ball(radius, density, position, velocity, self.gravity)
            .map_err(|e| JsValue::from_str(&e))?;
        self.core = self
            .core
            .add_ball(Ball::new(radius, density, position, velocity, self.gravity));
        Ok(())
    }

    /// Remove the ball at `index`; returns false when out of range.
    pub fn remove_ball(&mut self, index: usize) -> bool {
        if index >= self.core.balls().len() {
            return false;
        }
        let mut balls = self.core.balls().to_vec();
        balls.remove(index);
        self.core = self.core.with_balls(balls);
        true
    }

    /// Remove all balls.
    pub fn clear(&mut self) {
        self.core = self.core.with_balls(Vec::new());
    }

    /// Replace the balls with the classic two-ball starter scene.
    pub fn reset_demo(&mut self) {
        self.core = self.core.with_balls(scene::demo_balls(self.gravity));
    }

    /// Set the uniform gravity vector and apply it to every ball.
    pub fn set_gravity(&mut self, x: f64, y: f64) {
        self.gravity = Vec2::new(x, y);
        let balls = self
            .core
            .balls()
            .iter()
            .map(|b| b.with_acceleration(self.gravity))
            .collect();
        self.core = self.core.with_balls(balls);
    }

    #[wasm_bindgen(getter)]
    pub fn gravity_x(&self) -> f64 {
        self.gravity.x
    }

    #[wasm_bindgen(getter)]
    pub fn gravity_y(&self) -> f64 {
        self.gravity.y
    }

    /// Flat render snapshot, [`BALL_STRIDE`] slots per ball:
    /// `[x, y, radius, density, vx, vy, ax, ay]`.
    pub fn ball_data(&self) -> js_sys::Float64Array {
        let mut buffer = Vec::with_capacity(self.core.balls().len() * BALL_STRIDE);
        for ball in self.core.balls() {
            buffer.extend_from_slice(&[
                ball.position.x,
                ball.position.y,
                ball.radius,
                ball.density,
                ball.velocity.x,
                ball.velocity.y,
                ball.acceleration.x,
                ball.acceleration.y,
            ]);
        }
        js_sys::Float64Array::from(buffer.as_slice())
    }

    /// Slots per ball in [`World::ball_data`].
    pub fn ball_stride(&self) -> usize {
        BALL_STRIDE
    }

    /// Total kinetic energy of the scene: sum of m |v|^2 / 2.
    pub fn kinetic_energy(&self) -> f64 {
        self.core
            .balls()
            .iter()
            .map(|b| {
                let speed = b.velocity.length();
                b.mass() * speed * speed / 2.0
            })
            .sum()
    }

    /// Total potential energy relative to the room floor:
    /// sum of m |a.y| (y - lower.y), using each ball's own acceleration.
    pub fn potential_energy(&self) -> f64 {
        let floor = self.core.lower_bound().y;
        self.core
            .balls()
            .iter()
            .map(|b| b.mass() * b.acceleration.y.abs() * (b.position.y - floor))
            .sum()
    }

    /// Total mechanical energy of the scene (kinetic plus potential).
    pub fn total_energy(&self) -> f64 {
        self.kinetic_energy() + self.potential_energy()
    }

    /// Sum of momentum magnitudes, m |v|, over all balls.
    pub fn momentum(&self) -> f64 {
        self.core
            .balls()
            .iter()
            .map(|b| b.mass() * b.velocity.length())
            .sum()
    }

    /// Serialize the current scene to snapshot JSON.
    pub fn scene_json(&self) -> String {
        scene::to_json(&self.core)
    }

    /// Replace the current scene with a parsed snapshot.
    pub fn load_scene_json(&mut self, json: String) -> Result<(), JsValue> {
        self.core = scene::from_json(&json).map_err(|e| JsValue::from_str(&e))?;
        Ok(())
    }

    /// Enable or disable per-step timing (adds clock overhead when enabled).
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.perf_enabled = enabled;
    }

    /// Duration of the most recent timed step, in milliseconds.
    pub fn last_step_ms(&self) -> f64 {
        self.last_step_ms
    }
}

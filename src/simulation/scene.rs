//! Scene snapshots: a flat JSON encoding of bounds and ball state.
//!
//! This is shell-level glue, not simulation: the shell uses it to stash the
//! current scene in a URL or local storage and restore it later. Loading
//! validates every ball the same way interactive insertion does, since a
//! snapshot is just another collaborator constructing bodies.

use serde::{Deserialize, Serialize};

use crate::dynamics::Ball;
use crate::math::Vec2;
use crate::simulation::WorldCore;

#[derive(Serialize, Deserialize, Clone, Copy)]
struct VecDoc {
    x: f64,
    y: f64,
}

impl From<Vec2> for VecDoc {
    fn from(v: Vec2) -> Self {
        Self { x: v.x, y: v.y }
    }
}

impl From<VecDoc> for Vec2 {
    fn from(d: VecDoc) -> Self {
        Vec2::new(d.x, d.y)
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BallDoc {
    radius: f64,
    density: f64,
    position: VecDoc,
    velocity: VecDoc,
    acceleration: VecDoc,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SceneDoc {
    lower_bound: VecDoc,
    upper_bound: VecDoc,
    balls: Vec<BallDoc>,
}

/// Validate the parameters of a ball about to enter a world.
///
/// The core itself is total over finite inputs and does not re-check; this
/// is the construction-time guard the boundary applies before building a
/// `Ball` (a non-positive mass or a NaN coordinate would otherwise poison
/// the collision math).
pub(crate) fn validate_ball(
    radius: f64,
    density: f64,
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
) -> Result<(), String> {
    if !radius.is_finite() || radius <= 0.0 {
        return Err("radius must be finite and > 0".to_string());
    }
    if !density.is_finite() || density <= 0.0 {
        return Err("density must be finite and > 0".to_string());
    }
    for (name, v) in [
        ("position", position),
        ("velocity", velocity),
        ("acceleration", acceleration),
    ] {
        if !v.x.is_finite() || !v.y.is_finite() {
            return Err(format!("{name} must be finite"));
        }
    }
    Ok(())
}

/// Serialize a world to the snapshot JSON format.
pub fn to_json(world: &WorldCore) -> String {
    let doc = SceneDoc {
        lower_bound: world.lower_bound().into(),
        upper_bound: world.upper_bound().into(),
        balls: world
            .balls()
            .iter()
            .map(|b| BallDoc {
                radius: b.radius,
                density: b.density,
                position: b.position.into(),
                velocity: b.velocity.into(),
                acceleration: b.acceleration.into(),
            })
            .collect(),
    };
    serde_json::to_string(&doc).unwrap_or_else(|_| "{}".to_string())
}

/// Parse and validate a snapshot produced by [`to_json`].
pub fn from_json(json: &str) -> Result<WorldCore, String> {
    let doc: SceneDoc = serde_json::from_str(json).map_err(|e| e.to_string())?;

    let lower_bound = Vec2::from(doc.lower_bound);
    let upper_bound = Vec2::from(doc.upper_bound);
    if !(lower_bound.x < upper_bound.x && lower_bound.y < upper_bound.y) {
        return Err("lowerBound must be strictly below upperBound on both axes".to_string());
    }

    let mut balls = Vec::with_capacity(doc.balls.len());
    for (index, b) in doc.balls.into_iter().enumerate() {
        let position = Vec2::from(b.position);
        let velocity = Vec2::from(b.velocity);
        let acceleration = Vec2::from(b.acceleration);
        validate_ball(b.radius, b.density, position, velocity, acceleration)
            .map_err(|e| format!("ball {index}: {e}"))?;
        balls.push(Ball::new(b.radius, b.density, position, velocity, acceleration));
    }

    Ok(WorldCore::new(lower_bound, upper_bound, balls))
}

/// The classic two-ball starter scene, with the given gravity applied.
pub fn demo_balls(gravity: Vec2) -> Vec<Ball> {
    vec![
        Ball::new(0.2, 1.0, Vec2::new(-1.0, 0.0), Vec2::ONE, gravity),
        Ball::new(0.3, 1.0, Vec2::new(1.0, 0.0), Vec2::ONE, gravity),
    ]
}

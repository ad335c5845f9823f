use std::f64::consts::PI;

use crate::math::Vec2;

/// Immutable rigid disc.
///
/// A ball carries its shape (`radius`, `density`), kinematic state
/// (`position`, `velocity`) and a constant per-tick `acceleration`. Mass is
/// always derived from radius and density so the two can never drift apart.
/// Mutators return a new ball with one field replaced.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ball {
    pub radius: f64,
    pub density: f64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub acceleration: Vec2,
}

impl Ball {
    /// Create a ball. Callers are responsible for `radius > 0`,
    /// `density > 0` and finite components; a non-positive mass turns the
    /// collision formulas into NaN factories.
    pub fn new(
        radius: f64,
        density: f64,
        position: Vec2,
        velocity: Vec2,
        acceleration: Vec2,
    ) -> Self {
        Self {
            radius,
            density,
            position,
            velocity,
            acceleration,
        }
    }

    /// Mass of the disc: density times the disc area.
    pub fn mass(&self) -> f64 {
        PI * self.radius * self.radius * self.density
    }

    pub fn with_radius(&self, radius: f64) -> Self {
        Self { radius, ..*self }
    }

    pub fn with_density(&self, density: f64) -> Self {
        Self { density, ..*self }
    }

    pub fn with_position(&self, position: Vec2) -> Self {
        Self { position, ..*self }
    }

    pub fn with_velocity(&self, velocity: Vec2) -> Self {
        Self { velocity, ..*self }
    }

    pub fn with_acceleration(&self, acceleration: Vec2) -> Self {
        Self { acceleration, ..*self }
    }

    /// Resolve a contact between two balls, if they touch or overlap.
    ///
    /// When the center distance is within the radius sum, the velocities are
    /// rotated into the frame whose x-axis is the contact normal, the 1D
    /// elastic-collision equations (momentum conservation plus relative
    /// velocity reversal) are solved for the normal components, and the
    /// results are rotated back. Tangential components pass through
    /// untouched, so the pair's kinetic energy is conserved. Overlapping
    /// balls are additionally pushed apart along the normal, the heavier one
    /// moving less. Separating pairs are not special-cased: any contact
    /// within the radius sum is resolved.
    pub fn bounce_against_each_other(i: Ball, j: Ball) -> (Ball, Ball) {
        let diff = i.position - j.position;
        let gap = diff.length() - (i.radius + j.radius);
        if gap > 0.0 {
            return (i, j);
        }

        // Rotating by diff.angle() aligns the contact normal with the x-axis.
        let alpha = diff.angle();
        let u_i = i.velocity.rotate(alpha);
        let u_j = j.velocity.rotate(alpha);

        let (m_i, m_j) = (i.mass(), j.mass());
        // v_i = (m_i u_i + m_j u_j + (u_j - u_i) m_j) / (m_i + m_j)
        let v_i_x = (m_i * u_i.x + m_j * u_j.x + (u_j.x - u_i.x) * m_j) / (m_i + m_j);
        // v_j = v_i - (u_j - u_i)
        let v_i = Vec2::new(v_i_x, u_i.y);
        let v_j = Vec2::new(v_i_x - (u_j.x - u_i.x), u_j.y);

        // gap <= 0, so i moves along +diff (away from j) and j along -diff.
        let normal = diff.normalized();
        (
            i.with_velocity(v_i.rotate(-alpha))
                .with_position(i.position - normal * (gap * m_j / (m_i + m_j))),
            j.with_velocity(v_j.rotate(-alpha))
                .with_position(j.position + normal * (gap * m_i / (m_i + m_j))),
        )
    }

    /// Bounce this ball off the walls of the room spanned by the two corners.
    ///
    /// Per axis: if the ball's edge has crossed a wall, the position is
    /// clamped so the edge rests on the wall, the speed on that axis is
    /// re-derived from `v^2 = v0^2 + 2 a dx` over the correction distance
    /// (so mechanical energy matches the state the ball would have had at
    /// the wall itself, even after tunneling), and the sign is forced back
    /// into the room with `abs` so a repeated call is a no-op once inside.
    pub fn bounce_against_edge(&self, lower_bound: Vec2, upper_bound: Vec2) -> Self {
        let (x, vx) = bounce_axis(
            self.position.x,
            self.velocity.x,
            self.acceleration.x,
            self.radius,
            lower_bound.x,
            upper_bound.x,
        );
        let (y, vy) = bounce_axis(
            self.position.y,
            self.velocity.y,
            self.acceleration.y,
            self.radius,
            lower_bound.y,
            upper_bound.y,
        );

        self.with_position(Vec2::new(x, y))
            .with_velocity(Vec2::new(vx, vy))
    }

    /// Advance this ball by `delta_time` seconds.
    ///
    /// Average-velocity Euler: the position moves by the mean of the
    /// velocity before and after the acceleration update, which keeps the
    /// discrete energy drift negligible for constant acceleration at
    /// display-loop tick sizes.
    pub fn step(&self, delta_time: f64) -> Self {
        let next_velocity = self.velocity + self.acceleration * delta_time;
        self.with_velocity(next_velocity).with_position(
            self.position + (self.velocity + next_velocity) * (delta_time / 2.0),
        )
    }
}

/// One axis of the edge bounce: returns the corrected (position, velocity).
///
/// Sign decisions use the pre-clamp position, so a ball that was inside the
/// room on this axis keeps both values bit-for-bit.
fn bounce_axis(pos: f64, vel: f64, acc: f64, radius: f64, lower: f64, upper: f64) -> (f64, f64) {
    let clamped = if pos - radius <= lower {
        lower + radius
    } else if upper <= pos + radius {
        upper - radius
    } else {
        pos
    };

    let mut vel = vel;
    if clamped != pos {
        // Kinematic identity over the correction distance.
        vel = (2.0 * acc * (clamped - pos) + vel * vel).sqrt();
    }
    if pos - radius <= lower {
        vel = vel.abs();
    } else if upper <= pos + radius {
        vel = -vel.abs();
    }

    (clamped, vel)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-4;

    struct TestRng(u64);

    impl TestRng {
        fn next_unit(&mut self) -> f64 {
            self.0 ^= self.0 << 13;
            self.0 ^= self.0 >> 7;
            self.0 ^= self.0 << 17;
            (self.0 >> 11) as f64 / (1u64 << 53) as f64
        }
    }

    fn kinetic_energy(ball: &Ball) -> f64 {
        let speed = ball.velocity.length();
        ball.mass() * speed * speed / 2.0
    }

    fn potential_energy(ball: &Ball, lower_bound: Vec2) -> f64 {
        ball.mass() * ball.acceleration.y.abs() * (ball.position.y - lower_bound.y)
    }

    fn mechanical_energy(ball: &Ball, lower_bound: Vec2) -> f64 {
        kinetic_energy(ball) + potential_energy(ball, lower_bound)
    }

    fn assert_energy_kept(before: &[Ball], after: &[Ball], lower_bound: Vec2) {
        let e_before: f64 = before.iter().map(|b| mechanical_energy(b, lower_bound)).sum();
        let e_after: f64 = after.iter().map(|b| mechanical_energy(b, lower_bound)).sum();
        assert!(
            (e_before - e_after).abs() < TOLERANCE,
            "energy changed from {e_before} to {e_after}"
        );
    }

    #[test]
    fn mass_is_disc_area_times_density() {
        let ball = Ball::new(2.0, 3.0, Vec2::ZERO, Vec2::ZERO, Vec2::ZERO);
        assert!((ball.mass() - std::f64::consts::PI * 4.0 * 3.0).abs() < 1e-12);
    }

    #[test]
    fn with_methods_replace_one_field() {
        let ball = Ball::new(1.0, 1.0, Vec2::ZERO, Vec2::ONE, Vec2::DOWN);
        assert_eq!(ball.with_radius(2.0).radius, 2.0);
        assert_eq!(ball.with_radius(2.0).density, 1.0);
        assert_eq!(ball.with_density(5.0).density, 5.0);
        assert_eq!(ball.with_position(Vec2::UP).position, Vec2::UP);
        assert_eq!(ball.with_velocity(Vec2::LEFT).velocity, Vec2::LEFT);
        assert_eq!(ball.with_velocity(Vec2::LEFT).acceleration, Vec2::DOWN);
        assert_eq!(ball.with_acceleration(Vec2::ZERO).acceleration, Vec2::ZERO);
    }

    #[test]
    fn bounces_against_every_edge_and_keeps_energy() {
        let bound_radius = 5.0;
        let upper_bound = Vec2::ONE * bound_radius;
        let lower_bound = -upper_bound;
        let radius = 1.0;
        let intersect = 0.05;
        let gravity = Vec2::DOWN * 9.8;

        for direction in [Vec2::UP, Vec2::LEFT, Vec2::RIGHT, Vec2::DOWN] {
            let before = Ball::new(
                radius,
                1.0,
                direction * (bound_radius - (radius - intersect)),
                direction,
                gravity,
            );
            let after = before.bounce_against_edge(lower_bound, upper_bound);

            if before.velocity.x > 0.0 {
                assert!(after.velocity.x < 0.0, "x velocity should flip toward {direction}");
            } else {
                assert!(after.velocity.x >= 0.0, "x velocity should stay inward toward {direction}");
            }
            if before.velocity.y > 0.0 {
                assert!(after.velocity.y < 0.0, "y velocity should flip toward {direction}");
            } else {
                assert!(after.velocity.y >= 0.0, "y velocity should stay inward toward {direction}");
            }

            assert_energy_kept(&[before], &[after], lower_bound);
        }
    }

    #[test]
    fn edge_bounce_is_idempotent_inside_the_room() {
        let ball = Ball::new(0.5, 1.0, Vec2::new(1.0, -2.0), Vec2::new(3.0, 4.0), Vec2::DOWN);
        let bounced = ball.bounce_against_edge(Vec2::ONE * -5.0, Vec2::ONE * 5.0);
        assert_eq!(bounced, ball);
    }

    #[test]
    fn perpendicular_bounce_only_swaps_the_normal_axis() {
        let radius = 1.0;
        let intersect = 0.05;
        let speed = 1.0;
        let a_before = Ball::new(
            radius,
            1.0,
            Vec2::new(-(radius - intersect), 0.0),
            Vec2::new(speed, speed),
            Vec2::ZERO,
        );
        let b_before = Ball::new(
            radius,
            1.0,
            Vec2::new(radius - intersect, 0.0),
            Vec2::new(-speed, -speed),
            Vec2::ZERO,
        );

        let (a_after, b_after) = Ball::bounce_against_each_other(a_before, b_before);

        assert!((a_after.velocity.x + a_before.velocity.x).abs() < TOLERANCE);
        assert!((a_after.velocity.y - a_before.velocity.y).abs() < TOLERANCE);
        assert!((b_after.velocity.x + b_before.velocity.x).abs() < TOLERANCE);
        assert!((b_after.velocity.y - b_before.velocity.y).abs() < TOLERANCE);

        assert_energy_kept(
            &[a_before, b_before],
            &[a_after, b_after],
            Vec2::ONE * -5.0,
        );
    }

    #[test]
    fn random_bounces_keep_energy() {
        let mut rng = TestRng(0xb0c3_5eed);
        let radius = 1.0;
        let intersect = 0.0005;
        let lower_bound = Vec2::ONE * -5.0;

        for _ in 0..10 {
            let gravity = Vec2::DOWN * (rng.next_unit() * 10.0);
            let a_before = Ball::new(
                radius,
                0.5 + rng.next_unit(),
                Vec2::ZERO,
                Vec2::RIGHT
                    .rotate(rng.next_unit() * std::f64::consts::TAU)
                    .scale(rng.next_unit()),
                gravity,
            );
            let b_before = Ball::new(
                radius,
                0.5 + rng.next_unit(),
                Vec2::RIGHT
                    .rotate(rng.next_unit() * std::f64::consts::TAU)
                    .scale((radius - intersect) * 2.0),
                Vec2::RIGHT
                    .rotate(rng.next_unit() * std::f64::consts::TAU)
                    .scale(rng.next_unit()),
                gravity,
            );

            let (a_after, b_after) = Ball::bounce_against_each_other(a_before, b_before);
            assert_energy_kept(&[a_before, b_before], &[a_after, b_after], lower_bound);
        }
    }

    #[test]
    fn separated_balls_are_untouched() {
        let a = Ball::new(1.0, 1.0, Vec2::ZERO, Vec2::RIGHT, Vec2::ZERO);
        let b = Ball::new(1.0, 1.0, Vec2::new(5.0, 0.0), Vec2::LEFT, Vec2::ZERO);
        let (a_after, b_after) = Ball::bounce_against_each_other(a, b);
        assert_eq!(a_after, a);
        assert_eq!(b_after, b);
    }

    #[test]
    fn overlapping_balls_get_separated_by_mass() {
        // Same density; b has twice the radius, so four times the mass.
        let a = Ball::new(1.0, 1.0, Vec2::new(-0.5, 0.0), Vec2::ZERO, Vec2::ZERO);
        let b = Ball::new(2.0, 1.0, Vec2::new(1.5, 0.0), Vec2::ZERO, Vec2::ZERO);
        let (a_after, b_after) = Ball::bounce_against_each_other(a, b);

        let distance = a_after.position.distance_to(b_after.position);
        assert!((distance - 3.0).abs() < TOLERANCE, "should rest in contact, got {distance}");
        // Lighter ball absorbs most of the correction.
        let a_moved = a_after.position.distance_to(a.position);
        let b_moved = b_after.position.distance_to(b.position);
        assert!(a_moved > b_moved);
        assert!((a_moved - 4.0 * b_moved).abs() < TOLERANCE);
    }

    #[test]
    fn step_without_acceleration_is_linear() {
        let ball = Ball::new(1.0, 1.0, Vec2::new(1.0, 2.0), Vec2::new(3.0, -4.0), Vec2::ZERO);
        let stepped = ball.step(0.5);
        assert_eq!(stepped.position, Vec2::new(2.5, 0.0));
        assert_eq!(stepped.velocity, ball.velocity);
    }

    #[test]
    fn random_steps_keep_energy() {
        let mut rng = TestRng(0x5eed_cafe);
        let lower_bound = Vec2::ONE * -5.0;

        for _ in 0..10 {
            let gravity = Vec2::DOWN * (rng.next_unit() * 10.0);
            let before = Ball::new(
                1.0,
                1.0,
                Vec2::ZERO,
                Vec2::RIGHT
                    .rotate(rng.next_unit() * std::f64::consts::TAU)
                    .scale(rng.next_unit()),
                gravity,
            );
            let after = before.step(1.0 / 30.0);
            assert_energy_kept(&[before], &[after], lower_bound);
        }
    }
}

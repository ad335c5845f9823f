use std::fmt;

/// Immutable 2D vector for physics calculations.
///
/// Every operation returns a new value; nothing here mutates in place.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };
    pub const ONE: Vec2 = Vec2 { x: 1.0, y: 1.0 };
    pub const UP: Vec2 = Vec2 { x: 0.0, y: 1.0 };
    pub const DOWN: Vec2 = Vec2 { x: 0.0, y: -1.0 };
    pub const LEFT: Vec2 = Vec2 { x: -1.0, y: 0.0 };
    pub const RIGHT: Vec2 = Vec2 { x: 1.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean length of this vector.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Unit vector in the same direction.
    ///
    /// Precondition: the length must be non-zero. Normalizing a zero-length
    /// vector divides by zero and yields NaN components, which then propagate
    /// through downstream math.
    pub fn normalized(&self) -> Self {
        self.scale(1.0 / self.length())
    }

    /// Returns this vector scaled by `s`.
    pub fn scale(&self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    /// Dot product with `other`.
    pub fn dot(&self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Distance between the points addressed by this vector and `other`.
    pub fn distance_to(&self, other: Vec2) -> f64 {
        (other - *self).length()
    }

    /// Signed angle in radians from this vector to the x-axis.
    ///
    /// Rotating this vector by the returned angle aligns it with `RIGHT`.
    pub fn angle(&self) -> f64 {
        self.angle_to(Vec2::RIGHT)
    }

    /// Signed angle in radians from this vector to `other`, in (-pi, pi].
    ///
    /// Quadrant-correct via `atan2` of the cross and dot products, and
    /// antisymmetric: `a.angle_to(b) == -b.angle_to(a)`. Satisfies
    /// `v.angle_to(v.rotate(theta)) == theta` (mod 2 pi).
    pub fn angle_to(&self, other: Vec2) -> f64 {
        (self.x * other.y - self.y * other.x).atan2(self.dot(other))
    }

    /// Returns this vector rotated counterclockwise by `angle` radians.
    pub fn rotate(&self, angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(self.x * cos - self.y * sin, self.x * sin + self.y * cos)
    }

    /// Returns a vector with this vector's y and the given x.
    pub fn with_x(&self, x: f64) -> Self {
        Self::new(x, self.y)
    }

    /// Returns a vector with this vector's x and the given y.
    pub fn with_y(&self, y: f64) -> Self {
        Self::new(self.x, y)
    }

    /// Returns a vector with the x component transformed by `f`.
    pub fn map_x(&self, f: impl FnOnce(f64) -> f64) -> Self {
        Self::new(f(self.x), self.y)
    }

    /// Returns a vector with the y component transformed by `f`.
    pub fn map_y(&self, f: impl FnOnce(f64) -> f64) -> Self {
        Self::new(self.x, f(self.y))
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl std::ops::Neg for Vec2 {
    type Output = Self;
    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

impl std::ops::Mul<f64> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl fmt::Display for Vec2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2})", self.x, self.y)
    }
}

//! 2D affine transforms with post-concatenation.
//!
//! Screen coordinates: x grows right, y grows down. Rotation is given in
//! degrees, clockwise positive, 0 degrees = no rotation. `post_*` methods
//! apply the new operation *after* the existing transform, so a chain
//! reads top-to-bottom in application order.

/// Row-major 2x3 affine matrix: `x' = a*x + b*y + tx`, `y' = c*x + d*y + ty`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    a: f32,
    b: f32,
    tx: f32,
    c: f32,
    d: f32,
    ty: f32,
}

impl Transform2D {
    /// The identity transform.
    pub fn identity() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            tx: 0.0,
            c: 0.0,
            d: 1.0,
            ty: 0.0,
        }
    }

    /// A pure translation.
    pub fn translation(dx: f32, dy: f32) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            tx: dx,
            c: 0.0,
            d: 1.0,
            ty: dy,
        }
    }

    /// A rotation about the origin, clockwise positive in screen space.
    pub fn rotation_deg(deg: f32) -> Self {
        let rad = deg.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            a: cos,
            b: -sin,
            tx: 0.0,
            c: sin,
            d: cos,
            ty: 0.0,
        }
    }

    /// Apply `other` after `self`.
    pub fn post_concat(&self, other: &Transform2D) -> Transform2D {
        Transform2D {
            a: other.a * self.a + other.b * self.c,
            b: other.a * self.b + other.b * self.d,
            tx: other.a * self.tx + other.b * self.ty + other.tx,
            c: other.c * self.a + other.d * self.c,
            d: other.c * self.b + other.d * self.d,
            ty: other.c * self.tx + other.d * self.ty + other.ty,
        }
    }

    /// Append a translation.
    pub fn post_translate(self, dx: f32, dy: f32) -> Self {
        self.post_concat(&Self::translation(dx, dy))
    }

    /// Append a rotation about the origin, clockwise degrees.
    pub fn post_rotate_deg(self, deg: f32) -> Self {
        self.post_concat(&Self::rotation_deg(deg))
    }

    /// Transform one point.
    pub fn apply(&self, (x, y): (f32, f32)) -> (f32, f32) {
        (
            self.a * x + self.b * y + self.tx,
            self.c * x + self.d * y + self.ty,
        )
    }
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

use glam::{Mat2, Vec2};

/// Rotates `vec` counter-clockwise by `angle` radians
#[must_use]
pub fn rotate(vec: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();

    Vec2::new(
        vec.x.mul_add(cos, -vec.y * sin),
        vec.x.mul_add(sin, vec.y * cos),
    )
}

/// Inverse of [`rotate`]
#[must_use]
pub fn unrotate(vec: Vec2, angle: f32) -> Vec2 {
    rotate(vec, -angle)
}

/// 2D cross product of two vectors (the z component of the 3D cross)
#[inline]
#[must_use]
pub fn cross(a: Vec2, b: Vec2) -> f32 {
    a.perp_dot(b)
}

/// Cross of a scalar angular velocity with a vector, `w x r`
#[inline]
#[must_use]
pub fn cross_sv(w: f32, r: Vec2) -> Vec2 {
    Vec2::new(-w * r.y, w * r.x)
}

/// Solves `k * x = b`, returning zero when `k` is singular
#[must_use]
pub fn solve22(k: Mat2, b: Vec2) -> Vec2 {
    let det = k.determinant();
    if det == 0.0 {
        return Vec2::ZERO;
    }

    let inv_det = 1.0 / det;
    let (a11, a21) = (k.x_axis.x, k.x_axis.y);
    let (a12, a22) = (k.y_axis.x, k.y_axis.y);

    Vec2::new(
        inv_det * a22.mul_add(b.x, -a12 * b.y),
        inv_det * a11.mul_add(b.y, -a21 * b.x),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, PI};

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-6
    }

    #[test]
    fn rotate_quarter_turn() {
        assert!(close(rotate(Vec2::Y, FRAC_PI_2), Vec2::NEG_X));
        assert!(close(rotate(Vec2::X, FRAC_PI_2), Vec2::Y));
        assert!(close(rotate(Vec2::new(0.0, 1.3), PI), Vec2::new(0.0, -1.3)));
    }

    #[test]
    fn unrotate_undoes_rotate() {
        let v = Vec2::new(3.0, -2.0);
        assert!((unrotate(rotate(v, 0.7), 0.7) - v).length() < 1e-5);
    }

    #[test]
    fn solve_identity_and_singular() {
        let b = Vec2::new(2.0, -5.0);
        assert!(close(solve22(Mat2::IDENTITY, b), b));
        assert_eq!(solve22(Mat2::ZERO, b), Vec2::ZERO);

        let k = Mat2::from_cols(Vec2::new(2.0, 1.0), Vec2::new(1.0, 3.0));
        let x = solve22(k, b);
        assert!(close(k * x, b));
    }
}

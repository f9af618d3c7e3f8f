//! Fixed camera and model transforms.
//!
//! All matrices are pure functions of compile-time constants and are
//! recomputed every frame.

use cgmath::{perspective, Deg, Matrix4, SquareMatrix, Vector3};

pub const FOV_Y: f32 = 45.0;
pub const ASPECT: f32 = 1024.0 / 768.0;
pub const NEAR: f32 = 0.1;
pub const FAR: f32 = 100.0;

/// Perspective projection with the fixed 1024x768 aspect ratio.
pub fn projection() -> Matrix4<f32> {
    perspective(Deg(FOV_Y), ASPECT, NEAR, FAR)
}

/// Translation-only view matrix. There is no camera input.
pub fn view() -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, -1.0, -10.0))
}

pub fn floor_model() -> Matrix4<f32> {
    Matrix4::identity()
}

pub fn wall_model() -> Matrix4<f32> {
    Matrix4::from_translation(Vector3::new(0.0, 0.0, -5.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f32 = 1e-5;

    fn assert_matrix_eq(actual: &Matrix4<f32>, expected: &[f32; 16]) {
        let actual: &[f32; 16] = actual.as_ref();
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < TOLERANCE,
                "element {i}: got {a}, expected {e}"
            );
        }
    }

    #[test]
    fn projection_matches_the_perspective_formula() {
        let f = 1.0 / (FOV_Y.to_radians() / 2.0).tan();

        #[rustfmt::skip]
        let expected = [
            f / ASPECT, 0.0, 0.0, 0.0,
            0.0, f, 0.0, 0.0,
            0.0, 0.0, (FAR + NEAR) / (NEAR - FAR), -1.0,
            0.0, 0.0, (2.0 * FAR * NEAR) / (NEAR - FAR), 0.0,
        ];

        assert_matrix_eq(&projection(), &expected);
    }

    #[test]
    fn view_is_translation_only() {
        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, -1.0, -10.0, 1.0,
        ];

        assert_matrix_eq(&view(), &expected);
    }

    #[test]
    fn floor_model_is_identity() {
        assert_eq!(floor_model(), Matrix4::identity());
    }

    #[test]
    fn wall_model_is_translation_only() {
        #[rustfmt::skip]
        let expected = [
            1.0, 0.0, 0.0, 0.0,
            0.0, 1.0, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, -5.0, 1.0,
        ];

        assert_matrix_eq(&wall_model(), &expected);
    }
}

//! Core types shared by loaders: math re-exports and linear colors.

pub use glam::{Vec3, vec3};

pub mod color;

pub use color::Color;

/// Position in object space.
pub type Point = Vec3;
/// Direction in object space (normals).
pub type Vector = Vec3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_and_vector_share_layout() {
        let p: Point = vec3(1.0, 2.0, 3.0);
        let v: Vector = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(p, v);
        assert_eq!(p.to_array(), [1.0, 2.0, 3.0]);
    }
}

//! CPU-side distance evaluation of scene trees

use glam::Vec3;
use rayon::prelude::*;

use super::{INFINITY, SceneNode, Sdf};

/// Evaluate the signed distance from `p` to the nearest surface of `node`.
///
/// - Unions report the nearest child; an empty union reports [`INFINITY`].
/// - Color nodes report [`INFINITY`] without looking at their child. The
///   tint is shading information only, and the shader generator is the one
///   consumer that sees through it.
pub fn distance(node: &SceneNode, p: Vec3) -> f32 {
    match node {
        SceneNode::Sphere(sphere) => sphere.distance(p),
        SceneNode::Cube(cube) => cube.distance(p),
        SceneNode::Union(children) => children
            .iter()
            .map(|child| distance(child, p))
            .fold(INFINITY, f32::min),
        SceneNode::Color { .. } | SceneNode::Infinity => INFINITY,
        SceneNode::Custom(field) => field.distance(p),
    }
}

/// Evaluate many points at once, in parallel.
///
/// Results are returned in the same order as `points`.
pub fn distances(node: &SceneNode, points: &[Vec3]) -> Vec<f32> {
    points.par_iter().map(|&p| distance(node, p)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::{color, cube, custom, infinity, sphere, union};
    use approx::assert_relative_eq;
    use std::hash::Hasher;

    fn two_spheres() -> SceneNode {
        union([
            sphere(Vec3::ZERO, 1.0),
            sphere(Vec3::new(1.0, 0.0, 0.0), 1.0),
            infinity(),
        ])
    }

    #[test]
    fn empty_union_is_sentinel() {
        let empty = union([]);
        assert_eq!(distance(&empty, Vec3::ONE), INFINITY);
        assert_eq!(distance(&empty, Vec3::ZERO), INFINITY);
    }

    #[test]
    fn infinity_is_sentinel() {
        assert_eq!(distance(&infinity(), Vec3::new(-3.0, 2.0, 9.0)), INFINITY);
    }

    #[test]
    fn union_takes_nearest_child() {
        let scene = two_spheres();
        assert_relative_eq!(distance(&scene, Vec3::new(0.0, 1.1, 0.0)), 0.1, epsilon = 1e-5);
        assert_relative_eq!(distance(&scene, Vec3::new(1.0, 1.1, 0.0)), 0.1, epsilon = 1e-5);
        assert_relative_eq!(distance(&scene, Vec3::ZERO), -1.0, epsilon = 1e-5);
    }

    #[test]
    fn union_matches_min_of_children() {
        let a = sphere(Vec3::new(0.0, -1.0, 1.0), 1.0);
        let b = cube(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.5, 0.25, 1.0));
        let scene = union([a.clone(), b.clone()]);

        for p in [
            Vec3::ZERO,
            Vec3::new(3.0, 1.0, -2.0),
            Vec3::new(-4.0, 0.5, 0.5),
            Vec3::new(2.0, 0.0, 0.0),
        ] {
            assert_eq!(distance(&scene, p), distance(&a, p).min(distance(&b, p)));
        }
    }

    #[test]
    fn union_with_sentinel_child_ignores_it() {
        let a = sphere(Vec3::ZERO, 1.0);
        let scene = union([a.clone(), infinity()]);
        let p = Vec3::new(0.3, 5.0, 0.0);
        assert_eq!(distance(&scene, p), distance(&a, p));
    }

    #[test]
    fn color_hides_its_child() {
        let tinted = color(Vec3::new(1.0, 0.0, 0.0), sphere(Vec3::ZERO, 1.0));
        assert_eq!(distance(&tinted, Vec3::ZERO), INFINITY);

        // Inside a union the colored child contributes nothing either
        let scene = union([tinted, sphere(Vec3::new(5.0, 0.0, 0.0), 1.0)]);
        assert_relative_eq!(distance(&scene, Vec3::ZERO), 4.0, epsilon = 1e-6);
    }

    #[derive(Debug)]
    struct Plane;

    impl Sdf for Plane {
        fn distance(&self, p: Vec3) -> f32 {
            p.y
        }

        fn hash_structure(&self, state: &mut dyn Hasher) {
            state.write(b"plane");
        }
    }

    #[test]
    fn custom_field_is_delegated() {
        let scene = union([custom(Plane), sphere(Vec3::new(0.0, 10.0, 0.0), 1.0)]);
        assert_relative_eq!(distance(&scene, Vec3::new(0.0, 2.0, 0.0)), 2.0);
    }

    #[test]
    fn batch_matches_single_evaluation() {
        let scene = two_spheres();
        let points: Vec<Vec3> = (0..64)
            .map(|i| Vec3::new(i as f32 * 0.1 - 3.0, (i % 7) as f32 * 0.3, 0.5))
            .collect();

        let batch = distances(&scene, &points);
        assert_eq!(batch.len(), points.len());
        for (p, d) in points.iter().zip(&batch) {
            assert_eq!(*d, distance(&scene, *p));
        }
    }
}

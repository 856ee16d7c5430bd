//! Structural hashing of scene trees
//!
//! A structural hash depends only on the tree's shape and the exact bit
//! patterns of its parameters. Floats are hashed through `to_bits`, so
//! `-0.0` and `0.0` differ, and two NaNs with different payloads differ.
//! It is an identity check, not a geometric one.
//!
//! The byte stream is fixed: every scalar is written little-endian and each
//! node kind contributes its own salt, so digests are stable across runs and
//! platforms for a given accumulator.

use std::hash::Hasher;

use glam::Vec3;
use twox_hash::XxHash64;

use super::{SceneNode, Sdf};

// Kind salts. Leaves write theirs after the payload, combinators before.
pub(crate) const SPHERE_SALT: [u8; 4] = [0x53, 0x50, 0x48, 0x01];
pub(crate) const CUBE_SALT: [u8; 4] = [0x43, 0x55, 0x42, 0x02];
const UNION_SALT: [u8; 4] = [0x55, 0x4e, 0x49, 0x03];
const COLOR_SALT: [u8; 4] = [0x43, 0x4f, 0x4c, 0x04];
const INFINITY_SALT: [u8; 4] = [0x49, 0x4e, 0x46, 0x05];
const CUSTOM_SALT: [u8; 4] = [0x43, 0x55, 0x53, 0x06];

/// Seed for [`structural_hash`]. Fixed so digests never change between runs.
const SEED: u64 = 0;

pub(crate) fn write_f32(state: &mut dyn Hasher, value: f32) {
    state.write(&value.to_bits().to_le_bytes());
}

pub(crate) fn write_vec3(state: &mut dyn Hasher, v: Vec3) {
    write_f32(state, v.x);
    write_f32(state, v.y);
    write_f32(state, v.z);
}

/// Feed the structure of `node` into `state`.
pub fn hash_node(node: &SceneNode, state: &mut dyn Hasher) {
    match node {
        SceneNode::Sphere(sphere) => sphere.hash_structure(state),
        SceneNode::Cube(cube) => cube.hash_structure(state),
        SceneNode::Union(children) => {
            state.write(&UNION_SALT);
            // Without the count, Union[Union[a, b]] and Union[Union[a], b]
            // would write the same bytes.
            state.write(&(children.len() as u64).to_le_bytes());
            for child in children {
                hash_node(child, state);
            }
        }
        SceneNode::Color { tint, child } => {
            state.write(&COLOR_SALT);
            write_vec3(state, *tint);
            hash_node(child, state);
        }
        SceneNode::Infinity => state.write(&INFINITY_SALT),
        SceneNode::Custom(field) => {
            state.write(&CUSTOM_SALT);
            field.hash_structure(state);
        }
    }
}

/// 64-bit structural digest of `node` using XxHash64 with a fixed seed.
///
/// Unions write their child count between the salt and the children, so the
/// stream is not a plain salt-then-children sequence. That count keeps
/// differently nested unions over the same leaves from hashing alike.
pub fn structural_hash(node: &SceneNode) -> u64 {
    let mut hasher = XxHash64::with_seed(SEED);
    hash_node(node, &mut hasher);
    hasher.finish()
}

/// Whether two trees have the same structural hash.
///
/// Hash collisions are not detected: two different trees may, with very low
/// probability, be reported as equivalent.
pub fn equivalent(a: &SceneNode, b: &SceneNode) -> bool {
    structural_hash(a) == structural_hash(b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sdf::{color, cube, infinity, sphere, union};

    fn sample() -> SceneNode {
        union([
            sphere(Vec3::new(0.0, -1.0, 1.0), 1.0),
            sphere(Vec3::new(1.0, 0.0, 0.0), 1.0),
            color(Vec3::X, sphere(Vec3::new(1.0, 3.0, 0.0), 1.5)),
        ])
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(structural_hash(&sample()), structural_hash(&sample()));
        assert!(equivalent(&sample(), &sample().clone()));
    }

    #[test]
    fn radius_change_changes_hash() {
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::ZERO, 1.000_001);
        assert!(!equivalent(&a, &b));
    }

    #[test]
    fn signed_zero_is_distinguished() {
        let a = sphere(Vec3::ZERO, 0.0);
        let b = sphere(Vec3::ZERO, -0.0);
        assert!(!equivalent(&a, &b));
    }

    #[test]
    fn child_order_matters() {
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::X, 1.0);
        let ab = union([a.clone(), b.clone()]);
        let ba = union([b, a]);
        assert!(!equivalent(&ab, &ba));
    }

    #[test]
    fn kinds_are_distinguished() {
        // Same payload bytes, different kinds
        let s = sphere(Vec3::ZERO, 1.0);
        let c = cube(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!(!equivalent(&s, &c));

        assert!(!equivalent(&infinity(), &union([])));
        assert!(!equivalent(&s, &union([s.clone()])));
        assert!(!equivalent(&s, &color(Vec3::ZERO, s.clone())));
    }

    #[test]
    fn union_nesting_is_distinguished() {
        let a = sphere(Vec3::ZERO, 1.0);
        let b = sphere(Vec3::Y, 1.0);
        let left = union([union([a.clone(), b.clone()])]);
        let right = union([union([a]), b]);
        assert!(!equivalent(&left, &right));
    }

    #[test]
    fn tint_is_part_of_the_hash() {
        let s = sphere(Vec3::ZERO, 1.0);
        let red = color(Vec3::X, s.clone());
        let green = color(Vec3::Y, s);
        assert!(!equivalent(&red, &green));
    }

    #[test]
    fn independent_accumulators_agree() {
        let scene = sample();
        let mut a = XxHash64::with_seed(SEED);
        let mut b = XxHash64::with_seed(SEED);
        scene.hash_structure(&mut a);
        hash_node(&scene, &mut b);
        assert_eq!(a.finish(), b.finish());
    }
}

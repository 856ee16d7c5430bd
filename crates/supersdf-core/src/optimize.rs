//! Bounding-volume pruning of scene trees
//!
//! [`optimize_intersect`] produces a tree that only has to be correct for
//! points inside a query volume. Branches that cannot reach the volume are
//! replaced by [`SceneNode::Infinity`] and then dropped from their unions,
//! which keeps both CPU evaluation and generated shaders small.

use std::borrow::Cow;
use std::hash::Hasher;

use glam::Vec3;

use crate::sdf::primitives::{Cube, Sphere};
use crate::sdf::{SceneNode, Sdf};

/// Region a pruned tree will be queried in
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundingVolume {
    Sphere(Sphere),
    Cube(Cube),
}

impl BoundingVolume {
    pub fn sphere(center: Vec3, radius: f32) -> Self {
        Self::Sphere(Sphere::new(center, radius))
    }

    pub fn cube(center: Vec3, half_size: Vec3) -> Self {
        Self::Cube(Cube::new(center, half_size))
    }
}

impl Sdf for BoundingVolume {
    fn distance(&self, p: Vec3) -> f32 {
        match self {
            Self::Sphere(sphere) => sphere.distance(p),
            Self::Cube(cube) => cube.distance(p),
        }
    }

    fn hash_structure(&self, state: &mut dyn Hasher) {
        match self {
            Self::Sphere(sphere) => sphere.hash_structure(state),
            Self::Cube(cube) => cube.hash_structure(state),
        }
    }
}

/// Broad-phase test: is `field` within `sphere.radius` of `sphere.center`?
///
/// Color nodes report no geometry, so a color-wrapped field never
/// intersects anything here.
pub fn sphere_intersects<S: Sdf + ?Sized>(field: &S, sphere: &Sphere) -> bool {
    field.distance(sphere.center) <= sphere.radius
}

/// Narrow-phase confirmation after a cube's bounding sphere passed.
// TODO: replace with an exact box/volume overlap test; every cube that
// passes the sphere test is currently kept.
fn cube_intersects(_cube: &Cube, _volume: &BoundingVolume) -> bool {
    true
}

/// Prune `scene` to the parts that can matter inside `volume`.
///
/// The result agrees with `scene` for queries inside the volume and may
/// report [`INFINITY`](crate::sdf::INFINITY) elsewhere. The input is never
/// modified; subtrees that survive untouched are cloned into the result.
pub fn optimize_intersect(scene: &SceneNode, volume: &BoundingVolume) -> SceneNode {
    let before = scene.node_count();
    let result = prune(scene, volume).into_owned();
    tracing::debug!(
        "Pruned {} of {} nodes against {:?}",
        before.saturating_sub(result.node_count()),
        before,
        volume
    );
    result
}

/// Returns `Cow::Borrowed` when `node` survives unchanged.
fn prune<'a>(node: &'a SceneNode, volume: &BoundingVolume) -> Cow<'a, SceneNode> {
    match node {
        SceneNode::Sphere(sphere) => {
            if sphere_intersects(volume, sphere) {
                Cow::Borrowed(node)
            } else {
                tracing::trace!("Culled sphere at {}", sphere.center);
                Cow::Owned(SceneNode::Infinity)
            }
        }
        SceneNode::Cube(cube) => {
            if sphere_intersects(volume, &cube.sphere_bounds()) && cube_intersects(cube, volume) {
                Cow::Borrowed(node)
            } else {
                tracing::trace!("Culled cube at {}", cube.center);
                Cow::Owned(SceneNode::Infinity)
            }
        }
        SceneNode::Color { tint, child } => {
            let pruned = prune(child, volume);
            // A color around nothing is nothing, even if the child was
            // already Infinity before pruning.
            if pruned.is_infinity() {
                return Cow::Owned(SceneNode::Infinity);
            }
            match pruned {
                Cow::Borrowed(_) => Cow::Borrowed(node),
                Cow::Owned(pruned) => Cow::Owned(SceneNode::Color {
                    tint: *tint,
                    child: Box::new(pruned),
                }),
            }
        }
        SceneNode::Union(children) => {
            let survivors: Vec<Cow<'a, SceneNode>> = children
                .iter()
                .map(|child| prune(child, volume))
                .filter(|child| !child.is_infinity())
                .collect();

            let untouched = survivors.len() == children.len()
                && survivors.iter().all(|child| matches!(child, Cow::Borrowed(_)));

            match survivors.len() {
                0 => Cow::Owned(SceneNode::Infinity),
                1 => survivors.into_iter().next().unwrap_or(Cow::Owned(SceneNode::Infinity)),
                _ if untouched => Cow::Borrowed(node),
                _ => Cow::Owned(SceneNode::Union(
                    survivors.into_iter().map(Cow::into_owned).collect(),
                )),
            }
        }
        SceneNode::Infinity | SceneNode::Custom(_) => Cow::Borrowed(node),
    }
}

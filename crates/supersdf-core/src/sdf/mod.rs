//! Scene trees built from distance fields
//!
//! A scene is a tree of [`SceneNode`]s: primitive leaves combined by unions
//! and annotated with colors. Every node answers "how far is the nearest
//! surface from here?", and places with no surface at all answer
//! [`INFINITY`].
//!
//! ## Example
//!
//! ```rust
//! use supersdf_core::prelude::*;
//!
//! let scene = sphere(Vec3::ZERO, 1.0)
//!     .or(cube(Vec3::new(2.0, 0.0, 0.0), Vec3::splat(0.5)))
//!     .tinted(Vec3::new(0.2, 0.8, 0.2));
//! ```

pub mod eval;
pub mod hash;
pub mod primitives;

use std::fmt;
use std::hash::Hasher;
use std::sync::Arc;

use glam::Vec3;

use primitives::{Cube, Sphere};

/// Distance reported where there is no surface at all.
///
/// This is the largest finite `f32`, so it orders correctly against every
/// real distance and never produces NaN in `min`/`max`.
pub const INFINITY: f32 = f32::MAX;

/// A field that can be evaluated and structurally hashed, either a scene
/// node or a user-supplied leaf
pub trait Sdf: Send + Sync + fmt::Debug {
    /// Distance from `p` to this field's surface.
    ///
    /// Fields with no geometry report [`INFINITY`]. Spheres go negative
    /// inside; the approximate cube never does.
    fn distance(&self, p: Vec3) -> f32;

    /// Feed a deterministic description of this shape into `state`.
    ///
    /// Two values that write the same bytes are considered structurally
    /// equal by [`hash::equivalent`].
    fn hash_structure(&self, state: &mut dyn Hasher);
}

/// A node of the scene tree.
///
/// Trees are plain values: every node owns its children, nothing is shared
/// between nodes (except the immutable field behind [`SceneNode::Custom`]),
/// and nothing is mutated after construction.
#[derive(Debug, Clone)]
pub enum SceneNode {
    Sphere(Sphere),
    Cube(Cube),
    /// Nearest of all children. An empty union has no surface.
    Union(Vec<SceneNode>),
    /// Associates a tint with the region owned by `child`.
    ///
    /// Color carries no geometry of its own: [`SceneNode::distance`] reports
    /// [`INFINITY`] for it. Only the shader generator looks through it.
    Color { tint: Vec3, child: Box<SceneNode> },
    /// No surface anywhere.
    Infinity,
    /// A user-supplied field the library knows nothing about.
    ///
    /// It evaluates and hashes through its own [`Sdf`] impl, survives
    /// optimization unchanged and cannot be lowered to shader code.
    Custom(Arc<dyn Sdf>),
}

impl SceneNode {
    /// Short lowercase name of the node kind, used in logs and errors
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Sphere(_) => "sphere",
            Self::Cube(_) => "cube",
            Self::Union(_) => "union",
            Self::Color { .. } => "color",
            Self::Infinity => "infinity",
            Self::Custom(_) => "custom",
        }
    }

    /// `true` for the [`SceneNode::Infinity`] sentinel itself.
    ///
    /// An empty union evaluates like infinity but is not reported here; the
    /// optimizer never produces one.
    pub fn is_infinity(&self) -> bool {
        matches!(self, Self::Infinity)
    }

    /// Wrap this node in a color annotation
    pub fn tinted(self, tint: Vec3) -> SceneNode {
        color(tint, self)
    }

    /// Union with another node.
    ///
    /// Appends to `self` when it is already a union so chains stay flat.
    pub fn or(self, other: SceneNode) -> SceneNode {
        match self {
            Self::Union(mut children) => {
                children.push(other);
                Self::Union(children)
            }
            node => Self::Union(vec![node, other]),
        }
    }

    /// Number of nodes in this tree, including `self`
    pub fn node_count(&self) -> usize {
        match self {
            Self::Union(children) => 1 + children.iter().map(SceneNode::node_count).sum::<usize>(),
            Self::Color { child, .. } => 1 + child.node_count(),
            _ => 1,
        }
    }
}

impl Sdf for SceneNode {
    fn distance(&self, p: Vec3) -> f32 {
        eval::distance(self, p)
    }

    fn hash_structure(&self, state: &mut dyn Hasher) {
        hash::hash_node(self, state);
    }
}

impl From<Sphere> for SceneNode {
    fn from(sphere: Sphere) -> Self {
        Self::Sphere(sphere)
    }
}

impl From<Cube> for SceneNode {
    fn from(cube: Cube) -> Self {
        Self::Cube(cube)
    }
}

// ============================================================================
// Constructor functions (ergonomic API)
// ============================================================================

/// Create a sphere with given center and radius
pub fn sphere(center: Vec3, radius: f32) -> SceneNode {
    SceneNode::Sphere(Sphere::new(center, radius))
}

/// Create an axis-aligned cube with given center and per-axis half-extents
pub fn cube(center: Vec3, half_size: Vec3) -> SceneNode {
    SceneNode::Cube(Cube::new(center, half_size))
}

/// Create a union of the given children, in order
pub fn union(children: impl IntoIterator<Item = SceneNode>) -> SceneNode {
    SceneNode::Union(children.into_iter().collect())
}

/// Annotate `child` with an RGB tint
pub fn color(tint: Vec3, child: SceneNode) -> SceneNode {
    SceneNode::Color {
        tint,
        child: Box::new(child),
    }
}

/// The empty scene
pub fn infinity() -> SceneNode {
    SceneNode::Infinity
}

/// Wrap a user-supplied field as an opaque scene leaf
pub fn custom<S: Sdf + 'static>(field: S) -> SceneNode {
    SceneNode::Custom(Arc::new(field))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_flattens_into_existing_union() {
        let scene = sphere(Vec3::ZERO, 1.0)
            .or(sphere(Vec3::X, 1.0))
            .or(infinity());

        match scene {
            SceneNode::Union(children) => assert_eq!(children.len(), 3),
            other => panic!("expected union, got {}", other.kind()),
        }
    }

    #[test]
    fn node_count_includes_wrappers() {
        let scene = union([
            sphere(Vec3::ZERO, 1.0),
            sphere(Vec3::X, 1.0).tinted(Vec3::X),
        ]);
        assert_eq!(scene.node_count(), 4);
    }

    #[test]
    fn empty_union_is_not_the_sentinel_node() {
        assert!(!union([]).is_infinity());
        assert!(infinity().is_infinity());
    }
}

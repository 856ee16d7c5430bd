//! # SuperSDF Core
//!
//! Scene trees of implicit surfaces for sphere-marched rendering.
//!
//! A scene is a [`SceneNode`](sdf::SceneNode) tree built from primitives
//! (spheres, cubes) and combinators (unions, color annotations). Trees can be
//! evaluated on the CPU, compared by structural hash, and pruned against a
//! bounding volume before being lowered to shader code by `supersdf-glsl`.
//!
//! ## Quick Start
//!
//! ```rust
//! use supersdf_core::prelude::*;
//!
//! let scene = union([
//!     sphere(Vec3::ZERO, 1.0),
//!     sphere(Vec3::new(1.0, 0.0, 0.0), 1.0).tinted(Vec3::new(1.0, 0.0, 0.0)),
//! ]);
//!
//! let d = scene.distance(Vec3::new(0.0, 1.1, 0.0));
//! assert!((d - 0.1).abs() < 1e-5);
//!
//! // Drop everything that cannot touch the query volume
//! let culled = optimize_intersect(&scene, &BoundingVolume::sphere(Vec3::new(-5.0, 0.0, 0.0), 1.0));
//! assert!(culled.is_infinity());
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: Arbitrary units, `f32` for GPU parity
//! - **Colors**: Linear RGB in `[0, 1]`, stored as `Vec3`
//! - **Coordinate system**: Right-handed, Y-up

pub mod optimize;
pub mod sdf;

/// Prelude module for convenient imports
pub mod prelude {
    // Scene tree
    pub use crate::sdf::{
        INFINITY, SceneNode, Sdf, color, cube, custom, infinity, primitives::*, sphere, union,
    };

    // Hashing
    pub use crate::sdf::hash::{equivalent, structural_hash};

    // Pruning
    pub use crate::optimize::{BoundingVolume, optimize_intersect, sphere_intersects};

    // Math (re-export glam)
    pub use glam::Vec3;
}

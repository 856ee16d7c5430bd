//! SuperSDF GLSL - raymarching shader generation
//!
//! Lowers [`SceneNode`](supersdf_core::sdf::SceneNode) trees into GLSL 410
//! fragment shaders. Two shader shapes are available:
//!
//! - [`ShaderForm::Distance`] - one nested `min(...)` expression, geometry only
//! - [`ShaderForm::Color`] - a statement sequence tracking distance and color
//!
//! ## Example
//!
//! ```rust
//! use supersdf_core::prelude::*;
//! use supersdf_glsl::{ShaderForm, build_shader};
//!
//! let scene = union([
//!     sphere(Vec3::ZERO, 1.0),
//!     sphere(Vec3::new(2.0, 0.0, 0.0), 1.0).tinted(Vec3::new(1.0, 0.0, 0.0)),
//! ]);
//!
//! let shader = build_shader(&scene, ShaderForm::Color)?;
//! assert!(shader.contains("sd_sphere(p, vec3(2.0, 0.0, 0.0), 1.0)"));
//! # Ok::<(), supersdf_glsl::Error>(())
//! ```

mod error;
mod glsl_gen;

pub use error::{Error, Result};
pub use glsl_gen::{
    GlslGenerator, HIT_THRESHOLD, MARCH_STEPS, SCENE_PLACEHOLDER, STEP_SCALE, ShaderForm,
    build_shader, distance_expression, get_base_shader, inject_scene_sdf,
};

//! Scene tree to GLSL code generator
//!
//! Converts [`SceneNode`] trees to GLSL and splices the result into a fixed
//! raymarching fragment shader.

// String writing is infallible, so .unwrap() is safe here
// Format args inlining is not always more readable for shader code generation
#![allow(clippy::unwrap_used)]
#![allow(clippy::uninlined_format_args)]

use std::fmt::Write;

use supersdf_core::prelude::{Cube, SceneNode, Sphere, Vec3};

use crate::{Error, Result};

/// Marker line in the templates that receives the generated scene code
pub const SCENE_PLACEHOLDER: &str = "// SDF_INNER";

/// Raymarch iterations per fragment
pub const MARCH_STEPS: u32 = 20;

/// Factor applied to each distance step along the ray
pub const STEP_SCALE: f32 = 1.2;

/// Distance below which the ray counts as a hit
pub const HIT_THRESHOLD: f32 = 0.1;

/// Which shader shape to generate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShaderForm {
    /// Single nested-`min` distance expression. Colors are ignored.
    #[default]
    Distance,
    /// Statement sequence that tracks the nearest surface's color.
    Color,
}

/// Format a scalar so it parses back to the same `f32`.
///
/// `Debug` gives the shortest round-tripping representation and always
/// includes a decimal point or exponent, which GLSL needs to read it as float.
fn literal(value: f32) -> Result<String> {
    if value.is_finite() {
        Ok(format!("{:?}", value))
    } else {
        Err(Error::NonFiniteLiteral { value })
    }
}

fn vec3_literal(v: Vec3) -> Result<String> {
    Ok(format!(
        "vec3({}, {}, {})",
        literal(v.x)?,
        literal(v.y)?,
        literal(v.z)?
    ))
}

fn sphere_call(sphere: &Sphere) -> Result<String> {
    Ok(format!(
        "sd_sphere(p, {}, {})",
        vec3_literal(sphere.center)?,
        literal(sphere.radius)?
    ))
}

fn cube_call(cube: &Cube) -> Result<String> {
    Ok(format!(
        "sd_cube(p, {}, {})",
        vec3_literal(cube.center)?,
        vec3_literal(cube.half_size)?
    ))
}

/// Lower a tree to a single GLSL distance expression.
///
/// Unions of N children become N-1 nested `min` calls, in child order.
/// Color annotations are looked through and dropped.
pub fn distance_expression(node: &SceneNode) -> Result<String> {
    match node {
        SceneNode::Sphere(sphere) => sphere_call(sphere),
        SceneNode::Cube(cube) => cube_call(cube),
        SceneNode::Color { child, .. } => distance_expression(child),
        SceneNode::Union(children) => {
            let mut exprs = children
                .iter()
                .map(distance_expression)
                .collect::<Result<Vec<_>>>()?;

            let Some(last) = exprs.pop() else {
                return Ok("sd_infinity()".to_string());
            };
            Ok(exprs
                .into_iter()
                .rev()
                .fold(last, |acc, expr| format!("min({}, {})", expr, acc)))
        }
        SceneNode::Infinity => Ok("sd_infinity()".to_string()),
        SceneNode::Custom(_) => Err(Error::UnsupportedNode { kind: node.kind() }),
    }
}

/// Generates the color-tracking statement form.
///
/// Temporaries are numbered from a per-generator counter so nested unions
/// never shadow each other.
pub struct GlslGenerator {
    var_counter: usize,
}

impl GlslGenerator {
    pub fn new() -> Self {
        Self { var_counter: 0 }
    }

    fn next_var(&mut self) -> usize {
        let var = self.var_counter;
        self.var_counter += 1;
        var
    }

    /// Generate statements that leave the scene's distance in `d` and its
    /// color in `color`, the locals declared by the color template.
    pub fn generate(&mut self, scene: &SceneNode) -> Result<String> {
        self.var_counter = 0;
        let mut code = String::new();
        self.generate_op(scene, "d", "color", 1, &mut code)?;
        Ok(code)
    }

    /// Write code assigning `node`'s distance to `dist` and its color to
    /// `color`.
    fn generate_op(
        &mut self,
        node: &SceneNode,
        dist: &str,
        color: &str,
        depth: usize,
        code: &mut String,
    ) -> Result<()> {
        let indent = "    ".repeat(depth);
        match node {
            SceneNode::Sphere(sphere) => {
                writeln!(code, "{}{} = {};", indent, dist, sphere_call(sphere)?).unwrap();
            }
            SceneNode::Cube(cube) => {
                writeln!(code, "{}{} = {};", indent, dist, cube_call(cube)?).unwrap();
            }
            SceneNode::Color { tint, child } => {
                writeln!(
                    code,
                    "{}{} = vec4({}, {}, {}, 1.0);",
                    indent,
                    color,
                    literal(tint.x)?,
                    literal(tint.y)?,
                    literal(tint.z)?
                )
                .unwrap();
                self.generate_op(child, dist, color, depth, code)?;
            }
            SceneNode::Union(children) => match children.as_slice() {
                [] => {
                    writeln!(code, "{}{} = sd_infinity();", indent, dist).unwrap();
                }
                [only] => self.generate_op(only, dist, color, depth, code)?,
                [first, rest @ ..] => {
                    // Uncolored children take the color in effect here, not
                    // whatever an earlier sibling left behind.
                    let base = format!("base{}", self.next_var());
                    writeln!(code, "{}vec4 {} = {};", indent, base, color).unwrap();
                    self.generate_op(first, dist, color, depth, code)?;

                    for child in rest {
                        let n = self.next_var();
                        let child_dist = format!("d{}", n);
                        let child_color = format!("c{}", n);

                        writeln!(code, "{}{{", indent).unwrap();
                        writeln!(code, "{}    float {} = sd_infinity();", indent, child_dist)
                            .unwrap();
                        writeln!(code, "{}    vec4 {} = {};", indent, child_color, base).unwrap();
                        self.generate_op(child, &child_dist, &child_color, depth + 1, code)?;
                        writeln!(code, "{}    if ({} < {}) {{", indent, child_dist, dist).unwrap();
                        writeln!(code, "{}        {} = {};", indent, dist, child_dist).unwrap();
                        writeln!(code, "{}        {} = {};", indent, color, child_color).unwrap();
                        writeln!(code, "{}    }}", indent).unwrap();
                        writeln!(code, "{}}}", indent).unwrap();
                    }
                }
            },
            SceneNode::Infinity => {
                writeln!(code, "{}{} = sd_infinity();", indent, dist).unwrap();
            }
            SceneNode::Custom(_) => return Err(Error::UnsupportedNode { kind: node.kind() }),
        }
        Ok(())
    }
}

impl Default for GlslGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Get the fixed fragment shader for a form, placeholder still in place
pub fn get_base_shader(form: ShaderForm) -> &'static str {
    match form {
        ShaderForm::Distance => include_str!("shaders/raymarch_distance.frag"),
        ShaderForm::Color => include_str!("shaders/raymarch_color.frag"),
    }
}

/// Replace the scene placeholder in `base_shader` with `scene_code`.
///
/// Exactly the first occurrence is replaced; a template without the marker
/// is an error rather than a shader with no scene.
pub fn inject_scene_sdf(base_shader: &str, scene_code: &str) -> Result<String> {
    if !base_shader.contains(SCENE_PLACEHOLDER) {
        return Err(Error::MissingPlaceholder {
            marker: SCENE_PLACEHOLDER,
        });
    }
    Ok(base_shader.replacen(SCENE_PLACEHOLDER, scene_code.trim(), 1))
}

/// Build a complete fragment shader from a scene tree
pub fn build_shader(scene: &SceneNode, form: ShaderForm) -> Result<String> {
    let scene_code = match form {
        ShaderForm::Distance => distance_expression(scene)?,
        ShaderForm::Color => GlslGenerator::new().generate(scene)?,
    };

    let shader = inject_scene_sdf(get_base_shader(form), &scene_code)?;
    tracing::debug!(
        "Generated {:?} shader: {} bytes for {} scene nodes",
        form,
        shader.len(),
        scene.node_count()
    );
    Ok(shader)
}

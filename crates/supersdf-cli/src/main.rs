//! SuperSDF CLI - compile, query and inspect SDF scene trees

mod scenes;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use scenes::SceneName;
use supersdf_core::prelude::*;
use supersdf_core::sdf::eval::distances;
use supersdf_glsl::{HIT_THRESHOLD, ShaderForm, build_shader};

#[derive(Parser)]
#[command(name = "supersdf")]
#[command(about = "Compile SDF scene trees into raymarching shaders", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a scene into a GLSL fragment shader
    Shader {
        /// Scene to compile
        #[arg(short, long, value_enum, default_value = "demo")]
        scene: SceneName,

        /// Shader shape to generate
        #[arg(short, long, value_enum, default_value = "color")]
        form: FormArg,

        /// Prune the scene to a sphere before compiling
        #[arg(long, num_args = 4, value_names = ["X", "Y", "Z", "RADIUS"], allow_negative_numbers = true)]
        cull: Option<Vec<f32>>,

        /// Output file (prints to stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Evaluate the scene's distance at a point
    Distance {
        /// Scene to evaluate
        #[arg(short, long, value_enum, default_value = "pair")]
        scene: SceneName,

        #[arg(allow_negative_numbers = true)]
        x: f32,

        #[arg(allow_negative_numbers = true)]
        y: f32,

        #[arg(allow_negative_numbers = true)]
        z: f32,
    },

    /// Print the structural hash of a scene
    Hash {
        /// Scene to hash
        #[arg(short, long, value_enum, default_value = "demo")]
        scene: SceneName,

        /// Prune the scene to a sphere before hashing
        #[arg(long, num_args = 4, value_names = ["X", "Y", "Z", "RADIUS"], allow_negative_numbers = true)]
        cull: Option<Vec<f32>>,
    },

    /// Draw an ASCII slice of the distance field in the XY plane
    Slice {
        /// Scene to draw
        #[arg(short, long, value_enum, default_value = "pair")]
        scene: SceneName,

        /// Z coordinate of the slice
        #[arg(long, default_value = "0.0", allow_negative_numbers = true)]
        z: f32,

        /// Characters per row and rows per slice
        #[arg(long, default_value = "32")]
        size: usize,

        /// Half-width of the sampled square
        #[arg(long, default_value = "3.0")]
        extent: f32,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormArg {
    /// Nested min() expression, geometry only
    Distance,
    /// Statement sequence with color tracking
    Color,
}

impl From<FormArg> for ShaderForm {
    fn from(form: FormArg) -> Self {
        match form {
            FormArg::Distance => ShaderForm::Distance,
            FormArg::Color => ShaderForm::Color,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Shader {
            scene,
            form,
            cull,
            output,
        } => {
            run_shader(scene, form.into(), cull.as_deref(), output.as_deref())?;
        }
        Commands::Distance { scene, x, y, z } => {
            run_distance(scene, Vec3::new(x, y, z));
        }
        Commands::Hash { scene, cull } => {
            run_hash(scene, cull.as_deref())?;
        }
        Commands::Slice {
            scene,
            z,
            size,
            extent,
        } => {
            run_slice(scene, z, size, extent)?;
        }
    }

    Ok(())
}

/// Build the named scene, pruned to `cull` when given
fn load_scene(name: SceneName, cull: Option<&[f32]>) -> Result<SceneNode> {
    let scene = name.build();
    let Some(cull) = cull else {
        return Ok(scene);
    };

    let [x, y, z, radius] = cull else {
        bail!("--cull takes exactly four values: X Y Z RADIUS");
    };
    if *radius < 0.0 {
        bail!("Cull radius must not be negative, got {}", radius);
    }

    let volume = BoundingVolume::sphere(Vec3::new(*x, *y, *z), *radius);
    Ok(optimize_intersect(&scene, &volume))
}

fn run_shader(
    name: SceneName,
    form: ShaderForm,
    cull: Option<&[f32]>,
    output: Option<&Path>,
) -> Result<()> {
    let scene = load_scene(name, cull)?;
    let shader = build_shader(&scene, form)
        .with_context(|| format!("Failed to compile scene '{:?}'", name))?;

    match output {
        Some(path) => {
            std::fs::write(path, &shader)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} bytes of GLSL to {}", shader.len(), path.display());
        }
        None => println!("{}", shader),
    }

    Ok(())
}

fn run_distance(name: SceneName, p: Vec3) {
    let scene = name.build();
    let d = scene.distance(p);

    if d == INFINITY {
        println!("no surface (color annotations carry no geometry)");
    } else {
        println!("{}", d);
    }
}

fn run_hash(name: SceneName, cull: Option<&[f32]>) -> Result<()> {
    let scene = load_scene(name, cull)?;
    println!("{:016x}", structural_hash(&scene));
    Ok(())
}

fn run_slice(name: SceneName, z: f32, size: usize, extent: f32) -> Result<()> {
    if size < 2 {
        bail!("Slice size must be at least 2, got {}", size);
    }

    let scene = name.build();
    let step = 2.0 * extent / (size - 1) as f32;

    // Rows run top to bottom, so y decreases
    let points: Vec<Vec3> = (0..size)
        .flat_map(|row| {
            (0..size).map(move |col| {
                Vec3::new(
                    -extent + col as f32 * step,
                    extent - row as f32 * step,
                    z,
                )
            })
        })
        .collect();

    let field = distances(&scene, &points);
    for row in field.chunks(size) {
        let line: String = row.iter().map(|&d| shade(d)).collect();
        println!("{}", line);
    }

    Ok(())
}

fn shade(d: f32) -> char {
    if d == INFINITY {
        ' '
    } else if d <= 0.0 {
        '#'
    } else if d < HIT_THRESHOLD {
        '+'
    } else if d < 1.0 {
        '.'
    } else {
        ' '
    }
}

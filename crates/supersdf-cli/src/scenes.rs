//! Built-in scenes for the command line

use clap::ValueEnum;
use supersdf_core::prelude::*;

/// Scenes selectable with `--scene`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SceneName {
    /// Four tinted spheres around the origin
    Demo,
    /// Two overlapping unit spheres on the X axis
    Pair,
    /// Spheres, a tinted sphere and a small box
    Mixed,
}

impl SceneName {
    pub fn build(self) -> SceneNode {
        match self {
            Self::Demo => union([
                sphere(Vec3::ZERO, 1.0).tinted(Vec3::new(1.0, 0.0, 0.0)),
                sphere(Vec3::new(2.0, 0.0, 0.0), 1.0).tinted(Vec3::new(0.0, 0.0, 1.0)),
                sphere(Vec3::new(1.0, 1.5, 0.0), 1.0).tinted(Vec3::new(0.0, 1.0, 0.0)),
                sphere(Vec3::new(1.0, 0.0, 1.0), 1.0).tinted(Vec3::ONE),
            ]),
            Self::Pair => union([
                sphere(Vec3::ZERO, 1.0),
                sphere(Vec3::new(1.0, 0.0, 0.0), 1.0),
            ]),
            Self::Mixed => union([
                sphere(Vec3::new(0.0, -1.0, 1.0), 1.0),
                sphere(Vec3::new(1.0, 0.0, 0.0), 1.0),
                sphere(Vec3::new(1.0, 3.0, 0.0), 1.5).tinted(Vec3::new(1.0, 0.0, 0.0)),
                cube(Vec3::new(0.5, 0.5, 0.5), Vec3::new(0.1, 0.2, 0.3)),
            ]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_scene_has_distinct_structure() {
        let hashes: Vec<u64> = SceneName::value_variants()
            .iter()
            .map(|name| structural_hash(&name.build()))
            .collect();

        for (i, a) in hashes.iter().enumerate() {
            for b in &hashes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn demo_scene_is_all_color() {
        // Every sphere is tinted, so the CPU sees no geometry at all
        let demo = SceneName::Demo.build();
        assert_eq!(demo.distance(Vec3::ZERO), INFINITY);
    }
}

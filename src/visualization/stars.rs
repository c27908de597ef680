//! Background star field
//!
//! Two point-cloud layers scattered in a cube around the scene, leaving a clear
//! sphere around the globe. Layers spin slowly and lean toward the cursor.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::PrimitiveTopology;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::globe::easing::smoothing_factor;

#[derive(Debug, Clone)]
pub struct StarLayerSpec {
    pub count: usize,
    /// Edge length of the cube the stars are scattered in.
    pub extent: f32,
    /// Stars closer than this to the origin are dropped.
    pub clear_radius: f32,
    pub color: Color,
    pub spin_per_frame: f32,
    pub parallax: f32,
}

#[derive(Resource, Debug, Clone)]
pub struct StarFieldConfig {
    pub seed: u64,
    pub layers: Vec<StarLayerSpec>,
    pub parallax_smoothing: f32,
}

impl Default for StarFieldConfig {
    fn default() -> Self {
        Self {
            seed: 0x5eed_57a2,
            layers: vec![
                StarLayerSpec {
                    count: 4000,
                    extent: 400.0,
                    clear_radius: 30.0,
                    color: Color::srgba(1.0, 1.0, 1.0, 0.8),
                    spin_per_frame: 0.00008,
                    parallax: 0.05,
                },
                StarLayerSpec {
                    count: 150,
                    extent: 350.0,
                    clear_radius: 35.0,
                    color: Color::srgba(0.0, 0.83, 1.0, 0.5),
                    spin_per_frame: -0.0001,
                    parallax: 0.1,
                },
            ],
            parallax_smoothing: 0.05,
        }
    }
}

#[derive(Component, Debug, Default)]
pub struct StarLayer {
    pub spin_per_frame: f32,
    pub parallax: f32,
    spin: f32,
    lean: Vec2,
}

/// Seeded so the sky is identical between runs.
pub fn star_positions(spec: &StarLayerSpec, seed: u64) -> Vec<Vec3> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..spec.count)
        .map(|_| {
            Vec3::new(
                rng.gen_range(-0.5_f32..0.5) * spec.extent,
                rng.gen_range(-0.5_f32..0.5) * spec.extent,
                rng.gen_range(-0.5_f32..0.5) * spec.extent,
            )
        })
        .filter(|p| p.length() > spec.clear_radius)
        .collect()
}

pub fn spawn_star_field(
    mut commands: Commands,
    config: Res<StarFieldConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (i, spec) in config.layers.iter().enumerate() {
        let positions = star_positions(spec, config.seed.wrapping_add(i as u64));
        let count = positions.len();

        let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);

        commands.spawn((
            Mesh3d(meshes.add(mesh)),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: spec.color,
                alpha_mode: AlphaMode::Blend,
                unlit: true,
                ..default()
            })),
            Transform::default(),
            StarLayer {
                spin_per_frame: spec.spin_per_frame,
                parallax: spec.parallax,
                ..default()
            },
            Name::new(format!("Star layer {i}")),
        ));
        debug!("star layer {} spawned with {} stars", i, count);
    }
}

/// Cursor position mapped to `[-1, 1]` on both axes, +Y up.
fn normalized_cursor(window: &Window) -> Option<Vec2> {
    let cursor = window.cursor_position()?;
    let size = window.size();
    if size.x <= 0.0 || size.y <= 0.0 {
        return None;
    }
    Some(Vec2::new(
        cursor.x / size.x * 2.0 - 1.0,
        -(cursor.y / size.y) * 2.0 + 1.0,
    ))
}

pub fn animate_star_field(
    time: Res<Time>,
    config: Res<StarFieldConfig>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut layers: Query<(&mut StarLayer, &mut Transform)>,
) {
    let cursor = windows
        .single()
        .ok()
        .and_then(normalized_cursor)
        .unwrap_or(Vec2::ZERO);
    let k = smoothing_factor(config.parallax_smoothing, time.delta_secs());

    for (mut layer, mut transform) in layers.iter_mut() {
        layer.spin += layer.spin_per_frame;
        let target = cursor * layer.parallax;
        layer.lean = layer.lean.lerp(target, k);

        // cursor x leans around Y, cursor y around X
        transform.rotation =
            Quat::from_euler(EulerRot::XYZ, layer.lean.y, layer.spin + layer.lean.x, 0.0);
    }
}

pub struct StarFieldPlugin;

impl Plugin for StarFieldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<StarFieldConfig>()
            .add_systems(Startup, spawn_star_field)
            .add_systems(Update, animate_star_field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_positions_are_deterministic() {
        let spec = StarFieldConfig::default().layers[0].clone();
        assert_eq!(star_positions(&spec, 7), star_positions(&spec, 7));
        assert_ne!(star_positions(&spec, 7), star_positions(&spec, 8));
    }

    #[test]
    fn test_star_positions_keep_clear_of_globe() {
        let spec = StarFieldConfig::default().layers[1].clone();
        let stars = star_positions(&spec, 42);
        assert!(!stars.is_empty());
        assert!(stars.len() <= spec.count);
        for p in &stars {
            assert!(p.length() > spec.clear_radius);
            assert!(p.abs().max_element() <= spec.extent / 2.0);
        }
    }
}

//! Globe module
//!
//! A globe is an owned entity tree: a root carrying its `GlobeConfig` and
//! `RotationController`, with surface, glow shells and pins as children.
//! Callers steer a specific globe through `FocusRequest` and `HighlightPin`
//! messages addressed by its entity.

use bevy::prelude::*;

use crate::core::coordinates::GeoPoint;
use crate::visualization::AtmosphereMaterial;
use crate::visualization::earth::{AtmosphereShell, GlobeSurface, spawn_atmosphere, spawn_surface};

pub mod config;
pub mod controller;
pub mod easing;
pub mod input;
pub mod pins;

pub use config::GlobeConfig;
pub use controller::RotationController;
pub use pins::HighlightPin;

/// Root marker of a globe entity tree.
#[derive(Component)]
pub struct Globe;

/// Overall opacity of a globe in `[0, 1]`, applied to its surface, pins and wireframe.
#[derive(Component, Debug, Clone, Copy)]
pub struct GlobeOpacity(pub f32);

impl Default for GlobeOpacity {
    fn default() -> Self {
        Self(1.0)
    }
}

/// Ask `globe` to turn toward a location. `duration_s` falls back to the globe's default.
#[derive(Message, Debug, Clone, Copy)]
pub struct FocusRequest {
    pub globe: Entity,
    pub location: GeoPoint,
    pub duration_s: Option<f32>,
}

/// Spawns a globe and returns its root entity.
pub fn spawn_globe(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    atmospheres: &mut Assets<AtmosphereMaterial>,
    asset_server: &AssetServer,
    config: GlobeConfig,
    locations: &[(String, GeoPoint)],
    transform: Transform,
) -> Entity {
    let controller = RotationController::new(config.controller_settings());
    let globe = commands
        .spawn((
            Globe,
            controller,
            GlobeOpacity::default(),
            transform,
            Visibility::default(),
            Name::new("Globe"),
        ))
        .id();

    spawn_surface(commands, meshes, materials, asset_server, globe, &config);
    if config.capabilities.atmosphere {
        spawn_atmosphere(commands, meshes, atmospheres, globe, &config);
    }
    if config.capabilities.pins {
        pins::spawn_pins(commands, meshes, materials, globe, &config, locations);
    }

    info!(
        "globe spawned: radius={} pins={} interactive={}",
        config.radius,
        if config.capabilities.pins { locations.len() } else { 0 },
        config.capabilities.interactive
    );
    commands.entity(globe).insert(config);
    globe
}

pub fn apply_focus_requests(
    mut requests: MessageReader<FocusRequest>,
    mut globes: Query<(&GlobeConfig, &mut RotationController), With<Globe>>,
) {
    for request in requests.read() {
        let Ok((config, mut controller)) = globes.get_mut(request.globe) else {
            continue;
        };
        let duration = request.duration_s.unwrap_or(config.focus_duration_s);
        controller.rotate_to(request.location.latitude, request.location.longitude, duration);
        debug!(
            "focusing {:?} on ({:.3}, {:.3}) over {}s",
            request.globe, request.location.latitude, request.location.longitude, duration
        );
    }
}

/// Advances every controller one frame and writes the orientation to its transform.
pub fn tick_globe_rotation(
    time: Res<Time>,
    mut globes: Query<(&mut RotationController, &mut Transform), With<Globe>>,
) {
    let dt = time.delta_secs();
    let now = time.elapsed_secs_f64();
    for (mut controller, mut transform) in globes.iter_mut() {
        controller.tick(dt, now);
        transform.rotation = controller.orientation();
    }
}

/// Pushes each globe's opacity into its surface and glow shell materials.
pub fn sync_globe_opacity(
    globes: Query<&GlobeOpacity, (With<Globe>, Changed<GlobeOpacity>)>,
    surfaces: Query<(&ChildOf, &MeshMaterial3d<StandardMaterial>), With<GlobeSurface>>,
    shells: Query<(&ChildOf, &MeshMaterial3d<AtmosphereMaterial>), With<AtmosphereShell>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut atmospheres: ResMut<Assets<AtmosphereMaterial>>,
) {
    for (child_of, material) in surfaces.iter() {
        let Ok(opacity) = globes.get(child_of.parent()) else {
            continue;
        };
        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color.set_alpha(opacity.0.clamp(0.0, 1.0));
        }
    }
    for (child_of, material) in shells.iter() {
        let Ok(opacity) = globes.get(child_of.parent()) else {
            continue;
        };
        if let Some(mat) = atmospheres.get_mut(&material.0) {
            mat.params.opacity = opacity.0.clamp(0.0, 1.0);
        }
    }
}

/// Plugin for globe input, rotation and pin animation
pub struct GlobePlugin;

impl Plugin for GlobePlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<FocusRequest>()
            .add_message::<HighlightPin>()
            .add_systems(
                Update,
                (
                    input::drag_input_system,
                    apply_focus_requests,
                    input::window_focus_system,
                    tick_globe_rotation,
                    pins::apply_highlight_requests,
                    pins::animate_pin_highlights,
                    pins::pulse_pin_glows,
                    sync_globe_opacity,
                )
                    .chain(),
            );
    }
}

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{RenderCreation, WgpuSettings};
use bevy::window::{PresentMode, Window, WindowPlugin};

use bevy_feathers::FeathersPlugins;
use bevy_input_focus::directional_navigation::DirectionalNavigationPlugin;

#[cfg(feature = "dev")]
use bevy::dev_tools::fps_overlay::FpsOverlayPlugin;

mod core;
mod globe;
mod journey;
mod ui;
mod visualization;

use globe::GlobePlugin;
use journey::JourneyPlugin;
use ui::UiPlugin;
use visualization::VisualizationPlugin;

/// Camera distance from the globe center, in globe-radius units of 5
const CAMERA_DISTANCE: f32 = 15.0;

fn setup_camera(mut commands: Commands) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45.0_f32.to_radians(),
            near: 0.1,
            // Outermost star layer sits a few hundred units out
            far: 1_000.0,
            ..default()
        }),
        Camera {
            order: 0,
            clear_color: ClearColorConfig::Custom(Color::BLACK),
            ..default()
        },
        Tonemapping::TonyMcMapface,
        Transform::from_xyz(0.0, 0.0, CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Main camera"),
    ));
}

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Journey Globe".to_string(),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            })
            .set(RenderPlugin {
                render_creation: RenderCreation::Automatic(WgpuSettings { ..default() }),
                ..default()
            }),
    );

    #[cfg(feature = "dev")]
    app.add_plugins(FpsOverlayPlugin::default());

    app.add_plugins(FeathersPlugins);
    app.add_plugins(DirectionalNavigationPlugin);
    app.add_plugins(MeshPickingPlugin);

    app.add_plugins(UiPlugin);
    app.add_plugins(VisualizationPlugin);
    app.add_plugins(GlobePlugin);
    app.add_plugins(JourneyPlugin);
    app.add_systems(Startup, setup_camera);

    app.run();
}

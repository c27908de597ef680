//! Scene lighting: sun, cyan accent and a violet rim light behind the globe

use bevy::light::GlobalAmbientLight;
use bevy::prelude::*;

pub fn spawn_lights(mut commands: Commands) {
    commands.insert_resource(GlobalAmbientLight {
        color: Color::WHITE,
        brightness: 250.0,
        ..default()
    });

    commands.spawn((
        DirectionalLight {
            illuminance: 6_000.0,
            ..default()
        },
        Transform::from_xyz(10.0, 5.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        Name::new("Sun"),
    ));

    commands.spawn((
        PointLight {
            color: Color::srgb(0.0, 0.83, 1.0),
            intensity: 400_000.0,
            range: 50.0,
            ..default()
        },
        Transform::from_xyz(-10.0, 0.0, 10.0),
        Name::new("Accent light"),
    ));

    commands.spawn((
        PointLight {
            color: Color::srgb(0.29, 0.0, 0.88),
            intensity: 250_000.0,
            range: 50.0,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, -15.0),
        Name::new("Rim light"),
    ));
}

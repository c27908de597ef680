//! Globe surface and glow shells

use bevy::prelude::*;

use crate::globe::config::GlobeConfig;
use crate::visualization::atmosphere::{
    AtmosphereMaterial, INNER_SHELL_OFFSET, OUTER_SHELL_OFFSET,
};

/// Equirectangular night image, provided by the deployment under `assets/`.
/// Without it the surface falls back to its untextured base color.
const EARTH_TEXTURE: &str = "textures/earth_night.png";

/// Surface mesh of a globe; its material alpha follows the globe opacity.
#[derive(Component)]
pub struct GlobeSurface;

/// Glow shell of a globe.
#[derive(Component)]
pub struct AtmosphereShell;

pub fn spawn_surface(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    asset_server: &AssetServer,
    globe: Entity,
    config: &GlobeConfig,
) -> Entity {
    let segments = config.sphere_segments;
    let mesh = meshes.add(Sphere::new(config.radius).mesh().uv(segments, segments));

    let material = materials.add(surface_material(Some(asset_server.load(EARTH_TEXTURE))));

    commands
        .spawn((
            Mesh3d(mesh),
            MeshMaterial3d(material),
            Transform::default(),
            GlobeSurface,
            Name::new("Globe surface"),
            ChildOf(globe),
        ))
        .id()
}

/// White base so an unloaded texture leaves a plain, still fadeable sphere.
fn surface_material(texture: Option<Handle<Image>>) -> StandardMaterial {
    StandardMaterial {
        base_color: Color::WHITE,
        base_color_texture: texture,
        perceptual_roughness: 0.95,
        reflectance: 0.05,
        alpha_mode: AlphaMode::Blend,
        ..default()
    }
}

pub fn spawn_atmosphere(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    atmospheres: &mut Assets<AtmosphereMaterial>,
    globe: Entity,
    config: &GlobeConfig,
) {
    let unit = config.unit();
    for (offset, material, name) in [
        (INNER_SHELL_OFFSET, AtmosphereMaterial::inner(), "Atmosphere"),
        (OUTER_SHELL_OFFSET, AtmosphereMaterial::outer(), "Outer glow"),
    ] {
        let mesh = meshes.add(Sphere::new(config.radius + offset * unit).mesh().uv(64, 64));
        commands.spawn((
            Mesh3d(mesh),
            MeshMaterial3d(atmospheres.add(material)),
            Transform::default(),
            AtmosphereShell,
            Name::new(name),
            ChildOf(globe),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_texture_path_is_relative_to_asset_root() {
        assert!(!EARTH_TEXTURE.starts_with("assets/"));
        assert!(!EARTH_TEXTURE.starts_with('/'));
        assert!(EARTH_TEXTURE.ends_with(".png"));
    }

    #[test]
    fn test_untextured_surface_stays_white_and_blendable() {
        let material = surface_material(None);
        assert!(material.base_color_texture.is_none());
        assert_eq!(material.base_color, Color::WHITE);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
    }
}

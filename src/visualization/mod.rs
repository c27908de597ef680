//! Visualization module
//!
//! Rendering glue for globes and their surroundings: surface and glow meshes,
//! the graticule wireframe, the star field and scene lights.

use bevy::prelude::*;

pub mod atmosphere;
pub mod earth;
pub mod graticule;
pub mod lighting;
pub mod stars;

pub use atmosphere::{AtmosphereMaterial, AtmospherePlugin};
pub use graticule::draw_graticule;
pub use stars::StarFieldPlugin;

/// Plugin for visualization systems
pub struct VisualizationPlugin;

impl Plugin for VisualizationPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((AtmospherePlugin, StarFieldPlugin))
            .add_systems(Startup, lighting::spawn_lights)
            .add_systems(Update, draw_graticule);
    }
}

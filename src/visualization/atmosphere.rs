//! Atmosphere glow shells
//!
//! Additive, back-face-only spheres slightly larger than the globe. The fragment
//! shader brightens toward the limb based on the view-space normal.

use bevy::mesh::MeshVertexBufferLayoutRef;
use bevy::pbr::{MaterialPipeline, MaterialPipelineKey};
use bevy::prelude::*;
use bevy::render::render_resource::{
    AsBindGroup, Face, RenderPipelineDescriptor, ShaderType, SpecializedMeshPipelineError,
};
use bevy::shader::ShaderRef;

#[derive(ShaderType, Debug, Clone, Copy)]
pub struct AtmosphereParams {
    pub color: Vec4,
    /// Limb threshold; larger values widen the glow.
    pub falloff: f32,
    pub strength: f32,
    pub opacity: f32,
}

#[derive(Asset, TypePath, AsBindGroup, Debug, Clone)]
pub struct AtmosphereMaterial {
    #[uniform(0)]
    pub params: AtmosphereParams,
}

impl AtmosphereMaterial {
    /// Tight cyan halo hugging the surface.
    pub fn inner() -> Self {
        Self {
            params: AtmosphereParams {
                color: Vec4::new(0.0, 0.83, 1.0, 1.0),
                falloff: 0.65,
                strength: 0.8,
                opacity: 1.0,
            },
        }
    }

    /// Wide, faint outer glow.
    pub fn outer() -> Self {
        Self {
            params: AtmosphereParams {
                color: Vec4::new(0.0, 0.6, 1.0, 0.4),
                falloff: 0.4,
                strength: 1.0,
                opacity: 1.0,
            },
        }
    }
}

impl Material for AtmosphereMaterial {
    fn fragment_shader() -> ShaderRef {
        "shaders/atmosphere.wgsl".into()
    }

    fn alpha_mode(&self) -> AlphaMode {
        AlphaMode::Add
    }

    fn specialize(
        _pipeline: &MaterialPipeline,
        descriptor: &mut RenderPipelineDescriptor,
        _layout: &MeshVertexBufferLayoutRef,
        _key: MaterialPipelineKey<Self>,
    ) -> Result<(), SpecializedMeshPipelineError> {
        // Render the inside of the shell so the glow wraps the limb
        descriptor.primitive.cull_mode = Some(Face::Front);
        Ok(())
    }
}

/// Shell radius offsets relative to the radius-5 globe.
pub const INNER_SHELL_OFFSET: f32 = 0.15;
pub const OUTER_SHELL_OFFSET: f32 = 0.4;

pub struct AtmospherePlugin;

impl Plugin for AtmospherePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(MaterialPlugin::<AtmosphereMaterial>::default());
    }
}

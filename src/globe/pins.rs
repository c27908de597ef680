//! Journey pins: markers on the globe surface with highlight and pulse effects

use bevy::prelude::*;
use std::ops::DerefMut;

use crate::core::coordinates::GeoPoint;
use crate::globe::GlobeOpacity;
use crate::globe::config::GlobeConfig;
use crate::globe::easing::{Ease, Tween};

const PIN_COLOR: Color = Color::srgb(0.0, 0.83, 1.0);
const DOT_RADIUS: f32 = 0.08;
const INNER_GLOW_RADIUS: f32 = 0.12;
const OUTER_GLOW_RADIUS: f32 = 0.2;

const HIGHLIGHT_DURATION_S: f32 = 0.5;
const HIGHLIGHT_EASE: Ease = Ease::BackOut(1.7);

const PULSE_RATE: f32 = 2.5;
const PULSE_PHASE_STEP: f32 = 0.8;
const INNER_PULSE_OFFSET: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Highlight {
    #[default]
    Normal,
    Highlighted,
}

impl Highlight {
    fn scale(self) -> f32 {
        match self {
            Highlight::Normal => 1.0,
            Highlight::Highlighted => 2.0,
        }
    }

    fn glow_opacity(self) -> f32 {
        match self {
            Highlight::Normal => 0.2,
            Highlight::Highlighted => 0.5,
        }
    }
}

/// A configured location placed on a globe.
#[derive(Component, Debug, Clone)]
pub struct PinMarker {
    pub index: usize,
    pub surface: Vec3,
    highlight: Highlight,
    scale: Tween,
    glow_opacity: Tween,
}

impl PinMarker {
    pub fn new(index: usize, geo: GeoPoint, radius: f32) -> Self {
        let normal = Highlight::Normal;
        Self {
            index,
            surface: geo.surface_position(radius),
            highlight: normal,
            scale: Tween::new(normal.scale(), normal.scale(), 0.0, HIGHLIGHT_EASE),
            glow_opacity: Tween::new(
                normal.glow_opacity(),
                normal.glow_opacity(),
                0.0,
                Ease::Linear,
            ),
        }
    }

    pub fn highlight(&self) -> Highlight {
        self.highlight
    }

    /// Retargets the scale and glow tweens from wherever they currently are.
    pub fn set_highlight(&mut self, highlight: Highlight) {
        if self.highlight == highlight {
            return;
        }
        self.highlight = highlight;
        self.scale = Tween::new(
            self.scale.value(),
            highlight.scale(),
            HIGHLIGHT_DURATION_S,
            HIGHLIGHT_EASE,
        );
        self.glow_opacity = Tween::new(
            self.glow_opacity.value(),
            highlight.glow_opacity(),
            HIGHLIGHT_DURATION_S,
            Ease::Linear,
        );
    }

    pub fn advance(&mut self, dt: f32) {
        self.scale.advance(dt);
        self.glow_opacity.advance(dt);
    }

    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    pub fn glow_opacity(&self) -> f32 {
        self.glow_opacity.value()
    }
}

/// Highlights the marker with `index` and returns every other marker to normal.
///
/// Returns false, leaving all markers untouched, when no marker has that index.
pub fn highlight_pin<M>(markers: impl IntoIterator<Item = M>, index: usize) -> bool
where
    M: DerefMut<Target = PinMarker>,
{
    let mut markers: Vec<_> = markers.into_iter().collect();
    if !markers.iter().any(|m| m.index == index) {
        return false;
    }
    for marker in markers.iter_mut() {
        let target = if marker.index == index {
            Highlight::Highlighted
        } else {
            Highlight::Normal
        };
        // Avoid change detection churn on untouched markers
        if marker.highlight != target {
            marker.set_highlight(target);
        }
    }
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlowLayer {
    Dot,
    Inner,
    Outer,
}

/// Child mesh of a pin; animated by the pulse system.
#[derive(Component, Debug, Clone, Copy)]
pub struct PinGlow(pub GlowLayer);

/// Request to highlight pin `index` on `globe`.
#[derive(Message, Debug, Clone, Copy)]
pub struct HighlightPin {
    pub globe: Entity,
    pub index: usize,
}

pub fn spawn_pins(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    globe: Entity,
    config: &GlobeConfig,
    locations: &[(String, GeoPoint)],
) {
    let unit = config.unit();
    let dot_mesh = meshes.add(Sphere::new(DOT_RADIUS * unit).mesh().uv(32, 32));
    let inner_mesh = meshes.add(Sphere::new(INNER_GLOW_RADIUS * unit).mesh().uv(32, 32));
    let outer_mesh = meshes.add(Sphere::new(OUTER_GLOW_RADIUS * unit).mesh().uv(32, 32));

    for (index, (name, geo)) in locations.iter().enumerate() {
        let marker = PinMarker::new(index, *geo, config.radius);
        let surface = marker.surface;

        let pin = commands
            .spawn((
                marker,
                Transform::from_translation(surface),
                Visibility::default(),
                Name::new(format!("Pin {name}")),
                ChildOf(globe),
            ))
            .id();

        for (layer, mesh, opacity) in [
            (GlowLayer::Dot, dot_mesh.clone(), 1.0),
            (GlowLayer::Inner, inner_mesh.clone(), 0.4),
            (GlowLayer::Outer, outer_mesh.clone(), 0.2),
        ] {
            commands.spawn((
                Mesh3d(mesh),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: PIN_COLOR.with_alpha(opacity),
                    alpha_mode: AlphaMode::Blend,
                    unlit: true,
                    ..default()
                })),
                Transform::default(),
                PinGlow(layer),
                ChildOf(pin),
            ));
        }
    }
}

pub fn apply_highlight_requests(
    mut requests: MessageReader<HighlightPin>,
    mut pins: Query<(&ChildOf, &mut PinMarker)>,
) {
    for request in requests.read() {
        let on_globe = pins
            .iter_mut()
            .filter(|(child_of, _)| child_of.parent() == request.globe)
            .map(|(_, marker)| marker);
        if !highlight_pin(on_globe, request.index) {
            debug!(
                "highlight request for missing pin {} on {:?}",
                request.index, request.globe
            );
        }
    }
}

pub fn animate_pin_highlights(time: Res<Time>, mut pins: Query<(&mut PinMarker, &mut Transform)>) {
    let dt = time.delta_secs();
    for (mut marker, mut transform) in pins.iter_mut() {
        marker.advance(dt);
        transform.scale = Vec3::splat(marker.scale());
    }
}

/// Pulse value in `[0, 1]` for pin `index` at time `t` seconds.
pub fn pulse(t: f32, index: usize, phase: f32) -> f32 {
    (t * PULSE_RATE + index as f32 * PULSE_PHASE_STEP + phase).sin() * 0.5 + 0.5
}

pub fn pulse_pin_glows(
    time: Res<Time>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut glows: Query<(
        &PinGlow,
        &ChildOf,
        &mut Transform,
        &MeshMaterial3d<StandardMaterial>,
    )>,
    pins: Query<(&PinMarker, &ChildOf)>,
    globes: Query<&GlobeOpacity>,
) {
    let t = time.elapsed_secs();
    for (glow, child_of, mut transform, material) in glows.iter_mut() {
        let Ok((marker, pin_parent)) = pins.get(child_of.parent()) else {
            continue;
        };
        let globe_opacity = globes
            .get(pin_parent.parent())
            .map(|o| o.0)
            .unwrap_or(1.0);

        let opacity = match glow.0 {
            GlowLayer::Dot => 1.0,
            GlowLayer::Inner => {
                0.3 + pulse(t, marker.index, INNER_PULSE_OFFSET) * 0.2
            }
            GlowLayer::Outer => {
                let p = pulse(t, marker.index, 0.0);
                transform.scale = Vec3::splat(1.0 + p * 0.5);
                marker.glow_opacity() - 0.05 + p * 0.1
            }
        };

        if let Some(mat) = materials.get_mut(&material.0) {
            mat.base_color.set_alpha((opacity * globe_opacity).clamp(0.0, 1.0));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn markers(n: usize) -> Vec<PinMarker> {
        (0..n)
            .map(|i| PinMarker::new(i, GeoPoint::new(i as f64, 0.0), 5.0))
            .collect()
    }

    fn highlight(markers: &mut [PinMarker], index: usize) -> bool {
        highlight_pin(markers.iter_mut(), index)
    }

    #[test]
    fn test_highlight_is_exclusive() {
        let mut pins = markers(4);
        assert!(highlight(&mut pins, 1));
        assert_eq!(pins[1].highlight(), Highlight::Highlighted);

        assert!(highlight(&mut pins, 3));
        assert_eq!(pins[1].highlight(), Highlight::Normal);
        assert_eq!(pins[3].highlight(), Highlight::Highlighted);
        assert_eq!(
            pins.iter()
                .filter(|p| p.highlight() == Highlight::Highlighted)
                .count(),
            1
        );
    }

    #[test]
    fn test_out_of_range_highlight_is_noop() {
        let mut pins = markers(3);
        highlight(&mut pins, 2);
        assert!(!highlight(&mut pins, 7));
        assert_eq!(pins[2].highlight(), Highlight::Highlighted);
    }

    #[test]
    fn test_highlight_tweens_scale_and_glow() {
        let mut pin = PinMarker::new(0, GeoPoint::new(52.52, 13.405), 5.0);
        assert_eq!(pin.scale(), 1.0);
        pin.set_highlight(Highlight::Highlighted);
        pin.advance(0.1);
        assert!(pin.scale() > 1.0 && pin.scale() < 2.5);
        for _ in 0..10 {
            pin.advance(0.1);
        }
        assert_eq!(pin.scale(), 2.0);
        assert_eq!(pin.glow_opacity(), 0.5);

        pin.set_highlight(Highlight::Normal);
        pin.advance(1.0);
        assert_eq!(pin.scale(), 1.0);
        assert_eq!(pin.glow_opacity(), 0.2);
    }

    #[test]
    fn test_pin_sits_on_surface() {
        let pin = PinMarker::new(0, GeoPoint::new(13.7563, 100.5018), 5.0);
        assert!((pin.surface.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_pulse_range() {
        for i in 0..50 {
            let p = pulse(i as f32 * 0.137, i % 9, 0.5);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    fn spawn_test_globe(world: &mut World, pin_count: usize) -> Entity {
        let globe = world.spawn_empty().id();
        for i in 0..pin_count {
            world.spawn((
                PinMarker::new(i, GeoPoint::new(10.0 * i as f64, 0.0), 5.0),
                ChildOf(globe),
            ));
        }
        globe
    }

    fn highlighted(world: &mut World, globe: Entity) -> Vec<usize> {
        let mut query = world.query::<(&ChildOf, &PinMarker)>();
        let mut found: Vec<usize> = query
            .iter(world)
            .filter(|(child_of, marker)| {
                child_of.parent() == globe && marker.highlight() == Highlight::Highlighted
            })
            .map(|(_, marker)| marker.index)
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_highlight_request_only_touches_addressed_globe() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<HighlightPin>()
            .add_systems(Update, apply_highlight_requests);

        let a = spawn_test_globe(app.world_mut(), 3);
        let b = spawn_test_globe(app.world_mut(), 3);

        app.world_mut().write_message(HighlightPin { globe: a, index: 1 });
        app.update();
        assert_eq!(highlighted(app.world_mut(), a), vec![1]);
        assert!(highlighted(app.world_mut(), b).is_empty());

        app.world_mut().write_message(HighlightPin { globe: b, index: 2 });
        app.update();
        assert_eq!(highlighted(app.world_mut(), a), vec![1]);
        assert_eq!(highlighted(app.world_mut(), b), vec![2]);
    }

    #[test]
    fn test_highlight_request_for_missing_pin_keeps_current() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<HighlightPin>()
            .add_systems(Update, apply_highlight_requests);

        let a = spawn_test_globe(app.world_mut(), 2);
        app.world_mut().write_message(HighlightPin { globe: a, index: 0 });
        app.update();
        app.world_mut().write_message(HighlightPin { globe: a, index: 9 });
        app.update();
        assert_eq!(highlighted(app.world_mut(), a), vec![0]);
    }
}

//! Faint latitude/longitude wireframe drawn over a globe with gizmos

use bevy::prelude::*;

use crate::core::coordinates::project;
use crate::globe::config::GlobeConfig;
use crate::globe::{Globe, GlobeOpacity};

const LINE_COLOR: Color = Color::srgba(0.0, 0.83, 1.0, 0.08);
const SURFACE_LIFT: f32 = 0.02;
const PARALLEL_STEP_DEG: usize = 15;
const MERIDIAN_STEP_DEG: usize = 15;
const SAMPLES_PER_LINE: usize = 96;

/// Points of the graticule in the globe's local frame, one polyline per entry.
pub fn graticule_lines(radius: f32) -> Vec<Vec<Vec3>> {
    let mut lines = Vec::new();

    // Parallels, poles excluded
    for lat in (-90 + PARALLEL_STEP_DEG as i32..90).step_by(PARALLEL_STEP_DEG) {
        let line = (0..=SAMPLES_PER_LINE)
            .map(|i| {
                let lng = -180.0 + 360.0 * i as f64 / SAMPLES_PER_LINE as f64;
                project(lat as f64, lng, radius)
            })
            .collect();
        lines.push(line);
    }

    for lng in (-180..180).step_by(MERIDIAN_STEP_DEG) {
        let line = (0..=SAMPLES_PER_LINE)
            .map(|i| {
                let lat = -90.0 + 180.0 * i as f64 / SAMPLES_PER_LINE as f64;
                project(lat, lng as f64, radius)
            })
            .collect();
        lines.push(line);
    }

    lines
}

pub fn draw_graticule(
    mut gizmos: Gizmos,
    globes: Query<(&GlobeConfig, &GlobalTransform, Option<&GlobeOpacity>), With<Globe>>,
) {
    for (config, transform, opacity) in globes.iter() {
        if !config.capabilities.wireframe {
            continue;
        }
        let alpha = LINE_COLOR.alpha() * opacity.map(|o| o.0).unwrap_or(1.0);
        if alpha <= 0.0 {
            continue;
        }
        let color = LINE_COLOR.with_alpha(alpha);
        let radius = config.radius + SURFACE_LIFT * config.unit();
        for line in graticule_lines(radius) {
            gizmos.linestrip(line.into_iter().map(|p| transform.transform_point(p)), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graticule_lines_hug_the_sphere() {
        let lines = graticule_lines(5.02);
        // 11 parallels + 24 meridians
        assert_eq!(lines.len(), 11 + 24);
        for line in &lines {
            assert_eq!(line.len(), SAMPLES_PER_LINE + 1);
            for p in line {
                assert!((p.length() - 5.02).abs() < 1e-3);
            }
        }
    }
}

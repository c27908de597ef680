//! Globe configuration
//!
//! One globe type covers every variant; presets differ only in tuning and in which
//! optional layers are built.

use bevy::prelude::*;

use crate::globe::controller::ControllerSettings;
use crate::globe::easing::Ease;

/// Optional layers and behaviours of a globe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlobeCapabilities {
    pub pins: bool,
    pub atmosphere: bool,
    pub wireframe: bool,
    /// Accepts pointer/touch drags.
    pub interactive: bool,
}

impl Default for GlobeCapabilities {
    fn default() -> Self {
        Self {
            pins: true,
            atmosphere: true,
            wireframe: true,
            interactive: true,
        }
    }
}

/// Per-globe tuning, stored on the globe root entity.
#[derive(Component, Debug, Clone)]
pub struct GlobeConfig {
    pub radius: f32,
    pub sphere_segments: u32,
    pub auto_rotate_speed: f32,
    pub drag_sensitivity: f32,
    pub resume_delay_s: f64,
    pub focus_duration_s: f32,
    pub capabilities: GlobeCapabilities,
}

impl Default for GlobeConfig {
    fn default() -> Self {
        Self::hero()
    }
}

impl GlobeConfig {
    /// Full-screen interactive globe.
    pub fn hero() -> Self {
        Self {
            radius: 5.0,
            sphere_segments: 128,
            auto_rotate_speed: 0.0008,
            drag_sensitivity: 0.005,
            resume_delay_s: 3.0,
            focus_duration_s: 1.5,
            capabilities: GlobeCapabilities::default(),
        }
    }

    /// Small decorative globe on the hub: spins faster, ignores drags.
    pub fn hub() -> Self {
        Self {
            auto_rotate_speed: 0.002,
            capabilities: GlobeCapabilities {
                interactive: false,
                ..default()
            },
            ..Self::hero()
        }
    }

    /// Globe behind the scroll narrative; turns slowly between stops.
    pub fn journey() -> Self {
        Self {
            auto_rotate_speed: 0.0005,
            ..Self::hero()
        }
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            auto_rotate_speed: self.auto_rotate_speed,
            drag_sensitivity: self.drag_sensitivity,
            resume_delay: self.resume_delay_s,
            focus_ease: Ease::Power2Out,
        }
    }

    /// Scale factor relative to the radius-5 globe the visual sizes are tuned for.
    pub fn unit(&self) -> f32 {
        self.radius / 5.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_share_geometry() {
        let hub = GlobeConfig::hub();
        let journey = GlobeConfig::journey();
        assert_eq!(hub.radius, journey.radius);
        assert!(!hub.capabilities.interactive);
        assert!(journey.capabilities.interactive);
        assert!(hub.auto_rotate_speed > journey.auto_rotate_speed);
    }

    #[test]
    fn test_controller_settings_follow_config() {
        let cfg = GlobeConfig {
            resume_delay_s: 1.25,
            ..GlobeConfig::journey()
        };
        let settings = cfg.controller_settings();
        assert_eq!(settings.resume_delay, 1.25);
        assert_eq!(settings.auto_rotate_speed, 0.0005);
    }
}

//! Smooth scrolling for the journey view
//!
//! Offsets are measured in viewport heights. Input moves `target`; `current`
//! follows it with frame-rate independent smoothing.

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::globe::easing::smoothing_factor;

#[derive(Resource, Debug, Clone)]
pub struct ScrollSettings {
    /// Viewport heights per wheel line
    pub line_step: f32,
    /// Viewport heights per arrow key press
    pub key_step: f32,
    /// Per-frame follow factor at 60 fps
    pub smoothing: f32,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        Self {
            line_step: 0.12,
            key_step: 0.25,
            smoothing: 0.1,
        }
    }
}

#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ScrollState {
    pub target: f32,
    pub current: f32,
    pub max: f32,
}

impl ScrollState {
    pub fn new(max: f32) -> Self {
        Self {
            target: 0.0,
            current: 0.0,
            max: max.max(0.0),
        }
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.target = (self.target + delta).clamp(0.0, self.max);
    }

    pub fn scroll_to(&mut self, offset: f32) {
        self.target = offset.clamp(0.0, self.max);
    }

    /// Target offset that puts the middle of `[top, top + height)` at the viewport center.
    pub fn scroll_to_centered(&mut self, top: f32, height: f32) {
        self.scroll_to(top + height * 0.5 - 0.5);
    }

    pub fn advance(&mut self, smoothing: f32, dt: f32) {
        let k = smoothing_factor(smoothing, dt);
        self.current += (self.target - self.current) * k;
        if (self.target - self.current).abs() < 1e-4 {
            self.current = self.target;
        }
        self.current = self.current.clamp(0.0, self.max);
    }
}

/// Converts a vertical wheel delta to viewport heights; pixel deltas use the window height.
pub fn wheel_delta(
    unit: MouseScrollUnit,
    y: f32,
    settings: &ScrollSettings,
    window_height: f32,
) -> f32 {
    match unit {
        MouseScrollUnit::Line => -y * settings.line_step,
        MouseScrollUnit::Pixel => -y / window_height.max(1.0),
    }
}

pub fn scroll_input_system(
    mut wheel: MessageReader<MouseWheel>,
    keys: Res<ButtonInput<KeyCode>>,
    settings: Res<ScrollSettings>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scroll: ResMut<ScrollState>,
) {
    let height = windows
        .single()
        .map(|w| w.resolution.height())
        .unwrap_or(720.0);

    let mut delta: f32 = wheel
        .read()
        .map(|event| wheel_delta(event.unit, event.y, &settings, height))
        .sum();

    if keys.just_pressed(KeyCode::ArrowDown) {
        delta += settings.key_step;
    }
    if keys.just_pressed(KeyCode::ArrowUp) {
        delta -= settings.key_step;
    }
    if keys.just_pressed(KeyCode::PageDown) || keys.just_pressed(KeyCode::Space) {
        delta += 1.0;
    }
    if keys.just_pressed(KeyCode::PageUp) {
        delta -= 1.0;
    }

    if delta != 0.0 {
        scroll.scroll_by(delta);
    }
    if keys.just_pressed(KeyCode::Home) {
        scroll.scroll_to(0.0);
    }
    if keys.just_pressed(KeyCode::End) {
        let max = scroll.max;
        scroll.scroll_to(max);
    }
}

pub fn smooth_scroll_system(
    time: Res<Time>,
    settings: Res<ScrollSettings>,
    mut scroll: ResMut<ScrollState>,
) {
    scroll.advance(settings.smoothing, time.delta_secs());
}

//! Globe rotation controller
//!
//! Owns the `(yaw, pitch)` of one globe and decides, each frame, which drive moves it:
//! auto-rotate, pointer drag, or an eased focus animation toward a location.
//!
//! The post-drag resume is a deadline checked against the current state on every tick.
//! A drag that starts before the deadline makes the check skip; it is never cancelled.

use bevy::math::{EulerRot, Quat, Vec2};
use bevy::prelude::Component;
use std::f32::consts::FRAC_PI_2;

use crate::core::coordinates::{RotationState, focus_angles, nearest_equivalent_angle};
use crate::globe::easing::{Ease, Tween};

/// The drive currently allowed to change the rotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveState {
    AutoRotating,
    Dragging,
    FocusAnimating,
    /// Between a drag release and the resume deadline.
    Idle,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    /// Yaw added per frame while auto-rotating (radians).
    pub auto_rotate_speed: f32,
    /// Radians per pixel of pointer travel.
    pub drag_sensitivity: f32,
    /// Seconds after a drag release before auto-rotate resumes.
    pub resume_delay: f64,
    pub focus_ease: Ease,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            auto_rotate_speed: 0.0008,
            drag_sensitivity: 0.005,
            resume_delay: 3.0,
            focus_ease: Ease::Power2Out,
        }
    }
}

#[derive(Debug, Clone)]
struct FocusAnimation {
    yaw: Tween,
    pitch: Tween,
}

#[derive(Component, Debug, Clone)]
pub struct RotationController {
    settings: ControllerSettings,
    rotation: RotationState,
    state: DriveState,
    focus: Option<FocusAnimation>,
    last_pointer: Option<Vec2>,
    pending_drag: Vec2,
    resume_at: Option<f64>,
    suspended: bool,
}

impl RotationController {
    pub fn new(settings: ControllerSettings) -> Self {
        Self {
            settings,
            rotation: RotationState::default(),
            state: DriveState::AutoRotating,
            focus: None,
            last_pointer: None,
            pending_drag: Vec2::ZERO,
            resume_at: None,
            suspended: false,
        }
    }

    pub fn state(&self) -> DriveState {
        self.state
    }

    pub fn rotation(&self) -> RotationState {
        self.rotation
    }

    /// True when the auto-rotate drive will advance yaw on the next tick.
    pub fn auto_rotate(&self) -> bool {
        self.state == DriveState::AutoRotating && !self.suspended
    }

    /// Orientation for the globe transform (pitch about X, then yaw about Y).
    pub fn orientation(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.pitch, self.rotation.yaw, 0.0)
    }

    pub fn pointer_down(&mut self, position: Vec2) {
        self.state = DriveState::Dragging;
        self.focus = None;
        self.last_pointer = Some(position);
        self.pending_drag = Vec2::ZERO;
    }

    pub fn pointer_move(&mut self, position: Vec2) {
        if self.state != DriveState::Dragging {
            return;
        }
        if let Some(last) = self.last_pointer {
            self.pending_drag += position - last;
        }
        self.last_pointer = Some(position);
    }

    pub fn pointer_up(&mut self, now: f64) {
        if self.state != DriveState::Dragging {
            return;
        }
        self.apply_drag();
        self.last_pointer = None;
        self.state = DriveState::Idle;
        self.resume_at = Some(now + self.settings.resume_delay);
    }

    /// Starts an eased turn toward `(lat, lng)`, taking the short way around.
    pub fn rotate_to(&mut self, lat: f64, lng: f64, duration: f32) {
        let target = focus_angles(lat, lng);
        let yaw_target = nearest_equivalent_angle(self.rotation.yaw, target.yaw);
        let pitch_target = target.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
        let ease = self.settings.focus_ease;

        self.focus = Some(FocusAnimation {
            yaw: Tween::new(self.rotation.yaw, yaw_target, duration, ease),
            pitch: Tween::new(self.rotation.pitch, pitch_target, duration, ease),
        });
        self.state = DriveState::FocusAnimating;
        self.last_pointer = None;
        self.pending_drag = Vec2::ZERO;
        self.resume_at = None;
    }

    /// Pauses auto-rotation, e.g. while the window is unfocused.
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    pub fn resume(&mut self) {
        self.suspended = false;
        if self.state == DriveState::Idle {
            self.resume_at = None;
            self.state = DriveState::AutoRotating;
        }
    }

    /// Runs one frame: applies exactly one drive, then clamps pitch.
    pub fn tick(&mut self, dt: f32, now: f64) -> RotationState {
        if let Some(deadline) = self.resume_at
            && now >= deadline
        {
            self.resume_at = None;
            if self.state == DriveState::Idle {
                self.state = DriveState::AutoRotating;
            }
        }

        match self.state {
            DriveState::AutoRotating => {
                if !self.suspended {
                    self.rotation.yaw += self.settings.auto_rotate_speed;
                }
            }
            DriveState::Dragging => self.apply_drag(),
            DriveState::FocusAnimating => {
                let finished = match self.focus.as_mut() {
                    Some(focus) => {
                        self.rotation.yaw = focus.yaw.advance(dt);
                        self.rotation.pitch = focus.pitch.advance(dt);
                        focus.yaw.is_finished() && focus.pitch.is_finished()
                    }
                    None => true,
                };
                if finished {
                    self.focus = None;
                    self.state = DriveState::AutoRotating;
                }
            }
            DriveState::Idle => {}
        }

        self.rotation.pitch = self.rotation.pitch.clamp(-FRAC_PI_2, FRAC_PI_2);
        self.rotation
    }

    fn apply_drag(&mut self) {
        let delta = std::mem::take(&mut self.pending_drag);
        self.rotation.yaw += delta.x * self.settings.drag_sensitivity;
        self.rotation.pitch = (self.rotation.pitch + delta.y * self.settings.drag_sensitivity)
            .clamp(-FRAC_PI_2, FRAC_PI_2);
    }
}

impl Default for RotationController {
    fn default() -> Self {
        Self::new(ControllerSettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;
    const FRAME: f32 = 1.0 / 60.0;

    fn run_frames(controller: &mut RotationController, now: &mut f64, frames: usize) {
        for _ in 0..frames {
            *now += FRAME as f64;
            controller.tick(FRAME, *now);
        }
    }

    #[test]
    fn test_starts_auto_rotating() {
        let mut c = RotationController::default();
        assert!(c.auto_rotate());
        c.tick(FRAME, 0.0);
        assert!((c.rotation().yaw - 0.0008).abs() < EPSILON);
    }

    #[test]
    fn test_drag_cancels_auto_rotate() {
        let mut c = RotationController::default();
        c.pointer_down(Vec2::new(100.0, 100.0));
        assert_eq!(c.state(), DriveState::Dragging);
        assert!(!c.auto_rotate());

        c.pointer_move(Vec2::new(120.0, 90.0));
        let r = c.tick(FRAME, 0.0);
        assert!((r.yaw - 20.0 * 0.005).abs() < EPSILON);
        assert!((r.pitch + 10.0 * 0.005).abs() < EPSILON);

        // no movement, no change
        let r2 = c.tick(FRAME, 0.1);
        assert_eq!(r, r2);
    }

    #[test]
    fn test_drag_clamps_pitch() {
        let mut c = RotationController::default();
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(0.0, 10_000.0));
        let r = c.tick(FRAME, 0.0);
        assert!((r.pitch - FRAC_PI_2).abs() < EPSILON);

        c.pointer_move(Vec2::new(0.0, -20_000.0));
        let r = c.tick(FRAME, 0.0);
        assert!((r.pitch + FRAC_PI_2).abs() < EPSILON);
    }

    #[test]
    fn test_release_resumes_after_cooldown() {
        let mut c = RotationController::default();
        let mut now = 0.0;
        c.pointer_down(Vec2::ZERO);
        c.pointer_move(Vec2::new(10.0, 0.0));
        c.pointer_up(now);
        assert_eq!(c.state(), DriveState::Idle);
        assert!(!c.auto_rotate());

        let yaw_after_release = c.rotation().yaw;
        run_frames(&mut c, &mut now, 120);
        assert!(!c.auto_rotate());
        assert_eq!(c.rotation().yaw, yaw_after_release);

        run_frames(&mut c, &mut now, 70);
        assert!(c.auto_rotate());
        assert!(c.rotation().yaw > yaw_after_release);
    }

    #[test]
    fn test_new_drag_skips_pending_resume() {
        let mut c = RotationController::default();
        let mut now = 0.0;
        c.pointer_down(Vec2::ZERO);
        c.pointer_up(now);

        run_frames(&mut c, &mut now, 60);
        c.pointer_down(Vec2::ZERO);

        // first deadline passes while dragging
        run_frames(&mut c, &mut now, 150);
        assert_eq!(c.state(), DriveState::Dragging);
        assert!(!c.auto_rotate());

        c.pointer_up(now);
        run_frames(&mut c, &mut now, 60);
        assert_eq!(c.state(), DriveState::Idle);
        run_frames(&mut c, &mut now, 130);
        assert!(c.auto_rotate());
    }

    #[test]
    fn test_pointer_move_without_drag_is_ignored() {
        let mut c = RotationController::default();
        c.pointer_move(Vec2::new(500.0, 500.0));
        c.pointer_up(0.0);
        assert_eq!(c.state(), DriveState::AutoRotating);
    }

    #[test]
    fn test_focus_suspends_auto_rotate_and_converges() {
        let mut c = RotationController::default();
        let mut now = 0.0;
        run_frames(&mut c, &mut now, 10);

        c.rotate_to(52.52, 13.405, 1.5);
        assert_eq!(c.state(), DriveState::FocusAnimating);
        assert!(!c.auto_rotate());

        let target = focus_angles(52.52, 13.405);
        let target_yaw = nearest_equivalent_angle(c.rotation().yaw, target.yaw);
        let mut last_yaw_gap = (c.rotation().yaw - target_yaw).abs();
        let mut last_pitch_gap = (c.rotation().pitch - target.pitch).abs();

        for _ in 0..89 {
            now += FRAME as f64;
            let r = c.tick(FRAME, now);
            let yaw_gap = (r.yaw - target_yaw).abs();
            let pitch_gap = (r.pitch - target.pitch).abs();
            assert!(yaw_gap <= last_yaw_gap + EPSILON);
            assert!(pitch_gap <= last_pitch_gap + EPSILON);
            last_yaw_gap = yaw_gap;
            last_pitch_gap = pitch_gap;
        }
        assert_eq!(c.state(), DriveState::FocusAnimating);

        run_frames(&mut c, &mut now, 2);
        assert_eq!(c.state(), DriveState::AutoRotating);
        assert!((c.rotation().pitch - target.pitch).abs() < 1e-3);
    }

    #[test]
    fn test_focus_takes_short_way_around() {
        let mut c = RotationController::new(ControllerSettings {
            auto_rotate_speed: 0.5,
            ..Default::default()
        });
        let mut now = 0.0;
        run_frames(&mut c, &mut now, 100);
        let start = c.rotation().yaw;

        c.rotate_to(0.0, 0.0, 0.5);
        run_frames(&mut c, &mut now, 31);
        assert!((c.rotation().yaw - start).abs() <= std::f32::consts::PI + 0.5);
    }

    #[test]
    fn test_drag_interrupts_focus() {
        let mut c = RotationController::default();
        c.rotate_to(10.0, 10.0, 1.0);
        c.pointer_down(Vec2::ZERO);
        assert_eq!(c.state(), DriveState::Dragging);
        c.pointer_up(0.0);
        c.tick(FRAME, 0.1);
        assert_eq!(c.state(), DriveState::Idle);
    }

    #[test]
    fn test_suspend_and_resume() {
        let mut c = RotationController::default();
        c.suspend();
        assert!(!c.auto_rotate());
        let r = c.tick(FRAME, 0.0);
        assert_eq!(r.yaw, 0.0);

        c.resume();
        assert!(c.auto_rotate());
    }

    #[test]
    fn test_resume_does_not_interrupt_drag() {
        let mut c = RotationController::default();
        c.suspend();
        c.pointer_down(Vec2::ZERO);
        c.resume();
        assert_eq!(c.state(), DriveState::Dragging);
    }

    #[test]
    fn test_resume_during_cooldown_restarts_auto_rotate() {
        let mut c = RotationController::default();
        c.pointer_down(Vec2::ZERO);
        c.pointer_up(0.0);
        c.suspend();
        c.resume();
        assert!(c.auto_rotate());
    }
}

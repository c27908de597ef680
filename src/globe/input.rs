//! Pointer, touch and window-focus input routed into globe controllers

use bevy::input::touch::Touches;
use bevy::picking::hover::HoverMap;
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused};

use crate::globe::Globe;
use crate::globe::config::GlobeConfig;
use crate::globe::controller::RotationController;

/// Pointer sample for this frame, from the mouse or a single touch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerFrame {
    pub pressed: bool,
    pub released: bool,
    pub position: Option<Vec2>,
}

fn mouse_frame(mouse: &ButtonInput<MouseButton>, window: Option<&Window>) -> PointerFrame {
    PointerFrame {
        pressed: mouse.just_pressed(MouseButton::Left),
        released: mouse.just_released(MouseButton::Left),
        position: window.and_then(|w| w.cursor_position()),
    }
}

fn touch_frame(touches: &Touches) -> PointerFrame {
    // Only single-finger gestures rotate the globe
    let active = touches.iter().count();
    let pressed = active == 1 && touches.iter_just_pressed().next().is_some();
    let released = active == 0 && touches.any_just_released();
    PointerFrame {
        pressed,
        released,
        position: if active == 1 {
            touches.first_pressed_position()
        } else {
            None
        },
    }
}

/// Feeds one pointer frame into a controller.
pub fn apply_pointer(controller: &mut RotationController, frame: PointerFrame, now: f64) {
    if frame.pressed
        && let Some(position) = frame.position
    {
        controller.pointer_down(position);
        return;
    }
    if let Some(position) = frame.position {
        controller.pointer_move(position);
    }
    if frame.released {
        controller.pointer_up(now);
    }
}

pub fn drag_input_system(
    time: Res<Time>,
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    hover_map: Res<HoverMap>,
    ui_nodes: Query<(), With<Node>>,
    mut globes: Query<(&GlobeConfig, &mut RotationController), With<Globe>>,
) {
    let window = windows.single().ok();
    let now = time.elapsed_secs_f64();

    let mut frame = mouse_frame(&mouse, window);
    let touch = touch_frame(&touches);
    let touch_active = touch.position.is_some() && !mouse.pressed(MouseButton::Left);
    if touch.pressed || touch.released || touch_active {
        frame = touch;
    }

    // Presses on UI widgets belong to the widgets
    let over_ui = hover_map
        .values()
        .flat_map(|hits| hits.keys())
        .any(|entity| ui_nodes.contains(*entity));
    if frame.pressed && over_ui {
        frame.pressed = false;
    }

    for (config, mut controller) in globes.iter_mut() {
        if !config.capabilities.interactive {
            continue;
        }
        apply_pointer(&mut controller, frame, now);
    }
}

/// Pauses auto-rotation while the window is in the background.
pub fn window_focus_system(
    mut focus_events: MessageReader<WindowFocused>,
    mut globes: Query<&mut RotationController, With<Globe>>,
) {
    let Some(last) = focus_events.read().last() else {
        return;
    };
    let focused = last.focused;
    for mut controller in globes.iter_mut() {
        if focused {
            controller.resume();
        } else {
            controller.suspend();
        }
    }
    debug!("window focus changed: focused={}", focused);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::globe::controller::DriveState;

    #[test]
    fn test_apply_pointer_drag_cycle() {
        let mut c = RotationController::default();
        apply_pointer(
            &mut c,
            PointerFrame {
                pressed: true,
                released: false,
                position: Some(Vec2::new(10.0, 10.0)),
            },
            0.0,
        );
        assert_eq!(c.state(), DriveState::Dragging);

        apply_pointer(
            &mut c,
            PointerFrame {
                pressed: false,
                released: false,
                position: Some(Vec2::new(30.0, 10.0)),
            },
            0.1,
        );
        let r = c.tick(1.0 / 60.0, 0.1);
        assert!((r.yaw - 0.1).abs() < 1e-5);

        apply_pointer(
            &mut c,
            PointerFrame {
                pressed: false,
                released: true,
                position: Some(Vec2::new(30.0, 10.0)),
            },
            0.2,
        );
        assert_eq!(c.state(), DriveState::Idle);
    }

    #[test]
    fn test_hover_without_press_does_nothing() {
        let mut c = RotationController::default();
        apply_pointer(
            &mut c,
            PointerFrame {
                pressed: false,
                released: false,
                position: Some(Vec2::new(400.0, 300.0)),
            },
            0.0,
        );
        assert_eq!(c.state(), DriveState::AutoRotating);
    }

    #[test]
    fn test_press_without_cursor_is_ignored() {
        let mut c = RotationController::default();
        apply_pointer(&mut c, PointerFrame { pressed: true, ..default() }, 0.0);
        assert_eq!(c.state(), DriveState::AutoRotating);
    }
}

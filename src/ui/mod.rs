//! User interface module
//!
//! Top-level views, the hub screen and the Feathers theme. The journey view's
//! widgets live with the journey module.

use bevy::prelude::*;

use state::AppView;

pub mod hub;
pub mod state;
pub mod theme;

/// Plugin for views and the hub screen
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(theme::journey_theme())
            .init_state::<AppView>()
            .add_systems(OnEnter(AppView::Hub), (hub::spawn_hub_globe, hub::spawn_hub_ui))
            .add_systems(
                Update,
                (
                    state::log_view_transitions,
                    hub::open_journey_on_key.run_if(in_state(AppView::Hub)),
                ),
            );
    }
}

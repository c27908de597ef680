//! Journey module
//!
//! The scroll-driven narrative: a globe that turns to each stop as its section
//! crosses the viewport center, with panels, progress and navigation on top.

use bevy::prelude::*;

pub mod config;
pub mod scroll;
pub mod systems;
pub mod timeline;
pub mod ui;

pub use config::JourneyConfig;
pub use scroll::ScrollSettings;

use crate::ui::state::AppView;

/// Plugin for the journey view
pub struct JourneyPlugin;

impl Plugin for JourneyPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(config::load_journey_config())
            .init_resource::<ScrollSettings>()
            .add_systems(
                OnEnter(AppView::Journey),
                (systems::setup_journey, ui::spawn_journey_ui),
            )
            .add_systems(OnExit(AppView::Journey), systems::teardown_journey)
            .add_systems(
                Update,
                (
                    scroll::scroll_input_system,
                    scroll::smooth_scroll_system,
                    systems::drive_timeline,
                    systems::fade_journey_globe,
                    ui::update_hero,
                    ui::update_stop_panel,
                    ui::update_today_panel,
                    ui::update_progress_bar,
                    ui::update_nav_buttons,
                    ui::back_to_hub_on_escape,
                )
                    .chain()
                    .run_if(in_state(AppView::Journey)),
            );
    }
}

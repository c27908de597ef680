//! View state

use bevy::prelude::*;
use bevy::state::state::StateTransitionEvent;

/// Top-level view. Entities spawned for a view carry `DespawnOnExit` of it.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AppView {
    #[default]
    Hub,
    Journey,
}

pub fn log_view_transitions(mut transitions: MessageReader<StateTransitionEvent<AppView>>) {
    for transition in transitions.read() {
        info!(
            "view changed: {:?} -> {:?}",
            transition.exited, transition.entered
        );
    }
}

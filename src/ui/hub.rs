//! Hub view: a small spinning globe with every stop pinned, and the way into the journey

use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy_feathers::controls::{ButtonProps, ButtonVariant, button};
use bevy_feathers::theme::ThemedText;
use bevy_ui_widgets::Activate;

use crate::globe::{GlobeConfig, spawn_globe};
use crate::journey::JourneyConfig;
use crate::ui::state::AppView;
use crate::ui::theme::{ACCENT, TEXT_DIM, TEXT_MAIN, text_style};
use crate::visualization::AtmosphereMaterial;

/// Hub globe scale relative to the journey globe
const HUB_GLOBE_SCALE: f32 = 0.55;

pub fn spawn_hub_globe(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut atmospheres: ResMut<Assets<AtmosphereMaterial>>,
    asset_server: Res<AssetServer>,
    journey: Res<JourneyConfig>,
) {
    let globe = spawn_globe(
        &mut commands,
        &mut meshes,
        &mut materials,
        &mut atmospheres,
        &asset_server,
        GlobeConfig::hub(),
        &journey.pin_locations(),
        Transform::from_xyz(0.0, 0.4, 0.0).with_scale(Vec3::splat(HUB_GLOBE_SCALE)),
    );
    commands
        .entity(globe)
        .insert((DespawnOnExit(AppView::Hub), Name::new("Hub globe")))
        .observe(open_journey_on_click);
}

pub fn spawn_hub_ui(mut commands: Commands, journey: Res<JourneyConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Center,
                padding: UiRect::axes(Val::Px(24.0), Val::Px(48.0)),
                ..default()
            },
            Pickable::IGNORE,
            DespawnOnExit(AppView::Hub),
            Name::new("Hub overlay"),
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(8.0),
                        ..default()
                    },
                    Pickable::IGNORE,
                ))
                .with_children(|header| {
                    header.spawn((
                        Text::new(journey.title.clone()),
                        text_style(44.0, TEXT_MAIN),
                        Pickable::IGNORE,
                    ));
                    header.spawn((
                        Text::new(format!("{} stops", journey.stops.len())),
                        text_style(18.0, ACCENT),
                        Pickable::IGNORE,
                    ));
                });

            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(10.0),
                        ..default()
                    },
                    Pickable::IGNORE,
                ))
                .with_children(|footer| {
                    footer
                        .spawn(button(
                            ButtonProps {
                                variant: ButtonVariant::Primary,
                                ..default()
                            },
                            (),
                            Spawn((Text::new("Enter journey"), ThemedText)),
                        ))
                        .observe(open_journey_on_activate);
                    footer.spawn((
                        Text::new("Click the globe or press Enter"),
                        text_style(14.0, TEXT_DIM),
                        Pickable::IGNORE,
                    ));
                });
        });
}

fn open_journey_on_click(mut click: On<Pointer<Click>>, mut next: ResMut<NextState<AppView>>) {
    if click.button != PointerButton::Primary {
        return;
    }
    click.propagate(false);
    next.set(AppView::Journey);
}

fn open_journey_on_activate(_activate: On<Activate>, mut next: ResMut<NextState<AppView>>) {
    next.set(AppView::Journey);
}

pub fn open_journey_on_key(keys: Res<ButtonInput<KeyCode>>, mut next: ResMut<NextState<AppView>>) {
    if keys.just_pressed(KeyCode::Enter) || keys.just_pressed(KeyCode::NumpadEnter) {
        next.set(AppView::Journey);
    }
}

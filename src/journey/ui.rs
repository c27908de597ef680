//! Journey view widgets: hero title, stop panel, today panel, progress bar and navigation

use bevy::picking::prelude::*;
use bevy::prelude::*;
use bevy_feathers::controls::{ButtonProps, ButtonVariant, button};
use bevy_feathers::theme::ThemedText;
use bevy_ui_widgets::Activate;

use crate::journey::config::JourneyConfig;
use crate::journey::scroll::ScrollState;
use crate::journey::timeline::Timeline;
use crate::ui::state::AppView;
use crate::ui::theme::{ACCENT, PANEL_BG, TEXT_DIM, TEXT_MAIN, faded, text_style};

#[derive(Component)]
pub struct HeroText;

#[derive(Component)]
pub struct StopPanel;

#[derive(Component)]
pub enum StopField {
    Name,
    Period,
    Blurb,
}

#[derive(Component)]
pub struct TodayPanel;

#[derive(Component)]
pub struct ProgressFill;

/// Navigation button for one stop
#[derive(Component)]
pub struct NavButton(pub usize);

/// Base text color, faded by the owning panel's opacity.
#[derive(Component, Clone, Copy)]
pub struct BaseTextColor(pub Color);

fn panel_node() -> Node {
    Node {
        flex_direction: FlexDirection::Column,
        row_gap: Val::Px(10.0),
        padding: UiRect::all(Val::Px(24.0)),
        max_width: Val::Px(420.0),
        ..default()
    }
}

fn faded_text(text: impl Into<String>, size: f32, color: Color) -> impl Bundle {
    (
        Text::new(text),
        text_style(size, color),
        BaseTextColor(color),
        Pickable::IGNORE,
    )
}

pub fn spawn_journey_ui(mut commands: Commands, journey: Res<JourneyConfig>) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            Pickable::IGNORE,
            DespawnOnExit(AppView::Journey),
            Name::new("Journey overlay"),
        ))
        .with_children(|root| {
            // Progress bar along the top edge
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(0.0),
                    left: Val::Px(0.0),
                    width: Val::Percent(100.0),
                    height: Val::Px(3.0),
                    ..default()
                },
                BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.08)),
                Pickable::IGNORE,
            ))
            .with_children(|bar| {
                bar.spawn((
                    Node {
                        width: Val::Percent(0.0),
                        height: Val::Percent(100.0),
                        ..default()
                    },
                    BackgroundColor(ACCENT),
                    ProgressFill,
                    Pickable::IGNORE,
                ));
            });

            // Hero title, centered
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    flex_direction: FlexDirection::Column,
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    row_gap: Val::Px(12.0),
                    ..default()
                },
                Pickable::IGNORE,
            ))
            .with_children(|hero| {
                hero.spawn((faded_text(journey.title.clone(), 52.0, TEXT_MAIN), HeroText));
                hero.spawn((faded_text(journey.subtitle.clone(), 20.0, ACCENT), HeroText));
            });

            // Stop panel, left side
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(48.0),
                    top: Val::Percent(30.0),
                    ..panel_node()
                },
                BackgroundColor(faded(PANEL_BG, 0.0)),
                StopPanel,
                Pickable::IGNORE,
            ))
            .with_children(|panel| {
                panel.spawn((faded_text("", 36.0, TEXT_MAIN), StopField::Name));
                panel.spawn((faded_text("", 16.0, ACCENT), StopField::Period));
                panel.spawn((faded_text("", 18.0, TEXT_DIM), StopField::Blurb));
            });

            // Today panel, centered
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Percent(50.0),
                    top: Val::Percent(35.0),
                    margin: UiRect::left(Val::Px(-210.0)),
                    ..panel_node()
                },
                BackgroundColor(faded(PANEL_BG, 0.0)),
                TodayPanel,
                Pickable::IGNORE,
            ))
            .with_children(|panel| {
                panel.spawn(faded_text(journey.today.heading.clone(), 40.0, TEXT_MAIN));
                panel.spawn(faded_text(journey.today.text.clone(), 18.0, TEXT_DIM));
                if !journey.today.interests.is_empty() {
                    panel.spawn(faded_text(journey.today.interests.join("  ·  "), 16.0, ACCENT));
                }
            });

            // Stop navigation, right edge
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    right: Val::Px(24.0),
                    top: Val::Percent(20.0),
                    flex_direction: FlexDirection::Column,
                    row_gap: Val::Px(6.0),
                    ..default()
                },
                Pickable::IGNORE,
            ))
            .with_children(|nav| {
                for (index, stop) in journey.stops.iter().enumerate() {
                    nav.spawn(button(
                        ButtonProps::default(),
                        NavButton(index),
                        Spawn((Text::new(stop.name.clone()), ThemedText)),
                    ))
                    .observe(scroll_to_stop_on_activate);
                }
            });

            // Back to hub, top left
            root.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(24.0),
                    top: Val::Px(20.0),
                    ..default()
                },
                Pickable::IGNORE,
            ))
            .with_children(|corner| {
                corner
                    .spawn(button(
                        ButtonProps::default(),
                        (),
                        Spawn((Text::new("Back"), ThemedText)),
                    ))
                    .observe(back_to_hub_on_activate);
            });
        });
}

fn scroll_to_stop_on_activate(
    activate: On<Activate>,
    buttons: Query<&NavButton>,
    timeline: Option<Res<Timeline>>,
    scroll: Option<ResMut<ScrollState>>,
) {
    let (Some(timeline), Some(mut scroll)) = (timeline, scroll) else {
        return;
    };
    let Ok(nav) = buttons.get(activate.entity) else {
        return;
    };
    if let Some(section) = timeline.stop(nav.0) {
        scroll.scroll_to_centered(section.top, section.height);
        debug!("nav: scrolling to stop {}", nav.0);
    }
}

fn back_to_hub_on_activate(_activate: On<Activate>, mut next: ResMut<NextState<AppView>>) {
    next.set(AppView::Hub);
}

pub fn back_to_hub_on_escape(
    keys: Res<ButtonInput<KeyCode>>,
    mut next: ResMut<NextState<AppView>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        next.set(AppView::Hub);
    }
}

fn fade_texts(
    children: &Children,
    texts: &mut Query<(&BaseTextColor, &mut TextColor)>,
    opacity: f32,
) {
    for child in children.iter() {
        if let Ok((base, mut color)) = texts.get_mut(child) {
            color.0 = faded(base.0, opacity);
        }
    }
}

pub fn update_hero(
    scroll: Res<ScrollState>,
    timeline: Res<Timeline>,
    mut hero: Query<(&BaseTextColor, &mut TextColor), With<HeroText>>,
) {
    let opacity = timeline.hero_opacity(scroll.current);
    for (base, mut color) in hero.iter_mut() {
        color.0 = faded(base.0, opacity);
    }
}

/// Fills the stop panel from the active stop and fades it with the panel reveal.
pub fn update_stop_panel(
    scroll: Res<ScrollState>,
    timeline: Res<Timeline>,
    journey: Res<JourneyConfig>,
    mut panel: Query<(&mut BackgroundColor, &Children), With<StopPanel>>,
    mut fields: Query<(&StopField, &mut Text)>,
    mut texts: Query<(&BaseTextColor, &mut TextColor)>,
) {
    let Ok((mut background, children)) = panel.single_mut() else {
        return;
    };
    let active = timeline.active();
    let opacity = active
        .map(|index| timeline.panel_reveal(index, scroll.current))
        .unwrap_or(0.0);
    background.0 = faded(PANEL_BG, opacity);
    fade_texts(children, &mut texts, opacity);

    if !timeline.is_changed() {
        return;
    }
    let Some(stop) = active.and_then(|index| journey.stops.get(index)) else {
        return;
    };
    for (field, mut text) in fields.iter_mut() {
        text.0 = match field {
            StopField::Name => stop.name.clone(),
            StopField::Period => stop
                .period
                .as_ref()
                .map(|p| p.label())
                .unwrap_or_default(),
            StopField::Blurb => stop.blurb.clone(),
        };
    }
}

pub fn update_today_panel(
    scroll: Res<ScrollState>,
    timeline: Res<Timeline>,
    mut panel: Query<(&mut BackgroundColor, &Children), With<TodayPanel>>,
    mut texts: Query<(&BaseTextColor, &mut TextColor)>,
) {
    let Ok((mut background, children)) = panel.single_mut() else {
        return;
    };
    let opacity = timeline.today_reveal(scroll.current);
    background.0 = faded(PANEL_BG, opacity);
    fade_texts(children, &mut texts, opacity);
}

pub fn update_progress_bar(
    scroll: Res<ScrollState>,
    timeline: Res<Timeline>,
    mut fill: Query<&mut Node, With<ProgressFill>>,
) {
    let progress = timeline.progress(scroll.current);
    for mut node in fill.iter_mut() {
        node.width = Val::Percent(progress * 100.0);
    }
}

/// Marks the active stop's nav button as primary.
pub fn update_nav_buttons(
    timeline: Res<Timeline>,
    mut buttons: Query<(&NavButton, &mut ButtonVariant)>,
) {
    if !timeline.is_changed() {
        return;
    }
    let active = timeline.active();
    for (nav, mut variant) in buttons.iter_mut() {
        let primary = active == Some(nav.0);
        if matches!(*variant, ButtonVariant::Primary) != primary {
            *variant = if primary {
                ButtonVariant::Primary
            } else {
                ButtonVariant::Normal
            };
        }
    }
}

//! Journey view lifecycle and the systems that turn scroll position into globe motion

use bevy::prelude::*;

use crate::globe::{FocusRequest, GlobeConfig, GlobeOpacity, HighlightPin, spawn_globe};
use crate::journey::config::JourneyConfig;
use crate::journey::scroll::ScrollState;
use crate::journey::timeline::{Timeline, TriggerEvent};
use crate::ui::state::AppView;
use crate::visualization::AtmosphereMaterial;

/// Globe offset so the stop panel on the left stays clear of it
const JOURNEY_GLOBE_OFFSET: Vec3 = Vec3::new(2.5, 0.0, 0.0);

/// The globe the journey steers
#[derive(Resource, Debug, Clone, Copy)]
pub struct JourneyGlobe(pub Entity);

pub fn setup_journey(
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
        GlobeConfig::journey(),
        &journey.pin_locations(),
        Transform::from_translation(JOURNEY_GLOBE_OFFSET),
    );
    commands
        .entity(globe)
        .insert((DespawnOnExit(AppView::Journey), Name::new("Journey globe")));

    let timeline = Timeline::new(journey.stops.len());
    commands.insert_resource(ScrollState::new(timeline.max_offset()));
    commands.insert_resource(timeline);
    commands.insert_resource(JourneyGlobe(globe));
    info!("journey started with {} stops", journey.stops.len());
}

pub fn teardown_journey(mut commands: Commands) {
    commands.remove_resource::<Timeline>();
    commands.remove_resource::<ScrollState>();
    commands.remove_resource::<JourneyGlobe>();
}

/// Feeds the smoothed scroll offset to the timeline; entering a stop focuses and highlights it.
pub fn drive_timeline(
    scroll: Res<ScrollState>,
    mut timeline: ResMut<Timeline>,
    globe: Res<JourneyGlobe>,
    journey: Res<JourneyConfig>,
    mut focus: MessageWriter<FocusRequest>,
    mut highlight: MessageWriter<HighlightPin>,
) {
    // Only real crossings count as a timeline change
    let events = timeline.bypass_change_detection().update(scroll.current);
    if events.is_empty() {
        return;
    }
    timeline.set_changed();

    for event in events {
        match event {
            TriggerEvent::Enter(index) | TriggerEvent::EnterBack(index) => {
                let Some(stop) = journey.stops.get(index) else {
                    continue;
                };
                info!("section enter: {} ({:?})", stop.name, event);
                focus.write(FocusRequest {
                    globe: globe.0,
                    location: stop.location,
                    duration_s: None,
                });
                highlight.write(HighlightPin {
                    globe: globe.0,
                    index,
                });
            }
            TriggerEvent::Leave(index) | TriggerEvent::LeaveBack(index) => {
                debug!("section leave: {} ({:?})", index, event);
            }
        }
    }
}

/// Fades the globe out as the closing section scrolls in.
pub fn fade_journey_globe(
    scroll: Res<ScrollState>,
    timeline: Res<Timeline>,
    globe: Res<JourneyGlobe>,
    mut opacities: Query<&mut GlobeOpacity>,
) {
    let Ok(mut opacity) = opacities.get_mut(globe.0) else {
        return;
    };
    let target = timeline.globe_opacity(scroll.current);
    if (opacity.0 - target).abs() > f32::EPSILON {
        opacity.0 = target;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Resource, Default)]
    struct Sent {
        focus: Vec<FocusRequest>,
        highlight: Vec<HighlightPin>,
    }

    fn collect_sent(
        mut focus: MessageReader<FocusRequest>,
        mut highlight: MessageReader<HighlightPin>,
        mut sent: ResMut<Sent>,
    ) {
        sent.focus.extend(focus.read().copied());
        sent.highlight.extend(highlight.read().copied());
    }

    fn journey_app() -> (App, Entity) {
        let journey = JourneyConfig::default();
        let timeline = Timeline::new(journey.stops.len());

        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_message::<FocusRequest>()
            .add_message::<HighlightPin>()
            .init_resource::<Sent>()
            .insert_resource(ScrollState::new(timeline.max_offset()))
            .insert_resource(timeline)
            .insert_resource(journey)
            .add_systems(Update, (drive_timeline, collect_sent).chain());

        let globe = app.world_mut().spawn_empty().id();
        app.insert_resource(JourneyGlobe(globe));
        (app, globe)
    }

    fn scroll_to(app: &mut App, offset: f32) {
        let mut scroll = app.world_mut().resource_mut::<ScrollState>();
        scroll.target = offset;
        scroll.current = offset;
    }

    #[test]
    fn test_entering_a_stop_focuses_and_highlights_it() {
        let (mut app, globe) = journey_app();

        app.update();
        assert!(app.world().resource::<Sent>().focus.is_empty());

        scroll_to(&mut app, 0.6);
        app.update();
        let stops = JourneyConfig::default().stops;
        let sent = app.world().resource::<Sent>();
        assert_eq!(sent.focus.len(), 1);
        assert_eq!(sent.focus[0].globe, globe);
        assert_eq!(sent.focus[0].location, stops[0].location);
        assert!(sent.focus[0].duration_s.is_none());
        assert_eq!(sent.highlight.len(), 1);
        assert_eq!(sent.highlight[0].globe, globe);
        assert_eq!(sent.highlight[0].index, 0);
    }

    #[test]
    fn test_staying_inside_a_stop_sends_nothing_new() {
        let (mut app, _) = journey_app();
        scroll_to(&mut app, 0.6);
        app.update();
        scroll_to(&mut app, 0.9);
        app.update();
        assert_eq!(app.world().resource::<Sent>().focus.len(), 1);
        assert_eq!(app.world().resource::<Sent>().highlight.len(), 1);
    }

    #[test]
    fn test_scrolling_back_refocuses_previous_stop() {
        let (mut app, _) = journey_app();
        scroll_to(&mut app, 1.6);
        app.update();
        scroll_to(&mut app, 1.2);
        app.update();

        let stops = JourneyConfig::default().stops;
        let sent = app.world().resource::<Sent>();
        let indices: Vec<usize> = sent.highlight.iter().map(|h| h.index).collect();
        assert_eq!(indices, vec![1, 0]);
        assert_eq!(sent.focus[1].location, stops[0].location);
    }
}

//! Scroll-trigger timeline
//!
//! The journey page is a vertical stack of sections measured in viewport
//! heights: a hero, one section per stop, and a closing "today" section. A
//! stop is active while its top has passed the viewport center and its bottom
//! has not. Scrub helpers map a section's position in the viewport to `[0, 1]`.

use bevy::prelude::*;

/// Heights in viewport units
pub const HERO_HEIGHT: f32 = 1.0;
pub const STOP_HEIGHT: f32 = 1.0;
pub const TODAY_HEIGHT: f32 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Hero,
    Stop(usize),
    Today,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub top: f32,
    pub height: f32,
}

impl Section {
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Where the section top sits in the viewport for `offset`, `0` = top edge, `1` = bottom edge.
    pub fn top_in_viewport(&self, offset: f32) -> f32 {
        self.top - offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    /// Scrolling down into a stop
    Enter(usize),
    /// Scrolling up into a stop
    EnterBack(usize),
    /// Scrolling down past a stop
    Leave(usize),
    /// Scrolling up past a stop
    LeaveBack(usize),
}

/// Progress of a scrubbed animation that starts when a section top reaches
/// `start` (viewport fraction) and ends at `end`.
pub fn scrub(top_in_viewport: f32, start: f32, end: f32) -> f32 {
    if (start - end).abs() <= f32::EPSILON {
        return if top_in_viewport <= end { 1.0 } else { 0.0 };
    }
    ((start - top_in_viewport) / (start - end)).clamp(0.0, 1.0)
}

#[derive(Resource, Debug, Clone)]
pub struct Timeline {
    sections: Vec<Section>,
    active: Option<usize>,
    last_offset: f32,
}

impl Timeline {
    pub fn new(stop_count: usize) -> Self {
        let mut sections = Vec::with_capacity(stop_count + 2);
        let mut top = 0.0;
        sections.push(Section {
            kind: SectionKind::Hero,
            top,
            height: HERO_HEIGHT,
        });
        top += HERO_HEIGHT;
        for index in 0..stop_count {
            sections.push(Section {
                kind: SectionKind::Stop(index),
                top,
                height: STOP_HEIGHT,
            });
            top += STOP_HEIGHT;
        }
        sections.push(Section {
            kind: SectionKind::Today,
            top,
            height: TODAY_HEIGHT,
        });
        Self {
            sections,
            active: None,
            last_offset: 0.0,
        }
    }

    pub fn stop(&self, index: usize) -> Option<&Section> {
        self.sections
            .iter()
            .find(|s| s.kind == SectionKind::Stop(index))
    }

    pub fn hero(&self) -> &Section {
        &self.sections[0]
    }

    pub fn today(&self) -> &Section {
        &self.sections[self.sections.len() - 1]
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn total_height(&self) -> f32 {
        self.today().bottom()
    }

    /// Largest scroll offset; the last viewport ends at the page bottom.
    pub fn max_offset(&self) -> f32 {
        (self.total_height() - 1.0).max(0.0)
    }

    /// Stop under the viewport center for `offset`, if any.
    pub fn stop_at(&self, offset: f32) -> Option<usize> {
        let center = offset + 0.5;
        self.sections.iter().find_map(|s| match s.kind {
            SectionKind::Stop(i) if s.top <= center && center < s.bottom() => Some(i),
            _ => None,
        })
    }

    /// Moves the timeline to `offset` and reports the trigger crossings, leaves first.
    pub fn update(&mut self, offset: f32) -> Vec<TriggerEvent> {
        let forward = offset >= self.last_offset;
        self.last_offset = offset;

        let next = self.stop_at(offset);
        if next == self.active {
            return Vec::new();
        }

        let mut events = Vec::with_capacity(2);
        if let Some(prev) = self.active {
            events.push(if forward {
                TriggerEvent::Leave(prev)
            } else {
                TriggerEvent::LeaveBack(prev)
            });
        }
        if let Some(index) = next {
            events.push(if forward {
                TriggerEvent::Enter(index)
            } else {
                TriggerEvent::EnterBack(index)
            });
        }
        self.active = next;
        events
    }

    pub fn progress(&self, offset: f32) -> f32 {
        let max = self.max_offset();
        if max <= 0.0 {
            return 0.0;
        }
        (offset / max).clamp(0.0, 1.0)
    }

    /// Hero content opacity, fading out as the hero scrolls off the top.
    pub fn hero_opacity(&self, offset: f32) -> f32 {
        let hero = self.hero();
        1.0 - scrub(hero.top_in_viewport(offset), 0.0, -hero.height)
    }

    /// Stop panel reveal, from its top at 80% of the viewport to 30%.
    pub fn panel_reveal(&self, index: usize, offset: f32) -> f32 {
        self.stop(index)
            .map(|s| scrub(s.top_in_viewport(offset), 0.8, 0.3))
            .unwrap_or(0.0)
    }

    /// Today content opacity, from its top at 60% of the viewport to 30%.
    pub fn today_reveal(&self, offset: f32) -> f32 {
        scrub(self.today().top_in_viewport(offset), 0.6, 0.3)
    }

    /// Globe opacity, fading out as the today section rises from 60% to 20%.
    pub fn globe_opacity(&self, offset: f32) -> f32 {
        1.0 - scrub(self.today().top_in_viewport(offset), 0.6, 0.2)
    }
}

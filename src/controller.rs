//! Tag bookkeeping and marker visibility.
//!
//! The controller owns every tag, decides which markers the surface shows for
//! a pointer position, and runs the create-tag workflow through the surface's
//! input overlay.

use crate::config::TaggerConfig;
use crate::geometry::distance;
use crate::surface::{Overlay, TagSurface};
use crate::tag::Tag;
use crate::throttle::Throttle;
use crate::validation::{LabelValidator, ValidationError, Validator};
use eframe::egui::Pos2;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Maps a position key to whether a marker has been rendered there.
pub type VisibilityMap = HashMap<String, bool>;

/// Result of closing the input overlay.
pub type CommitOutcome = Result<Tag, ValidationError>;

/// Owns the tag list and drives the surface from pointer and input events.
pub struct TagController<S = Overlay, V = LabelValidator> {
    surface: S,
    validator: V,
    tags: Vec<Tag>,
    visibility: VisibilityMap,
    next_tag_id: u32,
    reveal_radius: f32,
    show_all: bool,
    throttle: Throttle<Pos2>,
}

impl TagController {
    /// Creates a controller over a fresh [`Overlay`] using the configured rules.
    pub fn from_config(config: &TaggerConfig) -> Self {
        Self::new(
            Overlay::new(),
            LabelValidator::new(config.max_label_len),
            config.reveal_radius,
            config.throttle_delay(),
        )
    }
}

impl<S: TagSurface, V: Validator> TagController<S, V> {
    pub fn new(surface: S, validator: V, reveal_radius: f32, throttle_delay: Duration) -> Self {
        Self {
            surface,
            validator,
            tags: Vec::new(),
            visibility: VisibilityMap::new(),
            next_tag_id: 0,
            reveal_radius,
            show_all: false,
            throttle: Throttle::new(throttle_delay),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────────

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    #[allow(dead_code)]
    pub fn reveal_radius(&self) -> f32 {
        self.reveal_radius
    }

    pub fn show_all(&self) -> bool {
        self.show_all
    }

    /// Whether a marker has been rendered at `key`. `None` means no tag was
    /// ever stored there.
    #[allow(dead_code)]
    pub fn is_rendered_at(&self, key: &str) -> Option<bool> {
        self.visibility.get(key).copied()
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Tag Input
    // ─────────────────────────────────────────────────────────────────────────────

    /// Opens the label input at `position`. An input that is already open
    /// loses focus to the click and is committed first; its outcome is
    /// returned.
    pub fn begin_input(&mut self, position: Pos2) -> Option<CommitOutcome> {
        let previous = self.commit_input();
        self.surface.open_input(position);
        previous
    }

    /// Validates and closes the open input. The input is removed from the
    /// surface whatever the outcome; rejected text is discarded.
    pub fn commit_input(&mut self) -> Option<CommitOutcome> {
        let input = self.surface.close_input()?;
        let outcome = self
            .validator
            .validate(&input.text)
            .map(|()| self.store_tag(input.position, input.text.trim().to_owned()));
        Some(outcome)
    }

    /// Closes the open input without validating it.
    pub fn cancel_input(&mut self) -> bool {
        self.surface.close_input().is_some()
    }

    fn store_tag(&mut self, position: Pos2, value: String) -> Tag {
        let tag = Tag::new(self.next_tag_id, position, value);
        self.visibility.entry(tag.position_key()).or_insert(false);
        self.next_tag_id += 1;
        self.tags.push(tag.clone());

        if self.show_all {
            Self::reveal(&mut self.surface, &mut self.visibility, &tag);
        }
        tag
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Proximity
    // ─────────────────────────────────────────────────────────────────────────────

    /// Feeds a pointer position through the throttle, revealing tags near it
    /// if the throttle lets the call through.
    pub fn pointer_moved(&mut self, now: Instant, position: Pos2) {
        self.tick(now);
        if let Some(position) = self.throttle.call(now, position) {
            self.reveal_near(position);
        }
    }

    /// Fires a parked pointer position once the throttle window has elapsed.
    pub fn tick(&mut self, now: Instant) {
        if let Some(position) = self.throttle.poll(now) {
            log::debug!("Trailing reveal at ({}, {})", position.x, position.y);
            self.reveal_near(position);
        }
    }

    /// When the next [`tick`](Self::tick) can do work.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.throttle.next_deadline()
    }

    /// Shows markers for tags within the reveal radius of `position` and
    /// hides the rest.
    pub fn reveal_near(&mut self, position: Pos2) {
        let Self {
            surface,
            tags,
            visibility,
            reveal_radius,
            show_all,
            ..
        } = self;

        for tag in tags.iter() {
            let d = distance(position.x, position.y, tag.offset_x, tag.offset_y);
            if d <= *reveal_radius {
                Self::reveal(surface, visibility, tag);
            } else if !*show_all {
                surface.hide_marker(tag.tag_id);
            }
        }
    }

    /// The closest tag within the reveal radius of `position`.
    pub fn nearest_tag(&self, position: Pos2) -> Option<&Tag> {
        self.tags
            .iter()
            .map(|tag| {
                let d = distance(position.x, position.y, tag.offset_x, tag.offset_y);
                (tag, d)
            })
            .filter(|(_, d)| *d <= self.reveal_radius)
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(tag, _)| tag)
    }

    /// Pins every marker on screen, or returns to proximity-driven display.
    pub fn set_show_all(&mut self, show_all: bool) {
        self.show_all = show_all;
        for tag in &self.tags {
            if show_all {
                Self::reveal(&mut self.surface, &mut self.visibility, tag);
            } else {
                self.surface.hide_marker(tag.tag_id);
            }
        }
    }

    /// Creates the marker for `tag` on first display, otherwise un-hides the
    /// existing one and brings its label and position up to date.
    fn reveal(surface: &mut S, visibility: &mut VisibilityMap, tag: &Tag) {
        let key = tag.position_key();
        let Some(rendered) = visibility.get(&key).copied() else {
            return;
        };

        if rendered && surface.has_marker(tag.tag_id) {
            surface.show_marker(tag.tag_id);
            surface.set_marker_label(tag.tag_id, &tag.value);
            surface.set_marker_position(tag.tag_id, tag.position());
        } else {
            surface.create_marker(tag.tag_id, &tag.value, tag.position());
            visibility.insert(key, true);
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────────────────────

    /// Drops every tag and marker, e.g. when another image is opened.
    pub fn reset(&mut self) {
        self.surface.close_input();
        self.surface.clear_markers();
        self.tags.clear();
        self.visibility.clear();
        self.next_tag_id = 0;
        self.throttle = Throttle::new(self.throttle.delay());
    }
}

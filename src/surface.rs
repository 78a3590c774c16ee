//! The drawing surface the tag controller manipulates.
//!
//! [`TagSurface`] is the seam between tag bookkeeping and whatever renders the
//! markers. [`Overlay`] is the retained implementation the egui canvas paints
//! every frame.

use eframe::egui::Pos2;
use std::collections::BTreeMap;

/// A rendered label for a tag. Created once, then shown or hidden.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub tag_id: u32,
    pub label: String,
    pub position: Pos2,
    pub visible: bool,
}

/// The text field a user types a new label into.
#[derive(Debug, Clone, PartialEq)]
pub struct TagInput {
    pub position: Pos2,
    pub text: String,
}

/// Element-level operations on the surface. Operations on a tag id with no
/// marker are no-ops.
pub trait TagSurface {
    /// Creates a visible marker, replacing any marker with the same id.
    fn create_marker(&mut self, tag_id: u32, label: &str, position: Pos2);
    fn has_marker(&self, tag_id: u32) -> bool;
    /// Returns false if there is no marker for `tag_id`.
    fn show_marker(&mut self, tag_id: u32) -> bool;
    /// Returns false if there is no marker for `tag_id`.
    fn hide_marker(&mut self, tag_id: u32) -> bool;
    fn set_marker_label(&mut self, tag_id: u32, label: &str);
    fn set_marker_position(&mut self, tag_id: u32, position: Pos2);
    fn clear_markers(&mut self);

    /// Opens an empty input at `position`, replacing any open input.
    fn open_input(&mut self, position: Pos2);
    fn input(&self) -> Option<&TagInput>;
    fn input_mut(&mut self) -> Option<&mut TagInput>;
    /// Removes the input from the surface and hands it back.
    fn close_input(&mut self) -> Option<TagInput>;
}

#[derive(Debug, Default)]
pub struct Overlay {
    markers: BTreeMap<u32, Marker>,
    input: Option<TagInput>,
}

#[allow(dead_code)]
impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self, tag_id: u32) -> Option<&Marker> {
        self.markers.get(&tag_id)
    }

    /// Markers currently on screen, in tag id order.
    pub fn visible_markers(&self) -> impl Iterator<Item = &Marker> + '_ {
        self.markers.values().filter(|m| m.visible)
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }
}

impl TagSurface for Overlay {
    fn create_marker(&mut self, tag_id: u32, label: &str, position: Pos2) {
        self.markers.insert(
            tag_id,
            Marker {
                tag_id,
                label: label.to_owned(),
                position,
                visible: true,
            },
        );
    }

    fn has_marker(&self, tag_id: u32) -> bool {
        self.markers.contains_key(&tag_id)
    }

    fn show_marker(&mut self, tag_id: u32) -> bool {
        match self.markers.get_mut(&tag_id) {
            Some(marker) => {
                marker.visible = true;
                true
            }
            None => false,
        }
    }

    fn hide_marker(&mut self, tag_id: u32) -> bool {
        match self.markers.get_mut(&tag_id) {
            Some(marker) => {
                marker.visible = false;
                true
            }
            None => false,
        }
    }

    fn set_marker_label(&mut self, tag_id: u32, label: &str) {
        if let Some(marker) = self.markers.get_mut(&tag_id) {
            if marker.label != label {
                marker.label = label.to_owned();
            }
        }
    }

    fn set_marker_position(&mut self, tag_id: u32, position: Pos2) {
        if let Some(marker) = self.markers.get_mut(&tag_id) {
            marker.position = position;
        }
    }

    fn clear_markers(&mut self) {
        self.markers.clear();
    }

    fn open_input(&mut self, position: Pos2) {
        self.input = Some(TagInput {
            position,
            text: String::new(),
        });
    }

    fn input(&self) -> Option<&TagInput> {
        self.input.as_ref()
    }

    fn input_mut(&mut self) -> Option<&mut TagInput> {
        self.input.as_mut()
    }

    fn close_input(&mut self) -> Option<TagInput> {
        self.input.take()
    }
}

use eframe::egui::{pos2, Pos2};

/// A label pinned to a pixel offset on the image.
///
/// Tags are only ever created by the controller and handed out by shared
/// reference, so they never change after creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub tag_id: u32,
    pub offset_x: f32,
    pub offset_y: f32,
    pub value: String,
}

impl Tag {
    pub fn new(tag_id: u32, position: Pos2, value: String) -> Self {
        Self {
            tag_id,
            offset_x: position.x,
            offset_y: position.y,
            value,
        }
    }

    pub fn position(&self) -> Pos2 {
        pos2(self.offset_x, self.offset_y)
    }

    pub fn position_key(&self) -> String {
        position_key(self.position())
    }
}

/// Key used by the visibility map: `"{x}-{y}"`.
pub fn position_key(position: Pos2) -> String {
    format!("{}-{}", position.x, position.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_key() {
        let tag = Tag::new(3, pos2(12.0, 40.5), "cat".to_owned());
        assert_eq!(tag.position_key(), "12-40.5");
        assert_eq!(tag.position(), pos2(12.0, 40.5));
    }
}

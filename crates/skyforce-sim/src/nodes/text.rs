//! Text labels.

use skyforce_core::enums::FontId;

use crate::scene::{NodeKind, SceneComponent};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextNode {
    font: FontId,
    text: String,
}

impl TextNode {
    pub fn new(font: FontId, text: impl Into<String>) -> Self {
        Self {
            font,
            text: text.into(),
        }
    }

    pub fn font(&self) -> FontId {
        self.font
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl SceneComponent for TextNode {
    const KIND: NodeKind = NodeKind::Text;
}

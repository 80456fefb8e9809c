//! Test doubles shared by the unit tests

use crate::layout::{ContentRole, ContentStyle, MeasureContent, TextMeasure};
use crate::model::{BehaviorModel, IconId};
use egui::Vec2;

/// Returns a fixed size per content role
pub struct FixedMeasure {
    pub header: Vec2,
    pub body: Vec2,
}

impl FixedMeasure {
    pub fn new(header: Vec2, body: Vec2) -> Self {
        Self { header, body }
    }
}

impl TextMeasure for FixedMeasure {
    fn measure(&self, _content: &MeasureContent<'_>, style: &ContentStyle) -> Vec2 {
        match style.role {
            ContentRole::Header => self.header,
            ContentRole::Body => self.body,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct TestBehavior {
    pub title: String,
    pub description: String,
    pub comment: String,
    pub icon: Option<IconId>,
}

impl TestBehavior {
    pub fn titled(title: &str) -> Self {
        Self {
            title: title.to_string(),
            ..Self::default()
        }
    }
}

impl BehaviorModel for TestBehavior {
    fn title(&self) -> &str {
        &self.title
    }

    fn write_description(&self, out: &mut String) {
        out.push_str(&self.description);
    }

    fn comment(&self) -> &str {
        &self.comment
    }

    fn icon(&self) -> Option<IconId> {
        self.icon
    }
}

//! Text measurement backends used by the node layout

use crate::model::IconId;
use crate::preferences::Preferences;
use egui::{Color32, FontId, Painter, Vec2};

/// Which part of a node a piece of content belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentRole {
    Header,
    Body,
}

/// Style descriptor handed to a [`TextMeasure`]
#[derive(Debug, Clone, PartialEq)]
pub struct ContentStyle {
    pub role: ContentRole,
    pub font_id: FontId,
}

impl ContentStyle {
    pub fn header(prefs: &Preferences) -> Self {
        Self {
            role: ContentRole::Header,
            font_id: FontId::proportional(prefs.header_font_size),
        }
    }

    pub fn body(prefs: &Preferences) -> Self {
        Self {
            role: ContentRole::Body,
            font_id: FontId::proportional(prefs.body_font_size),
        }
    }
}

/// Content descriptor handed to a [`TextMeasure`]
#[derive(Debug, Clone, Copy)]
pub struct MeasureContent<'a> {
    pub text: &'a str,
    pub icon: Option<IconId>,
}

/// Reports the size rendered content will occupy on the canvas.
///
/// The layout treats this as a black box and calls it once for the header
/// and once for the body on every pass.
pub trait TextMeasure {
    fn measure(&self, content: &MeasureContent<'_>, style: &ContentStyle) -> Vec2;
}

/// Fixed-advance estimate: every glyph is `glyph_width * font size` wide and
/// every line is `line_height * font size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasure {
    pub glyph_width: f32,
    pub line_height: f32,
}

impl Default for MonospaceMeasure {
    fn default() -> Self {
        Self {
            glyph_width: 0.6,
            line_height: 1.25,
        }
    }
}

impl TextMeasure for MonospaceMeasure {
    fn measure(&self, content: &MeasureContent<'_>, style: &ContentStyle) -> Vec2 {
        if content.text.is_empty() {
            return Vec2::ZERO;
        }
        let size = style.font_id.size;
        let lines = content.text.split('\n');
        let (count, widest) = lines.fold((0usize, 0usize), |(count, widest), line| {
            (count + 1, widest.max(line.chars().count()))
        });
        Vec2::new(
            widest as f32 * size * self.glyph_width,
            count as f32 * size * self.line_height,
        )
    }
}

/// Measures with egui's font system through a painter
pub struct PainterMeasure<'a> {
    painter: &'a Painter,
}

impl<'a> PainterMeasure<'a> {
    pub fn new(painter: &'a Painter) -> Self {
        Self { painter }
    }
}

impl TextMeasure for PainterMeasure<'_> {
    fn measure(&self, content: &MeasureContent<'_>, style: &ContentStyle) -> Vec2 {
        self.painter
            .layout_no_wrap(content.text.to_owned(), style.font_id.clone(), Color32::WHITE)
            .size()
    }
}

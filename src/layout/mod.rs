//! Content-driven node sizing
//!
//! [`compute_layout`] derives a node's bounding and content rectangles from
//! its measured header and body. The math stays in exact floating point;
//! [`NodeLayout::snapped`] is the separate step that rounds the result to
//! whole canvas units.

pub mod measure;

pub use measure::{
    ContentRole, ContentStyle, MeasureContent, MonospaceMeasure, PainterMeasure, TextMeasure,
};

use crate::model::IconId;
use crate::preferences::Preferences;
use egui::{Pos2, Rect, Vec2};

/// Presentation content of a node, rebuilt from its model on every refresh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeContent {
    pub header: String,
    pub body: String,
    pub icon: Option<IconId>,
}

/// Result of one layout pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeLayout {
    /// Header size including the icon allowance
    pub header_size: Vec2,
    pub body_size: Vec2,
    /// Full node rectangle including port bands and padding
    pub rect: Rect,
    /// Area between the port bands, inset horizontally by the extra padding
    pub content_rect: Rect,
}

impl NodeLayout {
    /// Empty layout anchored at `origin`, used before the first pass
    pub fn at(origin: Pos2) -> Self {
        let rect = Rect::from_min_size(origin, Vec2::ZERO);
        Self {
            header_size: Vec2::ZERO,
            body_size: Vec2::ZERO,
            rect,
            content_rect: rect,
        }
    }

    /// Smallest node size possible, reached when all content measures zero
    /// and the icon size is zero
    pub fn min_size(prefs: &Preferences) -> Vec2 {
        let prefs = prefs.sanitized();
        Vec2::new(
            2.0 * prefs.content_padding + 2.0 * prefs.content_extra_padding_x,
            2.0 * prefs.content_padding + 2.0 * prefs.port_height,
        )
    }

    /// Round to whole canvas units.
    ///
    /// The origin is rounded to the nearest unit. Sizes are rounded up so the
    /// node never shrinks below its content, and the width is raised to an
    /// even number so centred ports sit on whole units. The content
    /// rectangle is re-derived from the snapped node rectangle.
    pub fn snapped(&self, prefs: &Preferences) -> Self {
        let prefs = prefs.sanitized();
        let size = Vec2::new(even_ceil(self.rect.width()), self.rect.height().ceil());
        let rect = Rect::from_min_size(self.rect.min.round(), size);
        Self {
            header_size: self.header_size.round(),
            body_size: self.body_size.round(),
            rect,
            content_rect: content_rect_for(
                rect,
                prefs.content_extra_padding_x.round(),
                prefs.port_height.round(),
            ),
        }
    }

    /// Move both rectangles by `delta`
    pub fn translate(&self, delta: Vec2) -> Self {
        Self {
            rect: self.rect.translate(delta),
            content_rect: self.content_rect.translate(delta),
            ..*self
        }
    }

    /// Where the header text (and icon) is drawn
    pub fn header_rect(&self, prefs: &Preferences) -> Rect {
        let padding = prefs.sanitized().content_padding;
        Rect::from_min_size(self.content_rect.min + Vec2::splat(padding), self.header_size)
    }

    /// Where the body text is drawn, directly below the header
    pub fn body_rect(&self, prefs: &Preferences) -> Rect {
        let padding = prefs.sanitized().content_padding;
        let min = self.content_rect.min + Vec2::new(padding, padding + self.header_size.y);
        Rect::from_min_size(min, self.body_size)
    }
}

/// Lay out `content` with its top-left corner at `origin`, without rounding
pub fn compute_layout(
    origin: Pos2,
    content: &NodeContent,
    prefs: &Preferences,
    measurer: &dyn TextMeasure,
) -> NodeLayout {
    let prefs = prefs.sanitized();

    let header = measurer.measure(
        &MeasureContent {
            text: &content.header,
            icon: content.icon,
        },
        &ContentStyle::header(&prefs),
    );
    let body = measurer.measure(
        &MeasureContent {
            text: &content.body,
            icon: None,
        },
        &ContentStyle::body(&prefs),
    );

    let header_size = Vec2::new(
        non_negative(header.x) + prefs.icon_size,
        non_negative(header.y).max(prefs.icon_size),
    );
    let body_size = Vec2::new(non_negative(body.x), non_negative(body.y));

    let content_size = Vec2::new(
        header_size.x.max(body_size.x),
        header_size.y + body_size.y,
    );
    let size = content_size
        + Vec2::splat(2.0 * prefs.content_padding)
        + Vec2::new(2.0 * prefs.content_extra_padding_x, 2.0 * prefs.port_height);

    let rect = Rect::from_min_size(origin, size);
    log::trace!(
        "Layout at ({:.1}, {:.1}): content {:?}, node {:?}",
        origin.x,
        origin.y,
        content_size,
        size
    );

    NodeLayout {
        header_size,
        body_size,
        rect,
        content_rect: content_rect_for(rect, prefs.content_extra_padding_x, prefs.port_height),
    }
}

fn content_rect_for(rect: Rect, inset_x: f32, band: f32) -> Rect {
    Rect::from_min_size(
        rect.min + Vec2::new(inset_x, band),
        Vec2::new(
            (rect.width() - 2.0 * inset_x).max(0.0),
            (rect.height() - 2.0 * band).max(0.0),
        ),
    )
}

fn non_negative(value: f32) -> f32 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        0.0
    }
}

fn even_ceil(value: f32) -> f32 {
    let ceiled = value.ceil();
    if ceiled % 2.0 == 0.0 {
        ceiled
    } else {
        ceiled + 1.0
    }
}

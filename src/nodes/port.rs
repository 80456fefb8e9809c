//! Port geometry for connecting tree edges

use crate::preferences::Preferences;
use egui::{Pos2, Rect, Vec2};

/// Type of port (input or output)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortType {
    /// Top band, where the edge from the parent arrives
    Input,
    /// Bottom band, where edges to the children leave
    Output,
}

/// Rectangle of a port on a node with bounding rectangle `node_rect`.
///
/// Horizontally centred, `port_width_trim` narrower than the node and
/// `port_height` tall. Input ports sit on the top edge, output ports on the
/// bottom edge.
pub fn port_rect(node_rect: Rect, prefs: &Preferences, port_type: PortType) -> Rect {
    let prefs = prefs.sanitized();
    let width = (node_rect.width() - prefs.port_width_trim).max(0.0);
    let height = prefs.port_height;
    let x = node_rect.center().x - width / 2.0;
    let y = match port_type {
        PortType::Input => node_rect.min.y,
        PortType::Output => node_rect.max.y - height,
    };
    Rect::from_min_size(Pos2::new(x, y), Vec2::new(width, height))
}

//! Behaviour tree canvas nodes
//!
//! Each node on the canvas is bound to a behaviour model, keeps its
//! parent/child links consistent under reparenting, and sizes itself from
//! its rendered header and body text. Rendering, input handling and
//! persistence of the tree belong to the host editor.

pub mod constants;
pub mod layout;
pub mod model;
pub mod nodes;
pub mod preferences;

#[cfg(test)]
mod testing;

pub use layout::{compute_layout, MonospaceMeasure, NodeContent, NodeLayout, TextMeasure};
pub use model::{display_name, BehaviorModel, IconId};
pub use nodes::{NodeId, NodeKind, NodeTree, PortType, TreeNode};
pub use preferences::{Preferences, PreferencesError, PreferencesResult};

// Re-export the egui geometry types used throughout the API
pub use egui::{Pos2, Rect, Vec2};

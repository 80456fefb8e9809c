//! Node system - canvas nodes, their tree links and port geometry

pub mod node;
pub mod port;
pub mod tree;

// Re-export core types
pub use node::{NodeId, NodeKind, TreeNode};
pub use port::{port_rect, PortType};
pub use tree::{NodeTree, PreorderIter};

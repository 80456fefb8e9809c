//! Lays out a small behaviour tree and prints the resulting geometry.
//!
//! Preferences are read from the user's config directory when present.
//! Set `RUST_LOG=debug` to see tree mutations.

use behave_canvas::{BehaviorModel, IconId, MonospaceMeasure, NodeTree, Pos2, Preferences, Rect};

struct Sequence;

impl BehaviorModel for Sequence {
    fn title(&self) -> &str {
        ""
    }

    fn write_description(&self, out: &mut String) {
        out.push_str("Runs children left to right\nuntil one fails");
    }

    fn comment(&self) -> &str {
        ""
    }

    fn icon(&self) -> Option<IconId> {
        Some(IconId(1))
    }
}

struct MoveToTarget {
    speed: f32,
}

impl BehaviorModel for MoveToTarget {
    fn title(&self) -> &str {
        "Chase"
    }

    fn write_description(&self, out: &mut String) {
        out.push_str(&format!("Move to target at {:.1} m/s", self.speed));
    }

    fn comment(&self) -> &str {
        ""
    }
}

struct Wait;

impl BehaviorModel for Wait {
    fn title(&self) -> &str {
        ""
    }

    fn write_description(&self, _out: &mut String) {}

    fn comment(&self) -> &str {
        "tuned for the door animation"
    }
}

fn format_rect(rect: Rect) -> String {
    format!(
        "({}, {}) {}x{}",
        rect.min.x,
        rect.min.y,
        rect.width(),
        rect.height()
    )
}

fn main() {
    env_logger::init();

    let prefs = Preferences::load_or_default();
    let measure = MonospaceMeasure::default();
    let mut tree = NodeTree::new();

    let root = tree.add_node(Sequence, true, Pos2::new(0.0, 0.0));
    let wait = tree.add_node(Wait, false, Pos2::new(220.0, 160.0));
    let chase = tree.add_node(MoveToTarget { speed: 3.5 }, false, Pos2::new(-40.0, 150.0));

    tree.attach(wait, Some(root));
    tree.attach(chase, Some(root));
    tree.layout_all(&prefs, &measure);
    tree.sort_children(root);

    for node in tree.iter_preorder(root) {
        let indent = if node.is_orphan() { "" } else { "  " };
        println!("{}{} [{}]", indent, node.content().header, node.id());
        println!("{}  rect:    {}", indent, format_rect(node.rect()));
        println!("{}  content: {}", indent, format_rect(node.content_rect()));
        println!("{}  input:   {}", indent, format_rect(node.input_port(&prefs)));
        if node.has_output() {
            println!("{}  output:  {}", indent, format_rect(node.output_port(&prefs)));
        }
    }

    if let Some((min_x, max_x)) = tree.bounds_x(root) {
        println!("children span x: {} .. {}", min_x, max_x);
    }
    if let Some(y) = tree.nearest_input_y(root) {
        println!("nearest child y: {}", y);
    }
}

//! The behaviour model a canvas node visualizes

/// Identifier of an icon drawn in a node header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IconId(pub u32);

/// Behaviour object bound to a canvas node.
///
/// The node only reads from the model when refreshing its text, so
/// implementations may change their values between layout passes.
pub trait BehaviorModel {
    /// User-assigned title, may be empty
    fn title(&self) -> &str;

    /// Append the behaviour's description to `out`
    fn write_description(&self, out: &mut String);

    /// Free-form comment, may be empty
    fn comment(&self) -> &str;

    /// Type identifier used to derive the fallback display name
    fn type_name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Icon shown next to the header text
    fn icon(&self) -> Option<IconId> {
        None
    }
}

/// Turn a type identifier into a human-readable name.
///
/// Keeps the last path segment, drops generic arguments and member prefixes,
/// and splits camel case and digit runs into words:
/// `game::MoveToTarget<f32>` becomes `Move To Target`.
pub fn display_name(type_name: &str) -> String {
    let base = type_name.split('<').next().unwrap_or(type_name);
    let base = base.rsplit("::").next().unwrap_or(base);
    let base = base.rsplit('.').next().unwrap_or(base);
    let base = base.strip_prefix("m_").unwrap_or(base).trim_start_matches('_');

    let chars: Vec<char> = base.chars().collect();
    let mut name = String::with_capacity(base.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c.is_whitespace() {
            if !name.is_empty() && !name.ends_with(' ') {
                name.push(' ');
            }
            continue;
        }

        if i > 0 && !name.is_empty() && !name.ends_with(' ') {
            let prev = chars[i - 1];
            let next = chars.get(i + 1).copied();
            let word_start = if c.is_uppercase() {
                prev.is_lowercase()
                    || prev.is_ascii_digit()
                    || (prev.is_uppercase() && next.is_some_and(char::is_lowercase))
            } else if c.is_ascii_digit() {
                prev.is_alphabetic()
            } else {
                false
            };
            if word_start {
                name.push(' ');
            }
        }
        name.push(c);
    }

    let name = name.trim_end();
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

//! Naming-convention conversion between the two input sources.
//!
//! The packet-id report uses namespaced snake case (`minecraft:add_entity`),
//! the field-layout dump uses Java-flavored camel case (`entityId`,
//! `ClientboundAddEntityPacket`). Generated structs are UpperCamelCase,
//! generated fields snake_case.

use once_cell::sync::Lazy;
use regex::Regex;

/// Rust keywords a wire field name may collide with. Escaped with `r#`, not
/// renamed: the snake spelling has to keep matching the wire field name.
const RESERVED: &[&str] = &[
    "type", "move", "match", "ref", "self", "super", "mod", "fn", "let", "const", "static", "use",
    "impl", "trait", "struct", "enum", "pub", "mut", "if", "else", "for", "while", "loop",
    "return", "break", "continue", "async", "await", "dyn", "in", "where", "crate", "extern",
    "unsafe", "as",
];

/// Convert a camel-case name to snake case.
///
/// Splits before an uppercase letter that follows a lowercase letter or
/// digit, and before the trailing uppercase letter of a 2+ run so that
/// `UUIDField` becomes `uuid_field` rather than `uuidfield`.
pub fn to_snake(name: &str) -> String {
    static RE_ACRONYM: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"([A-Z]+)([A-Z][a-z])").expect("acronym regex"));
    static RE_BOUNDARY: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"([a-z\d])([A-Z])").expect("boundary regex"));

    let s = RE_ACRONYM.replace_all(name, "${1}_${2}");
    let s = RE_BOUNDARY.replace_all(&s, "${1}_${2}");
    s.to_lowercase()
}

/// Convert a namespaced snake-case packet name to an UpperCamelCase type
/// name: `minecraft:move_player/pos` -> `MovePlayerPos`.
pub fn to_pascal(name: &str) -> String {
    name.replace("minecraft:", "")
        .replace('/', "_")
        .split('_')
        .map(capitalize)
        .collect()
}

fn capitalize(part: &str) -> String {
    let mut chars = part.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Snake-case a wire field name and escape it if it lands on a keyword.
pub fn field_ident(name: &str) -> String {
    let snake = to_snake(name);
    if RESERVED.contains(&snake.as_str()) {
        format!("r#{snake}")
    } else {
        snake
    }
}

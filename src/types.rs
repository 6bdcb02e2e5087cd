//! Declared-type resolution.
//!
//! A field's declared type string is parsed once into a small AST, then
//! classified structurally: either the whole type is built from the closed
//! well-known set (possibly behind `Vec`/`Option` wrappers) and can be
//! derived mechanically, or it degrades to a borrowed byte span with the
//! original spelling kept in a comment.

use std::fmt;

/// The closed set of primitives the wire codec can derive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    Bool,
    String,
    Uuid,
    Position,
    Nbt,
    BlockState,
}

impl Primitive {
    fn parse(text: &str) -> Option<Self> {
        use Primitive::*;
        Some(match text {
            "i8" => I8,
            "i16" => I16,
            "i32" => I32,
            "i64" => I64,
            "f32" => F32,
            "f64" => F64,
            "bool" => Bool,
            "String" => String,
            "Uuid" => Uuid,
            "Position" => Position,
            "Nbt" => Nbt,
            "BlockState" => BlockState,
            _ => return None,
        })
    }

    fn name(self) -> &'static str {
        use Primitive::*;
        match self {
            I8 => "i8",
            I16 => "i16",
            I32 => "i32",
            I64 => "i64",
            F32 => "f32",
            F64 => "f64",
            Bool => "bool",
            String => "String",
            Uuid => "Uuid",
            Position => "Position",
            Nbt => "Nbt",
            BlockState => "BlockState",
        }
    }
}

/// Parsed shape of a declared type string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    Primitive(Primitive),
    Seq(Box<FieldKind>),
    Optional(Box<FieldKind>),
    /// Anything the parser does not recognize, original spelling kept.
    Opaque(String),
}

impl FieldKind {
    pub fn parse(text: &str) -> Self {
        if let Some(p) = Primitive::parse(text) {
            return FieldKind::Primitive(p);
        }
        if let Some(inner) = text.strip_prefix("Vec<").and_then(|s| s.strip_suffix('>')) {
            return FieldKind::Seq(Box::new(FieldKind::parse(inner)));
        }
        if let Some(inner) = text.strip_prefix("Option<").and_then(|s| s.strip_suffix('>')) {
            return FieldKind::Optional(Box::new(FieldKind::parse(inner)));
        }
        FieldKind::Opaque(text.to_owned())
    }

    /// A wrapper is known iff its element is; `Opaque` never is.
    pub fn is_known(&self) -> bool {
        match self {
            FieldKind::Primitive(_) => true,
            FieldKind::Seq(inner) | FieldKind::Optional(inner) => inner.is_known(),
            FieldKind::Opaque(_) => false,
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Primitive(p) => f.write_str(p.name()),
            FieldKind::Seq(inner) => write!(f, "Vec<{inner}>"),
            FieldKind::Optional(inner) => write!(f, "Option<{inner}>"),
            FieldKind::Opaque(text) => f.write_str(text),
        }
    }
}

/// Final resolution of one declared type. Strictly binary: fully known, or
/// an opaque borrowed span carrying the declared spelling as documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedType {
    Known(FieldKind),
    Opaque(String),
}

impl ResolvedType {
    pub fn resolve(text: &str) -> Self {
        let kind = FieldKind::parse(text);
        if kind.is_known() {
            ResolvedType::Known(kind)
        } else {
            ResolvedType::Opaque(text.to_owned())
        }
    }

    pub fn is_opaque(&self) -> bool {
        matches!(self, ResolvedType::Opaque(_))
    }

    /// Render the Rust type text as it appears in a generated field.
    pub fn render(&self) -> String {
        match self {
            ResolvedType::Known(kind) => kind.to_string(),
            ResolvedType::Opaque(original) => format!("/* {original} */ Cow<'a, [u8]>"),
        }
    }
}

pub fn is_known_type(text: &str) -> bool {
    FieldKind::parse(text).is_known()
}

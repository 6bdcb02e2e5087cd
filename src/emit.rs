//! Text emission for one packet: struct definition plus `impl Packet` block.
//!
//! Everything renders into plain `String` blocks; the assembler owns module
//! nesting and indentation.

use std::fmt::Write;

use crate::ident::field_ident;
use crate::schema::FieldInfo;
use crate::types::ResolvedType;

/// One payload field after name normalization and type resolution.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub name: String,
    pub ty: ResolvedType,
}

pub fn resolve_fields(fields: &[FieldInfo]) -> Vec<ResolvedField> {
    fields
        .iter()
        .map(|f| ResolvedField {
            name: field_ident(&f.name),
            ty: ResolvedType::resolve(&f.rust_type),
        })
        .collect()
}

/// A struct borrows iff at least one field degraded to an opaque span.
pub fn needs_lifetime(fields: &[ResolvedField]) -> bool {
    fields.iter().any(|f| f.ty.is_opaque())
}

/// Render the struct definition for a packet with payload fields.
///
/// Field order is the extraction order from the field-layout dump; it is the
/// on-wire order and must not be sorted. The full derive set (with the wire
/// codec) only applies when every field resolved as known.
pub fn emit_struct(name: &str, fields: &[ResolvedField], packet_id: i32) -> String {
    let all_known = fields.iter().all(|f| !f.ty.is_opaque());
    let lifetime = if needs_lifetime(fields) { "<'a>" } else { "" };

    let mut out = String::new();
    writeln!(out, "/// Packet ID: {packet_id}").unwrap();
    if all_known {
        writeln!(out, "#[derive(Debug, Clone, Encode, Decode, Serialize, Deserialize)]").unwrap();
    } else {
        writeln!(out, "#[derive(Debug, Clone, Serialize, Deserialize)]").unwrap();
    }
    writeln!(out, "pub struct {name}{lifetime} {{").unwrap();
    for f in fields {
        writeln!(out, "    pub {}: {},", f.name, f.ty.render()).unwrap();
    }
    writeln!(out, "}}").unwrap();
    out
}

/// A payload-less packet is a unit struct; always fully known, and default
/// construction comes for free.
pub fn emit_empty_struct(name: &str, packet_id: i32) -> String {
    let mut out = String::new();
    writeln!(out, "/// Packet ID: {packet_id}").unwrap();
    writeln!(
        out,
        "#[derive(Debug, Clone, Default, Encode, Decode, Serialize, Deserialize)]"
    )
    .unwrap();
    writeln!(out, "pub struct {name};").unwrap();
    out
}

/// Bind the id/state/direction constant trio to the generated type.
pub fn emit_packet_impl(
    name: &str,
    packet_id: i32,
    state: &str,
    direction: &str,
    needs_lifetime: bool,
) -> String {
    let lifetime = if needs_lifetime { "<'_>" } else { "" };
    let state_variant = state_variant(state);
    let dir_variant = direction_variant(direction);

    let mut out = String::new();
    writeln!(out, "impl Packet for {name}{lifetime} {{").unwrap();
    writeln!(out, "    const ID: i32 = {packet_id};").unwrap();
    writeln!(out, "    const STATE: State = State::{state_variant};").unwrap();
    writeln!(out, "    const DIRECTION: Direction = Direction::{dir_variant};").unwrap();
    writeln!(out, "}}").unwrap();
    out
}

fn state_variant(state: &str) -> &'static str {
    match state {
        "handshake" => "Handshaking",
        "status" => "Status",
        "login" => "Login",
        "configuration" => "Configuration",
        "play" => "Play",
        _ => "Play",
    }
}

fn direction_variant(direction: &str) -> &'static str {
    if direction == "clientbound" {
        "Clientbound"
    } else {
        "Serverbound"
    }
}

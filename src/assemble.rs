//! Per-state module assembly.
//!
//! Drives one generation pass: walks the fixed state order, pairs every
//! packet id with its extracted field layout, and renders one module file per
//! state plus the crate-root manifest. Writing the files is the caller's job.

use std::collections::HashMap;
use std::fmt::Write;

use crate::emit::{
    emit_empty_struct, emit_packet_impl, emit_struct, needs_lifetime, resolve_fields,
};
use crate::ident::to_pascal;
use crate::schema::{FieldInfo, PacketIds};

/// Connection states in emission order.
pub const STATES: [&str; 5] = ["handshake", "status", "login", "configuration", "play"];

const DIRECTIONS: [&str; 2] = ["clientbound", "serverbound"];

/// One rendered file, ready to be written by the shell.
#[derive(Debug)]
pub struct OutputFile {
    pub filename: String,
    pub content: String,
}

/// Pass-through knobs for the manifest.
#[derive(Debug, Default)]
pub struct GenOptions {
    pub protocol_version: Option<i32>,
    pub protocol_name: Option<String>,
}

/// Render every state module plus the manifest.
pub fn assemble(
    ids: &PacketIds,
    fields_by_class: &HashMap<&str, &[FieldInfo]>,
    opts: &GenOptions,
) -> Vec<OutputFile> {
    let mut files: Vec<OutputFile> = STATES
        .iter()
        .map(|state| OutputFile {
            filename: format!("{state}.rs"),
            content: generate_state_module(state, ids, fields_by_class),
        })
        .collect();

    files.push(OutputFile {
        filename: "lib.rs".to_owned(),
        content: generate_manifest(opts),
    });
    files
}

fn generate_state_module(
    state: &str,
    ids: &PacketIds,
    fields_by_class: &HashMap<&str, &[FieldInfo]>,
) -> String {
    let mut out = String::new();
    writeln!(out, "// Auto-generated from Minecraft - {state}").unwrap();
    writeln!(out, "// Do not edit manually").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "#![allow(dead_code)]").unwrap();
    writeln!(out).unwrap();
    writeln!(out, "use std::borrow::Cow;").unwrap();
    writeln!(
        out,
        "use mc_protocol::{{Encode, Decode, Packet, State, Direction, VarInt, Uuid, Position, Nbt, BlockState}};"
    )
    .unwrap();
    writeln!(out, "use serde::{{Serialize, Deserialize}};").unwrap();
    writeln!(out).unwrap();

    let empty = HashMap::new();
    let state_ids = ids.get(state).unwrap_or(&empty);

    for direction in DIRECTIONS {
        let Some(dir_ids) = state_ids.get(direction) else {
            continue;
        };
        if dir_ids.is_empty() {
            continue;
        }

        let mut packets: Vec<_> = dir_ids.iter().collect();
        packets.sort_by_key(|(_, info)| info.protocol_id);

        writeln!(out, "pub mod {direction} {{").unwrap();
        writeln!(out, "    use super::*;").unwrap();
        writeln!(out).unwrap();

        for (pkt_name, pkt_info) in packets {
            let block = generate_packet(pkt_name, pkt_info.protocol_id, state, direction, fields_by_class);
            push_indented(&mut out, &block);
        }

        writeln!(out, "}}").unwrap();
        writeln!(out).unwrap();
    }

    out
}

fn generate_packet(
    pkt_name: &str,
    pkt_id: i32,
    state: &str,
    direction: &str,
    fields_by_class: &HashMap<&str, &[FieldInfo]>,
) -> String {
    let struct_name = to_pascal(pkt_name);

    // Extracted class names look like "ClientboundAddEntityPacket"; fall
    // back through the less decorated spellings.
    let dir_prefix = if direction == "clientbound" {
        "Clientbound"
    } else {
        "Serverbound"
    };
    let candidates = [
        format!("{dir_prefix}{struct_name}Packet"),
        format!("{struct_name}Packet"),
        struct_name.clone(),
    ];
    let fields = candidates
        .iter()
        .find_map(|candidate| fields_by_class.get(candidate.as_str()).copied());

    if fields.is_none() && !fields_by_class.is_empty() {
        // Could be a genuinely payload-less packet, or a naming heuristic
        // miss. Either way the output is an empty struct; leave a trace so
        // misses are auditable.
        tracing::warn!(
            packet = pkt_name,
            state,
            direction,
            tried = ?candidates,
            "no field layout matched; emitting empty payload"
        );
    }

    let mut out = String::new();
    match fields {
        Some(flds) if !flds.is_empty() => {
            let resolved = resolve_fields(flds);
            out.push_str(&emit_struct(&struct_name, &resolved, pkt_id));
            out.push('\n');
            out.push_str(&emit_packet_impl(
                &struct_name,
                pkt_id,
                state,
                direction,
                needs_lifetime(&resolved),
            ));
        }
        _ => {
            out.push_str(&emit_empty_struct(&struct_name, pkt_id));
            out.push('\n');
            out.push_str(&emit_packet_impl(&struct_name, pkt_id, state, direction, false));
        }
    }
    out.push('\n');
    out
}

fn generate_manifest(opts: &GenOptions) -> String {
    let mut out = String::new();
    writeln!(out, "// Auto-generated Minecraft packet definitions").unwrap();
    writeln!(out, "// Regenerate with packetgen").unwrap();
    writeln!(out).unwrap();

    if let Some(version) = opts.protocol_version {
        writeln!(out, "/// Protocol version for this build").unwrap();
        writeln!(out, "pub const PROTOCOL_VERSION: i32 = {version};").unwrap();
        writeln!(out).unwrap();
    }

    if let Some(name) = &opts.protocol_name {
        writeln!(out, "/// Minecraft version name for this build").unwrap();
        writeln!(out, "pub const PROTOCOL_NAME: &str = {name:?};").unwrap();
        writeln!(out).unwrap();
    }

    writeln!(out, "// Re-export protocol types").unwrap();
    writeln!(out, "pub use mc_protocol::{{State, Direction, Packet}};").unwrap();
    writeln!(out).unwrap();

    for state in STATES {
        writeln!(out, "pub mod {state};").unwrap();
    }
    out
}

/// Append a rendered block one module level deep. Blank lines stay blank.
fn push_indented(out: &mut String, block: &str) {
    for line in block.lines() {
        if line.is_empty() {
            out.push('\n');
        } else {
            out.push_str("    ");
            out.push_str(line);
            out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{self, PacketFields};
    use serde_json::json;

    fn ids(value: serde_json::Value) -> PacketIds {
        serde_json::from_value(value).unwrap()
    }

    fn layouts(value: serde_json::Value) -> PacketFields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn packets_are_sorted_by_protocol_id() {
        let ids = ids(json!({
            "status": {
                "clientbound": {
                    "minecraft:pong_response": { "protocol_id": 1 },
                    "minecraft:status_response": { "protocol_id": 0 }
                }
            }
        }));
        let content = generate_state_module("status", &ids, &HashMap::new());
        let first = content.find("StatusResponse").unwrap();
        let second = content.find("PongResponse").unwrap();
        assert!(first < second);
    }

    #[test]
    fn empty_direction_is_not_emitted() {
        let ids = ids(json!({
            "handshake": {
                "serverbound": {
                    "minecraft:intention": { "protocol_id": 0 }
                }
            }
        }));
        let content = generate_state_module("handshake", &ids, &HashMap::new());
        assert!(content.contains("pub mod serverbound {"));
        assert!(!content.contains("pub mod clientbound"));
    }

    #[test]
    fn absent_state_still_renders_a_header_only_module() {
        let content = generate_state_module("login", &ids(json!({})), &HashMap::new());
        assert!(content.contains("// Auto-generated from Minecraft - login"));
        assert!(!content.contains("pub mod"));
    }

    #[test]
    fn direction_prefixed_class_wins_the_lookup() {
        let ids = ids(json!({
            "play": {
                "clientbound": {
                    "minecraft:add_entity": { "protocol_id": 1 }
                }
            }
        }));
        let layouts = layouts(json!({
            "play": {
                "clientbound": [
                    {
                        "className": "ClientboundAddEntityPacket",
                        "fields": [{ "name": "entityId", "rustType": "i32" }]
                    },
                    {
                        "className": "AddEntityPacket",
                        "fields": [{ "name": "wrong", "rustType": "bool" }]
                    }
                ]
            }
        }));
        let index = schema::fields_by_class(&layouts);
        let content = generate_state_module("play", &ids, &index);
        assert!(content.contains("pub entity_id: i32,"));
        assert!(!content.contains("pub wrong"));
    }

    #[test]
    fn lookup_miss_falls_back_to_an_empty_payload() {
        let ids = ids(json!({
            "play": {
                "serverbound": {
                    "minecraft:pong": { "protocol_id": 36 }
                }
            }
        }));
        let layouts = layouts(json!({
            "play": { "serverbound": [
                { "className": "SomethingElse", "fields": [] }
            ]}
        }));
        let index = schema::fields_by_class(&layouts);
        let content = generate_state_module("play", &ids, &index);
        assert!(content.contains("pub struct Pong;"));
        assert!(content.contains(
            "#[derive(Debug, Clone, Default, Encode, Decode, Serialize, Deserialize)]"
        ));
    }

    #[test]
    fn manifest_declares_consts_and_modules() {
        let opts = GenOptions {
            protocol_version: Some(772),
            protocol_name: Some("1.21.8".to_owned()),
        };
        let manifest = generate_manifest(&opts);
        assert!(manifest.contains("pub const PROTOCOL_VERSION: i32 = 772;"));
        assert!(manifest.contains("pub const PROTOCOL_NAME: &str = \"1.21.8\";"));
        assert!(manifest.contains("pub use mc_protocol::{State, Direction, Packet};"));
        for state in STATES {
            assert!(manifest.contains(&format!("pub mod {state};")));
        }
    }

    #[test]
    fn manifest_omits_absent_options() {
        let manifest = generate_manifest(&GenOptions::default());
        assert!(!manifest.contains("PROTOCOL_VERSION"));
        assert!(!manifest.contains("PROTOCOL_NAME"));
    }

    #[test]
    fn assemble_produces_five_states_and_a_manifest() {
        let files = assemble(&ids(json!({})), &HashMap::new(), &GenOptions::default());
        let names: Vec<_> = files.iter().map(|f| f.filename.as_str()).collect();
        assert_eq!(
            names,
            [
                "handshake.rs",
                "status.rs",
                "login.rs",
                "configuration.rs",
                "play.rs",
                "lib.rs"
            ]
        );
    }
}

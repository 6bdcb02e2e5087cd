//! Input document types.
//!
//! Two JSON documents drive a generation pass: the packet-id report from the
//! vanilla data generator (state -> direction -> packet name -> id) and the
//! field-layout dump from reflection extraction (state -> direction -> list
//! of classes with their fields).

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// One packet-id entry from the data generator report.
#[derive(Debug, Deserialize)]
pub struct PacketIdInfo {
    pub protocol_id: i32,
}

/// State -> Direction -> PacketName -> PacketIdInfo
pub type PacketIds = HashMap<String, HashMap<String, HashMap<String, PacketIdInfo>>>;

/// One field of a packet payload, as extracted by reflection.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldInfo {
    pub name: String,
    #[serde(rename = "rustType")]
    pub rust_type: String,
}

/// One extracted packet class with its field list.
#[derive(Debug, Deserialize)]
pub struct PacketInfo {
    #[serde(rename = "className")]
    pub class_name: String,
    pub fields: Vec<FieldInfo>,
}

/// State -> Direction -> Vec<PacketInfo>
pub type PacketFields = HashMap<String, HashMap<String, Vec<PacketInfo>>>;

pub fn load_packet_ids(path: &Path) -> Result<PacketIds, Error> {
    load_json(path)
}

pub fn load_packet_fields(path: &Path) -> Result<PacketFields, Error> {
    load_json(path)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, Error> {
    let text = fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_owned(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| Error::Parse {
        path: path.to_owned(),
        source,
    })
}

/// Flatten the field-layout document into a class-name lookup. The state and
/// direction levels carry no extra information here; class names are already
/// unique across the whole dump.
pub fn fields_by_class(data: &PacketFields) -> HashMap<&str, &[FieldInfo]> {
    let mut map = HashMap::new();
    for dirs in data.values() {
        for packets in dirs.values() {
            for p in packets {
                map.insert(p.class_name.as_str(), p.fields.as_slice());
            }
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_layout_parses_camel_case_keys() {
        let json = r#"{
            "play": {
                "clientbound": [
                    {
                        "className": "ClientboundAddEntityPacket",
                        "fields": [
                            { "name": "entityId", "rustType": "i32" }
                        ]
                    }
                ]
            }
        }"#;
        let data: PacketFields = serde_json::from_str(json).unwrap();
        let index = fields_by_class(&data);
        let fields = index["ClientboundAddEntityPacket"];
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].name, "entityId");
        assert_eq!(fields[0].rust_type, "i32");
    }

    #[test]
    fn packet_ids_parse_nested_maps() {
        let json = r#"{
            "status": {
                "serverbound": {
                    "minecraft:ping_request": { "protocol_id": 1 }
                }
            }
        }"#;
        let ids: PacketIds = serde_json::from_str(json).unwrap();
        assert_eq!(
            ids["status"]["serverbound"]["minecraft:ping_request"].protocol_id,
            1
        );
    }
}

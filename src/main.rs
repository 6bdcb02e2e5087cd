use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use packetgen::assemble::{assemble, GenOptions};
use packetgen::schema;

fn main() -> Result<(), anyhow::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!(
            "Usage: {} <ids_file> <fields_file> <out_dir> [protocol_version] [protocol_name]",
            args[0]
        );
        std::process::exit(1);
    }

    let ids_file = PathBuf::from(&args[1]);
    let fields_file = PathBuf::from(&args[2]);
    let out_dir = PathBuf::from(&args[3]);
    let opts = GenOptions {
        protocol_version: args.get(4).and_then(|s| s.parse().ok()),
        protocol_name: args.get(5).cloned(),
    };

    let ids = schema::load_packet_ids(&ids_file)?;
    let fields = schema::load_packet_fields(&fields_file)?;
    let index = schema::fields_by_class(&fields);

    let files = assemble(&ids, &index, &opts);

    fs::create_dir_all(&out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    for file in &files {
        let path = out_dir.join(&file.filename);
        fs::write(&path, &file.content)
            .with_context(|| format!("failed to write {}", path.display()))?;
        tracing::info!("generated {}", path.display());
    }

    Ok(())
}

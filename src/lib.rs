//! Generate typed Rust packet definitions from protocol descriptor dumps.
//!
//! `packetgen` reads two JSON documents — the packet-id report from the
//! vanilla data generator and a per-packet field-layout dump — and renders
//! one module of struct definitions per connection state, plus a crate-root
//! manifest with version constants and re-exports.
//!
//! Fields whose declared type falls outside the closed well-known set are
//! degraded to a borrowed `Cow<'a, [u8]>` span (with the declared type kept
//! in a comment) instead of failing; such structs lose the derived wire
//! codec and gain a lifetime parameter.

pub mod assemble;
pub mod emit;
pub mod error;
pub mod ident;
pub mod schema;
pub mod types;

pub use assemble::{assemble, GenOptions, OutputFile};
pub use error::Error;

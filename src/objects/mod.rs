//! Parsing primitives for the daemon's text-based object files
//!
//! Two formats share these helpers: brace-delimited `define <type> { ... }`
//! definition blocks, and the bare-label `<type> { key=value }` blocks of
//! the runtime status snapshot.

pub mod blocks;
pub mod document;

pub use blocks::{bare_blocks, define_blocks, parse_define_body, parse_status_body};
pub use document::{host_name_line, Document};

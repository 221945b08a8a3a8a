//! Core primitives for kdm-update (no TUI dependencies).

mod config;
mod filter;
mod source;

pub use config::*;
pub use filter::*;
pub use source::*;

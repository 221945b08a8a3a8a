//! kdm-update - a terminal UI for reviewing k3s CLI-flag changes between
//! release tags.
//!
//! Fetches the unified diff between two k3s tags (from the GitHub compare
//! endpoint or a local snapshot), keeps only the hunks that touch the
//! agent/server CLI definitions, renders them in a scrollable viewer, and
//! hands off to the user's editor to finish the channel-metadata update.

#![deny(missing_docs)]

pub mod core;
pub mod ui;

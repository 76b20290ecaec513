//! Library surface of the Inkshade CLI.
//!
//! Commands live here so they can be unit tested; `main.rs` only parses
//! arguments and dispatches.

pub mod commands;

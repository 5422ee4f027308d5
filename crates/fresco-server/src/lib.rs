//! HTTP server for resolving and compiling fresco design presets.
//!
//! Thin glue over `fresco-preset` and `fresco-css`: filesystem storage
//! for preset documents and compiled assets, plus an axum router exposing
//! the editing and compilation endpoints.

pub mod error;
pub mod server;
pub mod storage;

pub use error::{Error, Result};
pub use server::{build_router, run_server};
pub use storage::PresetStore;

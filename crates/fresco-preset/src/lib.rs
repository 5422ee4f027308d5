//! Design preset model and resolution primitives for fresco.
//!
//! This crate provides:
//! - Core types ([`Preset`], [`ComponentDefinition`], [`TokenSource`],
//!   [`PluginSelection`]) deserialized from YAML or JSON documents
//! - Token table normalization into flat trimmed mappings
//! - Plugin selection resolution (keywords, wildcards, chain combination)
//! - Cycle-guarded `extends` chain flattening behind a [`PresetLoader`]
//! - Chain-wide merges for token tables, components, and variables

mod chain;
mod error;
mod merge;
mod plugins;
mod tokens;
mod types;

pub use chain::{NoPresets, PresetLoader, resolve_chain};
pub use error::{ChainError, PresetError};
pub use merge::{merge_components, merge_token_tables, merge_variables};
pub use plugins::{DEFAULT_PLUGINS, PLUGIN_CATALOG, resolve_plugins};
pub use types::{ComponentDefinition, Preset, PluginSelection, StringOrList, TokenSource};

//! Error types for preset loading and chain resolution.

use thiserror::Error;

/// Errors from reading or parsing a preset document.
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read preset: {0}")]
    Io(#[from] std::io::Error),

    #[error("preset is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("preset is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors from resolving a preset's `extends` chain.
#[derive(Debug, Error)]
pub enum ChainError {
    /// A preset name reappeared while its own chain was still being
    /// resolved. The naive recursive walk would loop forever here.
    #[error("preset inheritance cycle detected at \"{name}\"")]
    Cycle { name: String },

    /// An `extends` entry names a preset the loader does not know.
    /// Distinct from an empty chain: the caller must report it, not
    /// silently resolve without the ancestor.
    #[error("preset not found: \"{name}\"")]
    UnknownPreset { name: String },

    #[error(transparent)]
    Load(#[from] PresetError),
}

//! Inheritance-chain resolution.
//!
//! A preset may extend one or more named presets, which may themselves
//! extend others. Resolution flattens this into a single linear sequence
//! of ancestors, furthest ancestor first, nearest parent last; the caller
//! appends the leaf itself. With `extends: [A, B]` the effective order is
//! `[A, B]` (B nearer the leaf), matching the later-entries-win semantics
//! of the merge step.
//!
//! The walk threads a visited-name set through the recursion: a name that
//! reappears while its own chain is still open aborts resolution with
//! [`ChainError::Cycle`] instead of recursing indefinitely.

use crate::error::{ChainError, PresetError};
use crate::types::Preset;

/// Loads stored presets by name.
///
/// The storage root is owned by the implementation; chain resolution
/// never touches the filesystem directly. `Ok(None)` means the name is
/// unknown, which resolution reports as [`ChainError::UnknownPreset`].
pub trait PresetLoader {
    fn load(&self, name: &str) -> Result<Option<Preset>, PresetError>;
}

/// A loader with no stored presets. Any `extends` reference fails with
/// `UnknownPreset`; useful for standalone documents and tests.
pub struct NoPresets;

impl PresetLoader for NoPresets {
    fn load(&self, _name: &str) -> Result<Option<Preset>, PresetError> {
        Ok(None)
    }
}

/// Resolve the ancestor chain of `leaf`, furthest ancestor first.
///
/// The leaf itself is not included; callers append it after the returned
/// chain. A preset with no `extends` yields an empty chain. `leaf_name`,
/// when known, seeds the visited set so a chain looping back onto the
/// leaf is caught as a cycle.
pub fn resolve_chain(
    leaf: &Preset,
    leaf_name: Option<&str>,
    loader: &dyn PresetLoader,
) -> Result<Vec<Preset>, ChainError> {
    let mut visited: Vec<String> = leaf_name.map(str::to_string).into_iter().collect();
    collect_ancestors(leaf, loader, &mut visited)
}

fn collect_ancestors(
    preset: &Preset,
    loader: &dyn PresetLoader,
    visited: &mut Vec<String>,
) -> Result<Vec<Preset>, ChainError> {
    let Some(extends) = &preset.extends else {
        return Ok(Vec::new());
    };

    // Iterate in reverse and prepend, so the last-declared ancestor ends
    // up closest to the leaf.
    let mut chain: Vec<Preset> = Vec::new();
    for name in extends.as_vec().into_iter().rev() {
        if visited.iter().any(|seen| seen == name) {
            return Err(ChainError::Cycle {
                name: name.to_string(),
            });
        }
        visited.push(name.to_string());

        let ancestor = loader
            .load(name)?
            .ok_or_else(|| ChainError::UnknownPreset {
                name: name.to_string(),
            })?;

        let mut resolved = collect_ancestors(&ancestor, loader, visited)?;
        resolved.push(ancestor);
        resolved.append(&mut chain);
        chain = resolved;
    }

    Ok(chain)
}

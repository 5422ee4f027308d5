//! Chain-wide merges.
//!
//! Precedence everywhere is chain order: first entry is the furthest
//! ancestor (lowest priority), last entry is the leaf (highest priority).
//! Token tables merge per key. Component definitions merge per component
//! name with the later definition replacing the earlier one wholesale
//! (shallow, never deep within `parts`/`modifiers`).

use indexmap::IndexMap;

use crate::types::{ComponentDefinition, Preset};

/// Merge normalized token tables, later tables winning per key.
///
/// Returns `None` when every input is `None`, so a family nobody declared
/// stays absent from the configuration rather than becoming an empty map.
pub fn merge_token_tables<I>(tables: I) -> Option<IndexMap<String, String>>
where
    I: IntoIterator<Item = Option<IndexMap<String, String>>>,
{
    let mut merged: Option<IndexMap<String, String>> = None;
    for table in tables.into_iter().flatten() {
        merged.get_or_insert_with(IndexMap::new).extend(table);
    }
    merged
}

/// Merge component definitions across a chain, keyed by component name.
///
/// Iteration order of the result is merge insertion order: the position a
/// component first appears at is kept even when a later preset overrides
/// its definition.
pub fn merge_components<'a, I>(presets: I) -> IndexMap<String, ComponentDefinition>
where
    I: IntoIterator<Item = &'a Preset>,
{
    let mut merged = IndexMap::new();
    for preset in presets {
        for (name, definition) in &preset.components {
            merged.insert(name.clone(), definition.clone());
        }
    }
    merged
}

/// Merge `variables` maps across a chain, later declarations winning.
pub fn merge_variables<'a, I>(presets: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = &'a Preset>,
{
    let mut merged = IndexMap::new();
    for preset in presets {
        for (name, value) in &preset.variables {
            merged.insert(name.clone(), value.clone());
        }
    }
    merged
}

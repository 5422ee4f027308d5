//! Plugin selection resolution.
//!
//! A plugin is a named utility-class generator in the external compiler.
//! Presets select plugins with a keyword (`all`, `none`, `default`), an
//! explicit identifier list, or wildcard prefixes (`color*`). Resolution
//! expands a selection into a concrete, deduplicated, lexicographically
//! sorted identifier list; resolving an already-resolved list again is a
//! no-op.

use std::collections::BTreeSet;

use crate::types::PluginSelection;

/// Every utility generator the external compiler knows how to emit.
pub const PLUGIN_CATALOG: &[&str] = &[
    "preflight",
    "container",
    "alignContent",
    "alignItems",
    "alignSelf",
    "animation",
    "backgroundColor",
    "blur",
    "borderColor",
    "borderRadius",
    "borderStyle",
    "borderWidth",
    "boxShadow",
    "display",
    "flex",
    "flexDirection",
    "flexGrow",
    "flexShrink",
    "flexWrap",
    "float",
    "fontFamily",
    "fontSize",
    "fontStyle",
    "fontWeight",
    "gap",
    "gridColumn",
    "gridColumnEnd",
    "gridColumnStart",
    "gridRow",
    "gridRowEnd",
    "gridRowStart",
    "gridTemplateColumns",
    "gridTemplateRows",
    "height",
    "justifyContent",
    "justifyItems",
    "justifySelf",
    "lineHeight",
    "margin",
    "minHeight",
    "minWidth",
    "overflow",
    "outline",
    "padding",
    "position",
    "ringColor",
    "ringOffsetColor",
    "ringOffsetWidth",
    "ringOpacity",
    "ringWidth",
    "textAlign",
    "textColor",
    "textDecoration",
    "textOverflow",
    "visibility",
    "whitespace",
    "width",
    "zIndex",
];

/// The subset selected by the `default` keyword: layout, spacing, color,
/// and typography basics.
pub const DEFAULT_PLUGINS: &[&str] = &[
    "preflight",
    "container",
    "backgroundColor",
    "borderRadius",
    "display",
    "flex",
    "flexDirection",
    "fontFamily",
    "fontSize",
    "fontWeight",
    "gap",
    "height",
    "margin",
    "padding",
    "textAlign",
    "textColor",
    "width",
];

/// Expand one selection against a catalog, in catalog order for wildcard
/// entries and declaration order otherwise. No dedup or sort yet.
fn expand(catalog: &[&str], selection: &PluginSelection) -> Vec<String> {
    match selection {
        PluginSelection::All => catalog.iter().map(ToString::to_string).collect(),
        PluginSelection::None => Vec::new(),
        PluginSelection::Default => DEFAULT_PLUGINS.iter().map(ToString::to_string).collect(),
        PluginSelection::List(entries) => entries
            .iter()
            .flat_map(|entry| match entry.strip_suffix('*') {
                Some(stem) => catalog
                    .iter()
                    .filter(|candidate| candidate.starts_with(stem))
                    .map(ToString::to_string)
                    .collect(),
                None => vec![entry.clone()],
            })
            .collect(),
    }
}

/// Resolve plugin selections against a catalog.
///
/// Selections are expanded independently and concatenated in iteration
/// order (ancestor-first when resolving a chain); the combined set is
/// deduplicated and returned sorted for determinism.
pub fn resolve_plugins<'a, I>(catalog: &[&str], selections: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a PluginSelection>,
{
    let combined: BTreeSet<String> = selections
        .into_iter()
        .flat_map(|selection| expand(catalog, selection))
        .collect();
    combined.into_iter().collect()
}

//! Theme configuration assembly.
//!
//! The Config Builder merges a resolved chain's token tables into the
//! configuration object consumed by the external utility compiler:
//! breakpoints, colors, spacing, and radii under a `theme.extend`
//! namespace, the resolved plugin set under `corePlugins`, and raw
//! `theme`/`variants` overrides passed through verbatim.
//!
//! All object precedence runs through [`merge_objects`]; there are no
//! inline spread-style merges. Precedence, lowest to highest:
//!
//! 1. the defaulting skeleton (only when the leaf sets `resolve`)
//! 2. generated token extensions (`theme.extend`)
//! 3. the leaf's raw `theme` override
//!
//! Malformed token values are not rejected here; the compiler is the
//! authority on value syntax and reports them as compile errors.

use indexmap::IndexMap;
use serde_json::{Map, Value, json};

use fresco_preset::{PLUGIN_CATALOG, Preset, TokenSource, merge_token_tables, resolve_plugins};

/// Prefix marking a device value as a raw media query rather than a
/// min-width.
const RAW_PREFIX: &str = "raw:";

/// Shallow-merge two JSON values, the overlay winning.
///
/// When both sides are objects, overlay entries replace base entries key
/// by key (shallow: a colliding nested object is replaced wholesale). A
/// null overlay keeps the base; any other overlay value replaces the base
/// entirely.
pub fn merge_objects(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base), Value::Object(overlay)) => {
            for (key, value) in overlay {
                base.insert(key, value);
            }
            Value::Object(base)
        }
        (base, Value::Null) => base,
        (_, overlay) => overlay,
    }
}

/// Build the configuration object for a resolved chain.
///
/// `chain` is ancestor-first and ends with the leaf preset. The safelist
/// is attached under `safelist` when non-empty so the compiler's purge
/// stage can honor it.
pub fn build_config(chain: &[Preset], safelist: &[String]) -> Value {
    let Some(leaf) = chain.last() else {
        return Value::Object(Map::new());
    };

    let screens = build_screens(merged_tokens(chain, |preset| preset.devices.as_ref()));
    let colors = build_colors(merged_tokens(chain, |preset| preset.colors.as_ref()));
    let spacing = merged_tokens(chain, |preset| preset.spacing.as_ref()).map(tokens_to_json);
    let radius = merged_tokens(chain, |preset| preset.border_radius.as_ref()).map(tokens_to_json);

    let mut extend = Map::new();
    if let Some(screens) = screens {
        extend.insert("screens".to_string(), screens);
    }
    if let Some(colors) = colors {
        extend.insert("colors".to_string(), colors);
    }
    if let Some(radius) = radius {
        extend.insert("borderRadius".to_string(), radius);
    }
    if let Some(spacing) = spacing {
        extend.insert("spacing".to_string(), spacing);
    }

    let generated_theme = json!({ "extend": extend });
    let theme = merge_objects(
        generated_theme,
        leaf.theme.clone().unwrap_or(Value::Null),
    );

    let mut config = Map::new();
    let plugins = resolve_plugins(
        PLUGIN_CATALOG,
        chain.iter().map(|preset| preset.plugin_selection()),
    );
    if !plugins.is_empty() {
        config.insert("corePlugins".to_string(), json!(plugins));
    }
    config.insert("theme".to_string(), theme);
    if let Some(variants) = &leaf.variants {
        config.insert("variants".to_string(), variants.clone());
    }
    if !safelist.is_empty() {
        config.insert("safelist".to_string(), json!(safelist));
    }

    if leaf.resolve {
        merge_objects(defaulting_skeleton(), Value::Object(config))
    } else {
        Value::Object(config)
    }
}

fn merged_tokens<'a, F>(chain: &'a [Preset], family: F) -> Option<IndexMap<String, String>>
where
    F: Fn(&'a Preset) -> Option<&'a TokenSource>,
{
    // A declared-but-empty table counts as undeclared: it must not pull
    // the seeded entries of its family into the configuration.
    merge_token_tables(chain.iter().map(|preset| {
        family(preset)
            .map(TokenSource::parse)
            .filter(|tokens| !tokens.is_empty())
    }))
}

/// Breakpoint mapping: two fixed orientation breakpoints merged with the
/// declared devices, declared entries winning only on key collision.
/// Values prefixed `raw:` become `{ "raw": … }` query objects.
fn build_screens(devices: Option<IndexMap<String, String>>) -> Option<Value> {
    let devices = devices?;

    let mut screens = Map::new();
    screens.insert(
        "portrait".to_string(),
        json!({ "raw": "(orientation: portrait)" }),
    );
    screens.insert(
        "landscape".to_string(),
        json!({ "raw": "(orientation: landscape)" }),
    );
    for (device, value) in devices {
        let entry = match value.strip_prefix(RAW_PREFIX) {
            Some(query) => json!({ "raw": query }),
            None => Value::String(value),
        };
        screens.insert(device, entry);
    }

    Some(Value::Object(screens))
}

/// Color mapping: fixed `transparent`/`current` entries plus one entry
/// per declared color, its value wrapped under a `DEFAULT` shade key so
/// multi-shade expansion stays possible downstream.
fn build_colors(colors: Option<IndexMap<String, String>>) -> Option<Value> {
    let colors = colors?;

    let mut mapping = Map::new();
    mapping.insert("transparent".to_string(), json!("transparent"));
    mapping.insert("current".to_string(), json!("currentColor"));
    for (name, value) in colors {
        mapping.insert(name, json!({ "DEFAULT": value }));
    }

    Some(Value::Object(mapping))
}

fn tokens_to_json(tokens: IndexMap<String, String>) -> Value {
    Value::Object(
        tokens
            .into_iter()
            .map(|(key, value)| (key, Value::String(value)))
            .collect(),
    )
}

/// The fixed base the generated configuration is overlaid on when the
/// leaf requests the defaulting step.
fn defaulting_skeleton() -> Value {
    json!({
        "prefix": "",
        "important": false,
        "separator": ":",
        "theme": {},
        "variants": {},
    })
}

//! Core preset types.
//!
//! A [`Preset`] is a named design document: token tables (colors, spacing,
//! sizes, devices, radii), component style definitions, a plugin selection
//! for the external utility compiler, and raw pass-through overrides.
//! Presets are deserialized from YAML (stored documents) or JSON (inline
//! requests) and are read-only once loaded; resolution merges chains of
//! presets into fresh structures without mutating any input.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

use crate::error::PresetError;

/// A design preset document.
///
/// Every field is optional; an empty document is a valid (if useless)
/// preset. Later presets in an inheritance chain override earlier ones
/// field by field during resolution.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Preset {
    /// Name(s) of presets this one inherits from. A single name is
    /// equivalent to a one-element list.
    pub extends: Option<StringOrList>,

    /// Color token table (family name -> CSS color).
    pub colors: Option<TokenSource>,

    /// Spacing token table.
    pub spacing: Option<TokenSource>,

    /// Size token table.
    pub sizes: Option<TokenSource>,

    /// Device breakpoint table (device name -> min-width or `raw:` query).
    pub devices: Option<TokenSource>,

    /// Border radius token table.
    pub border_radius: Option<TokenSource>,

    /// Component style definitions, keyed by component name.
    pub components: IndexMap<String, ComponentDefinition>,

    /// Plugin selection for the utility compiler.
    pub plugins: Option<PluginSelection>,

    /// Plugin selection override; wins over `plugins` when both are set.
    pub core_plugins: Option<PluginSelection>,

    /// Raw theme override, passed through verbatim and merged over the
    /// generated theme extension (raw keys win on collision).
    pub theme: Option<serde_json::Value>,

    /// Raw variants configuration, passed through verbatim.
    pub variants: Option<serde_json::Value>,

    /// Custom property declarations emitted into the template's `:root`
    /// block (name without the `--` prefix -> value).
    pub variables: IndexMap<String, String>,

    /// Literal CSS appended verbatim after the components layer.
    pub styles: Option<String>,

    /// Produce minified output.
    pub minify: bool,

    /// Pass the generated configuration through the defaulting step.
    pub resolve: bool,

    /// Synthesize shadow-DOM part selectors instead of plain classes.
    pub shadow_dom: bool,
}

impl Preset {
    /// Parse a preset from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, PresetError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Parse a preset from JSON text.
    pub fn from_json(text: &str) -> Result<Self, PresetError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Parse a preset from text, auto-detecting the notation: bodies
    /// starting with `{` are JSON, everything else is YAML.
    pub fn parse(text: &str) -> Result<Self, PresetError> {
        if text.trim_start().starts_with('{') {
            Self::from_json(text)
        } else {
            Self::from_yaml(text)
        }
    }

    /// The effective plugin selection for this preset.
    ///
    /// `corePlugins` wins over `plugins`; a preset declaring neither
    /// selects nothing.
    pub fn plugin_selection(&self) -> &PluginSelection {
        static UNSELECTED: PluginSelection = PluginSelection::None;
        self.core_plugins
            .as_ref()
            .or(self.plugins.as_ref())
            .unwrap_or(&UNSELECTED)
    }
}

/// One component's style definition.
///
/// Each group maps onto one structural style of ruleset during template
/// synthesis: `apply` is the base class body, `parts` are BEM `__`
/// sub-elements, `modifiers` are BEM `--` suffixes, `variants` are plain
/// `-` suffixes, and `states` are pseudo-class suffixes. Values are
/// utility class strings handed to the external compiler unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ComponentDefinition {
    /// Utility classes applied to the base selector.
    pub apply: Option<String>,

    /// Sub-element name -> utility classes (`.name__part`).
    pub parts: IndexMap<String, String>,

    /// Modifier name -> utility classes (`.name--modifier`).
    pub modifiers: IndexMap<String, String>,

    /// Variant name -> utility classes (`.name-variant`).
    pub variants: IndexMap<String, String>,

    /// Pseudo-state name -> utility classes (`.name:state`).
    pub states: IndexMap<String, String>,
}

/// A field accepting either a single string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StringOrList {
    One(String),
    Many(Vec<String>),
}

impl StringOrList {
    /// View the value as a list; a single string is a one-element list.
    pub fn as_vec(&self) -> Vec<&str> {
        match self {
            StringOrList::One(name) => vec![name.as_str()],
            StringOrList::Many(names) => names.iter().map(String::as_str).collect(),
        }
    }
}

/// A token table before normalization: either a raw line-oriented text
/// table (`key: value // comment` per line) or an already-structured
/// mapping. [`TokenSource::parse`] normalizes both into the same flat
/// trimmed mapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TokenSource {
    Table(String),
    Map(IndexMap<String, serde_json::Value>),
}

/// A plugin/module selection expression.
///
/// The wire format is a keyword string or a list of identifiers; anything
/// else (absence, a non-list scalar, a malformed list) selects nothing.
/// List entries ending in `*` are wildcards over the plugin catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluginSelection {
    /// `"all"`: the full plugin catalog.
    All,
    /// `"none"` or any non-list value: no plugins.
    None,
    /// `"default"`: the fixed default subset of the catalog.
    Default,
    /// An explicit list of identifiers, possibly containing wildcards.
    List(Vec<String>),
}

impl Default for PluginSelection {
    fn default() -> Self {
        PluginSelection::None
    }
}

impl<'de> Deserialize<'de> for PluginSelection {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Word(String),
            List(Vec<String>),
            Other(serde::de::IgnoredAny),
        }

        Ok(match Wire::deserialize(deserializer)? {
            Wire::Word(word) => match word.as_str() {
                "all" => PluginSelection::All,
                "default" => PluginSelection::Default,
                // "none" and any unrecognized keyword select nothing.
                _ => PluginSelection::None,
            },
            Wire::List(entries) => PluginSelection::List(entries),
            Wire::Other(_) => PluginSelection::None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_yaml_preset() {
        let preset = Preset::from_yaml(
            r#"
extends: base
colors: |
  primary: #0d6efd
components:
  btn:
    apply: flex
    parts:
      icon: w-4
minify: true
"#,
        )
        .unwrap();

        assert_eq!(preset.extends.unwrap().as_vec(), vec!["base"]);
        assert!(preset.minify);
        assert_eq!(preset.components["btn"].apply.as_deref(), Some("flex"));
        assert_eq!(preset.components["btn"].parts["icon"], "w-4");
    }

    #[test]
    fn parses_json_preset_by_detection() {
        let preset = Preset::parse(r##"{"colors": {"primary": "#000"}}"##).unwrap();
        assert!(matches!(preset.colors, Some(TokenSource::Map(_))));
    }

    #[test]
    fn extends_accepts_single_name_or_list() {
        let single = Preset::from_yaml("extends: base").unwrap();
        assert_eq!(single.extends.unwrap().as_vec(), vec!["base"]);

        let many = Preset::from_yaml("extends: [a, b]").unwrap();
        assert_eq!(many.extends.unwrap().as_vec(), vec!["a", "b"]);
    }

    #[test]
    fn plugin_selection_keywords() {
        let all = Preset::from_yaml("plugins: all").unwrap();
        assert_eq!(all.plugins, Some(PluginSelection::All));

        let none = Preset::from_yaml("plugins: none").unwrap();
        assert_eq!(none.plugins, Some(PluginSelection::None));

        let default = Preset::from_yaml("plugins: default").unwrap();
        assert_eq!(default.plugins, Some(PluginSelection::Default));

        let list = Preset::from_yaml("plugins: [display, color*]").unwrap();
        assert_eq!(
            list.plugins,
            Some(PluginSelection::List(vec![
                "display".to_string(),
                "color*".to_string()
            ]))
        );
    }

    #[test]
    fn plugin_selection_non_list_value_selects_nothing() {
        let preset = Preset::from_yaml("plugins: 42").unwrap();
        assert_eq!(preset.plugins, Some(PluginSelection::None));
    }

    #[test]
    fn core_plugins_win_over_plugins() {
        let preset = Preset::from_yaml("plugins: all\ncorePlugins: [display]").unwrap();
        assert_eq!(
            preset.plugin_selection(),
            &PluginSelection::List(vec!["display".to_string()])
        );
    }

    #[test]
    fn unparseable_body_is_an_error() {
        assert!(Preset::parse("{not json").is_err());
        assert!(Preset::parse("colors: [unclosed").is_err());
    }
}

//! Safelist collection.
//!
//! The external compiler's aggressive purge removes any class name it
//! cannot see in source content. Component class names only exist in the
//! synthesized template, so every literal name they imply is collected
//! here and attached to the configuration for preservation.

use fresco_preset::Preset;

/// Collect every literal class name implied by component definitions
/// across the chain: the base name, `name__part`, `name--modifier`, and
/// `name-variant` for each component. Order is insertion order;
/// duplicates across presets are left in (the compiler tolerates them).
pub fn build_safelist(chain: &[Preset]) -> Vec<String> {
    let mut safelist = Vec::new();
    for preset in chain {
        for (name, definition) in &preset.components {
            safelist.push(name.clone());
            for part in definition.parts.keys() {
                safelist.push(format!("{name}__{part}"));
            }
            for modifier in definition.modifiers.keys() {
                safelist.push(format!("{name}--{modifier}"));
            }
            for variant in definition.variants.keys() {
                safelist.push(format!("{name}-{variant}"));
            }
        }
    }
    safelist
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_preset::Preset;

    #[test]
    fn collects_every_implied_class_name() {
        let preset = Preset::from_yaml(
            "components:\n  btn:\n    apply: flex\n    parts:\n      icon: w-4\n    modifiers:\n      compact: p-1\n    variants:\n      primary: bg-primary\n    states:\n      hover: bg-black",
        )
        .unwrap();

        let safelist = build_safelist(&[preset]);
        assert_eq!(safelist, ["btn", "btn__icon", "btn--compact", "btn-primary"]);
    }

    #[test]
    fn spans_the_whole_chain_and_keeps_duplicates() {
        let ancestor = Preset::from_yaml("components:\n  btn: {apply: flex}").unwrap();
        let leaf = Preset::from_yaml("components:\n  btn: {apply: grid}").unwrap();

        let safelist = build_safelist(&[ancestor, leaf]);
        assert_eq!(safelist, ["btn", "btn"]);
    }

    #[test]
    fn empty_chain_yields_empty_safelist() {
        assert!(build_safelist(&[]).is_empty());
    }
}

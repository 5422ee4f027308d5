//! Component template synthesis.
//!
//! Synthesis turns merged component definitions into the CSS authoring
//! template handed to the external compiler: the three baseline
//! directives, a `:root` block of custom properties, one ruleset group
//! per component inside the components layer, and any literal `styles`
//! text appended verbatim in chain order.
//!
//! The two structural modes, plain class composition and shadow-DOM
//! part-selector composition, are two implementations of one
//! [`ComponentRenderer`] strategy, selected once per resolution.
//! Synthesis is pure: the same merged input always yields byte-identical
//! template text.

use indexmap::IndexMap;

use fresco_preset::ComponentDefinition;

/// Which selector structure to synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Plain class selectors: `.name`, `.name__part`, `.name--modifier`,
    /// `.name-variant`, `.name:state`.
    LightDom,
    /// Shadow-boundary part selectors: `name::part(component)`,
    /// `name::part(part)`, `name::part(component):state`,
    /// `name.name-variant::part(component)`.
    ShadowDom,
}

/// Renders one component's rulesets into the template.
trait ComponentRenderer {
    fn render(&self, name: &str, definition: &ComponentDefinition, out: &mut String);
}

struct LightDom;
struct ShadowDom;

fn push_rule(out: &mut String, selector: &str, classes: &str) {
    out.push_str(selector);
    out.push_str(" {\n  @apply ");
    out.push_str(classes);
    out.push_str(";\n}\n");
}

impl ComponentRenderer for LightDom {
    fn render(&self, name: &str, definition: &ComponentDefinition, out: &mut String) {
        if let Some(apply) = &definition.apply {
            push_rule(out, &format!(".{name}"), apply);
        }
        for (part, classes) in &definition.parts {
            // The authoring format keeps a space before the semicolon in
            // part rules.
            push_rule(out, &format!(".{name}__{part}"), &format!("{classes} "));
        }
        for (modifier, classes) in &definition.modifiers {
            push_rule(out, &format!(".{name}--{modifier}"), classes);
        }
        for (variant, classes) in &definition.variants {
            push_rule(out, &format!(".{name}-{variant}"), classes);
        }
        for (state, classes) in &definition.states {
            push_rule(out, &format!(".{name}:{state}"), classes);
        }
    }
}

impl ComponentRenderer for ShadowDom {
    fn render(&self, name: &str, definition: &ComponentDefinition, out: &mut String) {
        if let Some(apply) = &definition.apply {
            push_rule(out, &format!("{name}::part(component)"), apply);
        }
        for (part, classes) in &definition.parts {
            push_rule(out, &format!("{name}::part({part})"), &format!("{classes} "));
        }
        for (state, classes) in &definition.states {
            push_rule(out, &format!("{name}::part(component):{state}"), classes);
        }
        for (variant, classes) in &definition.variants {
            push_rule(
                out,
                &format!("{name}.{name}-{variant}::part(component)"),
                classes,
            );
        }
    }
}

/// Synthesize the full authoring template.
///
/// `components` iterates in merge insertion order; `variables` becomes a
/// `:root` custom-property block (omitted when empty); `styles` blocks
/// are appended verbatim, in chain order, after the components layer.
pub fn synthesize_template(
    components: &IndexMap<String, ComponentDefinition>,
    mode: SynthesisMode,
    variables: &IndexMap<String, String>,
    styles: &[&str],
) -> String {
    let renderer: &dyn ComponentRenderer = match mode {
        SynthesisMode::LightDom => &LightDom,
        SynthesisMode::ShadowDom => &ShadowDom,
    };

    let mut template = String::from("@tailwind base;\n@tailwind components;\n@tailwind utilities;\n\n");

    if !variables.is_empty() {
        template.push_str(":root {\n");
        for (name, value) in variables {
            template.push_str("  --");
            template.push_str(name);
            template.push_str(": ");
            template.push_str(value);
            template.push_str(";\n");
        }
        template.push_str("}\n\n");
    }

    template.push_str("@layer components {\n");
    for (name, definition) in components {
        renderer.render(name, definition, &mut template);
    }
    template.push_str("}\n");

    for block in styles {
        template.push('\n');
        template.push_str(block);
        if !block.ends_with('\n') {
            template.push('\n');
        }
    }

    template
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_preset::Preset;

    fn components_of(yaml: &str) -> IndexMap<String, ComponentDefinition> {
        Preset::from_yaml(yaml).unwrap().components
    }

    fn empty_vars() -> IndexMap<String, String> {
        IndexMap::new()
    }

    #[test]
    fn light_dom_base_and_part_rules_in_order() {
        let components = components_of("components:\n  btn:\n    apply: flex\n    parts:\n      icon: w-4");
        let template =
            synthesize_template(&components, SynthesisMode::LightDom, &empty_vars(), &[]);

        let base = template.find(".btn {\n  @apply flex;\n}\n").unwrap();
        let part = template.find(".btn__icon {\n  @apply w-4 ;\n}\n").unwrap();
        assert!(base < part);

        // Nothing else is emitted for this component.
        assert_eq!(template.matches("@apply").count(), 2);
    }

    #[test]
    fn light_dom_emits_all_groups_in_fixed_order() {
        let components = components_of(
            "components:\n  btn:\n    apply: flex\n    parts:\n      icon: w-4\n    modifiers:\n      compact: p-1\n    variants:\n      primary: bg-primary\n    states:\n      hover: bg-primary-light",
        );
        let template =
            synthesize_template(&components, SynthesisMode::LightDom, &empty_vars(), &[]);

        let positions = [
            template.find(".btn {").unwrap(),
            template.find(".btn__icon {").unwrap(),
            template.find(".btn--compact {").unwrap(),
            template.find(".btn-primary {").unwrap(),
            template.find(".btn:hover {").unwrap(),
        ];
        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn absent_groups_contribute_no_rules() {
        let components = components_of("components:\n  card:\n    parts:\n      body: p-4");
        let template =
            synthesize_template(&components, SynthesisMode::LightDom, &empty_vars(), &[]);

        // No apply, so no bare `.card` ruleset; only the part rule.
        assert!(!template.contains(".card {"));
        assert!(template.contains(".card__body {"));
    }

    #[test]
    fn shadow_dom_uses_part_selectors() {
        let components = components_of(
            "components:\n  btn:\n    apply: flex\n    parts:\n      icon: w-4\n    variants:\n      primary: bg-primary\n    states:\n      hover: bg-primary-light",
        );
        let template =
            synthesize_template(&components, SynthesisMode::ShadowDom, &empty_vars(), &[]);

        let base = template.find("btn::part(component) {\n  @apply flex;\n}\n").unwrap();
        let part = template.find("btn::part(icon) {").unwrap();
        let state = template.find("btn::part(component):hover {").unwrap();
        let variant = template.find("btn.btn-primary::part(component) {").unwrap();

        assert!(base < part && part < state && state < variant);
        assert!(!template.contains(".btn {"));
    }

    #[test]
    fn template_opens_with_baseline_directives() {
        let template = synthesize_template(
            &IndexMap::new(),
            SynthesisMode::LightDom,
            &empty_vars(),
            &[],
        );
        assert!(template.starts_with(
            "@tailwind base;\n@tailwind components;\n@tailwind utilities;\n"
        ));
        assert!(template.contains("@layer components {\n}"));
    }

    #[test]
    fn variables_emit_a_root_block_before_the_layer() {
        let mut variables = IndexMap::new();
        variables.insert("accent".to_string(), "#0d6efd".to_string());

        let template = synthesize_template(
            &IndexMap::new(),
            SynthesisMode::LightDom,
            &variables,
            &[],
        );

        let root = template.find(":root {\n  --accent: #0d6efd;\n}").unwrap();
        let layer = template.find("@layer components {").unwrap();
        assert!(root < layer);
    }

    #[test]
    fn styles_text_is_appended_verbatim_in_order() {
        let template = synthesize_template(
            &IndexMap::new(),
            SynthesisMode::LightDom,
            &empty_vars(),
            &[".legacy { color: red; }", ".newer { color: blue; }"],
        );

        let first = template.find(".legacy { color: red; }").unwrap();
        let second = template.find(".newer { color: blue; }").unwrap();
        let layer = template.find("@layer components {").unwrap();
        assert!(layer < first && first < second);
    }

    #[test]
    fn synthesis_is_pure() {
        let components = components_of("components:\n  btn:\n    apply: flex");
        let once = synthesize_template(&components, SynthesisMode::LightDom, &empty_vars(), &[]);
        let twice = synthesize_template(&components, SynthesisMode::LightDom, &empty_vars(), &[]);
        assert_eq!(once, twice);
    }
}

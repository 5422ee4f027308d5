//! The compiler boundary and the full generation pipeline.
//!
//! [`StyleCompiler`] is the seam to the external CSS pipeline: it takes
//! the synthesized authoring template and returns stylesheet text or a
//! structured failure. The production implementation wraps grass; no
//! template or configuration logic lives behind the seam.
//!
//! [`generate`] runs the whole resolution in its fixed order: chain
//! resolution completes before token and plugin resolution, which
//! complete before template synthesis, which completes before the
//! compiler is invoked.

use grass::{Options, OutputStyle};
use serde::Serialize;

use fresco_preset::{Preset, PresetLoader, merge_components, merge_variables, resolve_chain};

use crate::config::build_config;
use crate::error::{CompileError, GenerateError};
use crate::safelist::build_safelist;
use crate::template::{SynthesisMode, synthesize_template};

/// Options forwarded to the compiler pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompileOptions {
    /// Produce compressed output.
    pub minify: bool,
}

/// The external compiler pipeline boundary.
pub trait StyleCompiler {
    /// Compile authoring-template text into stylesheet text.
    fn compile(&self, template: &str, options: &CompileOptions) -> Result<String, CompileError>;
}

/// grass-backed compiler. SCSS is a CSS superset, so the authoring
/// directives (`@tailwind`, `@apply`) pass through to the output as
/// plain at-rules for the downstream utility expansion stage.
pub struct SassCompiler;

impl StyleCompiler for SassCompiler {
    fn compile(&self, template: &str, options: &CompileOptions) -> Result<String, CompileError> {
        let style = if options.minify {
            OutputStyle::Compressed
        } else {
            OutputStyle::Expanded
        };
        let grass_options = Options::default().style(style);

        grass::from_string(template, &grass_options).map_err(|error| CompileError {
            message: error.to_string(),
            template: template.to_string(),
        })
    }
}

/// A successful generation: compiled stylesheet text and the serialized
/// configuration object.
#[derive(Debug, Clone, Serialize)]
pub struct CompiledOutput {
    pub css: String,
    pub json: String,
}

/// Resolve and compile a preset with the default grass-backed compiler.
///
/// `leaf_name` is the stored name of the preset when known; it seeds
/// cycle detection. The loader supplies ancestors named by `extends`.
pub fn generate(
    leaf: &Preset,
    leaf_name: Option<&str>,
    loader: &dyn PresetLoader,
) -> Result<CompiledOutput, GenerateError> {
    generate_with(&SassCompiler, leaf, leaf_name, loader)
}

/// Resolve and compile a preset with an explicit compiler.
pub fn generate_with(
    compiler: &dyn StyleCompiler,
    leaf: &Preset,
    leaf_name: Option<&str>,
    loader: &dyn PresetLoader,
) -> Result<CompiledOutput, GenerateError> {
    let mut chain = resolve_chain(leaf, leaf_name, loader)?;
    chain.push(leaf.clone());

    let safelist = build_safelist(&chain);
    let config = build_config(&chain, &safelist);
    let json = serde_json::to_string_pretty(&config)?;

    let components = merge_components(&chain);
    let variables = merge_variables(&chain);
    let styles: Vec<&str> = chain
        .iter()
        .filter_map(|preset| preset.styles.as_deref())
        .collect();
    let mode = if leaf.shadow_dom {
        SynthesisMode::ShadowDom
    } else {
        SynthesisMode::LightDom
    };
    let template = synthesize_template(&components, mode, &variables, &styles);

    let options = CompileOptions { minify: leaf.minify };
    match compiler.compile(&template, &options) {
        Ok(css) => Ok(CompiledOutput { css, json }),
        Err(error) => Err(GenerateError::Compile { error, json }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fresco_preset::NoPresets;

    #[test]
    fn compiles_plain_css_unchanged() {
        let css = SassCompiler
            .compile(".btn {\n  color: #0d6efd;\n}\n", &CompileOptions::default())
            .unwrap();
        assert!(css.contains(".btn"));
        assert!(css.contains("#0d6efd"));
    }

    #[test]
    fn minify_compresses_output() {
        let css = SassCompiler
            .compile(
                ".btn {\n  color: blue;\n}\n\n.card {\n  color: red;\n}\n",
                &CompileOptions { minify: true },
            )
            .unwrap();
        assert!(!css.contains("\n\n"));
        assert!(css.contains(".btn"));
    }

    #[test]
    fn failure_carries_message_and_template() {
        let template = ".btn { color: $undefined; }";
        let error = SassCompiler
            .compile(template, &CompileOptions::default())
            .unwrap_err();

        assert!(!error.message.is_empty());
        assert_eq!(error.template, template);
        assert!(error.to_string().starts_with("CSS compilation failed"));
    }

    #[test]
    fn generate_produces_css_and_config_json() {
        let leaf = Preset::from_yaml("colors: |\n  primary: #000").unwrap();
        let output = generate(&leaf, None, &NoPresets).unwrap();

        assert!(output.json.contains("primary"));
        assert!(output.css.contains("@tailwind base"));
        assert!(output.css.contains("@tailwind components"));
        assert!(output.css.contains("@tailwind utilities"));
    }

    #[test]
    fn generate_failure_keeps_the_serialized_config() {
        let leaf =
            Preset::from_yaml("colors: |\n  primary: #000\nstyles: \".broken { color: $nope; }\"")
                .unwrap();
        let result = generate(&leaf, None, &NoPresets);

        match result {
            Err(GenerateError::Compile { error, json }) => {
                assert!(!error.message.is_empty());
                assert!(json.contains("primary"));
            }
            other => panic!("expected compile failure, got {other:?}"),
        }
    }

    #[test]
    fn unknown_ancestor_fails_before_serialization() {
        let leaf = Preset::from_yaml("extends: missing").unwrap();
        let result = generate(&leaf, None, &NoPresets);
        assert!(matches!(result, Err(GenerateError::Chain(_))));
    }
}

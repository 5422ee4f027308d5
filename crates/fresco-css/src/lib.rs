//! Theme configuration assembly and CSS synthesis for fresco.
//!
//! This crate turns a resolved preset chain into the two artifacts the
//! external utility compiler consumes:
//! - a configuration object (token extensions, plugin set, safelist)
//! - a CSS authoring template (component rulesets in light-DOM or
//!   shadow-DOM structure)
//!
//! and wraps the compiler itself behind the [`StyleCompiler`] seam, with
//! [`generate`] running the full fixed-order pipeline.

mod compile;
mod config;
mod error;
mod safelist;
mod template;

pub use compile::{
    CompileOptions, CompiledOutput, SassCompiler, StyleCompiler, generate, generate_with,
};
pub use config::{build_config, merge_objects};
pub use error::{CompileError, GenerateError};
pub use safelist::build_safelist;
pub use template::{SynthesisMode, synthesize_template};

//! Preset and asset storage.
//!
//! Preset source documents live under `<root>/systems/<name>.yml`;
//! compiled assets live under `<root>/presets/` as a stylesheet file and
//! a sibling module exporting the serialized configuration object as its
//! default value. Every name that reaches the filesystem goes through
//! [`PresetStore::sanitize`] first.
//!
//! The store holds no state beyond its directories: presets are re-read
//! on every resolution, and two racing saves of the same name resolve to
//! last-writer-wins.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use fresco_css::CompiledOutput;
use fresco_preset::{Preset, PresetError, PresetLoader};

use crate::error::Result;

/// Extension of stored preset documents.
const PRESET_EXTENSION: &str = "yml";

/// Filesystem store rooted at an explicit directory.
pub struct PresetStore {
    systems_dir: PathBuf,
    presets_dir: PathBuf,
}

impl PresetStore {
    /// Open (and create if needed) a store under `root`.
    pub fn new(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let systems_dir = root.join("systems");
        let presets_dir = root.join("presets");
        fs::create_dir_all(&systems_dir)?;
        fs::create_dir_all(&presets_dir)?;
        Ok(PresetStore {
            systems_dir,
            presets_dir,
        })
    }

    /// Collapse runs of two or more dots to a single dot, so a name can
    /// never climb out of the storage directories.
    pub fn sanitize(segment: &str) -> String {
        let mut out = String::with_capacity(segment.len());
        let mut in_dots = false;
        for ch in segment.chars() {
            if ch == '.' {
                if !in_dots {
                    out.push('.');
                }
                in_dots = true;
            } else {
                in_dots = false;
                out.push(ch);
            }
        }
        out
    }

    fn preset_path(&self, name: &str) -> PathBuf {
        self.systems_dir
            .join(format!("{}.{PRESET_EXTENSION}", Self::sanitize(name)))
    }

    /// Read a stored preset's raw text. `Ok(None)` when the name is
    /// unknown.
    pub fn read_preset(&self, name: &str) -> Result<Option<String>> {
        read_optional(&self.preset_path(name))
    }

    /// Persist a preset document verbatim.
    pub fn save_preset(&self, name: &str, body: &str) -> Result<()> {
        let path = self.preset_path(name);
        fs::write(&path, body)?;
        debug!(path = %path.display(), "saved preset");
        Ok(())
    }

    /// Persist a compiled asset pair: `<name>.css` and `<name>.mjs`, the
    /// latter exporting the configuration object as its default value.
    pub fn save_assets(&self, name: &str, output: &CompiledOutput) -> Result<()> {
        let name = Self::sanitize(name);
        fs::write(self.presets_dir.join(format!("{name}.css")), &output.css)?;
        fs::write(
            self.presets_dir.join(format!("{name}.mjs")),
            format!("export default {};\n", output.json),
        )?;
        debug!(name = %name, "saved compiled assets");
        Ok(())
    }

    /// Read a previously compiled asset by its relative path.
    pub fn read_asset(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let safe: Vec<String> = path.split('/').map(Self::sanitize).collect();
        let full = safe.iter().fold(self.presets_dir.clone(), |dir, segment| {
            dir.join(segment)
        });
        match fs::read(&full) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

impl PresetLoader for PresetStore {
    fn load(&self, name: &str) -> std::result::Result<Option<Preset>, PresetError> {
        let Some(text) = read_loader(&self.preset_path(name))? else {
            return Ok(None);
        };
        Preset::from_yaml(&text).map(Some)
    }
}

fn read_loader(path: &Path) -> std::result::Result<Option<String>, PresetError> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(error) => Err(error.into()),
    }
}

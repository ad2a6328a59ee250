use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use zeoclust::engine::config::{CounterChargeSpec, LigandMode};

fn closed_shell() -> Vec<u32> {
    vec![0]
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileCounterCharge {
    pub charge: i32,
    #[serde(default = "closed_shell")]
    pub unpaired: Vec<u32>,
}

impl From<FileCounterCharge> for CounterChargeSpec {
    fn from(f: FileCounterCharge) -> Self {
        CounterChargeSpec::new(f.charge, f.unpaired)
    }
}

/// A run file as written by the user. Relative paths are taken relative to
/// the directory holding the file.
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub scaffold: Option<PathBuf>,
    pub binding_modes: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub mode: Option<LigandMode>,
    pub max_results: Option<usize>,
    pub make_dirs: Option<bool>,
    #[serde(default)]
    pub counter_charges: Vec<FileCounterCharge>,
}

impl FileConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(base) = path.parent() {
            config.resolve_relative_to(base);
        }
        Ok(config)
    }

    fn resolve_relative_to(&mut self, base: &Path) {
        for slot in [
            &mut self.scaffold,
            &mut self.binding_modes,
            &mut self.catalog,
            &mut self.output_dir,
        ] {
            if let Some(path) = slot.as_mut() {
                if path.is_relative() {
                    *path = base.join(&*path);
                }
            }
        }
    }
}

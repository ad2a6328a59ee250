use super::builtin::builtin_ligand;
use crate::core::error::ConfigurationError;
use crate::core::models::species::{Ligand, Metal, RawLigandAtom};
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetalEntry {
    name: String,
    charges: Vec<i32>,
    unpaired: Vec<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct LigandEntry {
    name: String,
    charges: Vec<i32>,
    unpaired: Vec<u32>,
    atoms: Vec<RawLigandAtom>,
    head: Option<usize>,
    tail: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
struct CatalogFile {
    #[serde(default)]
    metals: Vec<MetalEntry>,
    #[serde(default)]
    ligands: Vec<LigandEntry>,
    #[serde(default)]
    builtin_ligands: Vec<String>,
}

/// The metals and ligands available to a screening run.
///
/// Species are shared behind `Arc` so combinations and conformers can refer to
/// them across worker threads without copying geometry.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    metals: Vec<Arc<Metal>>,
    ligands: Vec<Arc<Ligand>>,
}

impl SpeciesCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(path: &Path) -> Result<Self, CatalogLoadError> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogLoadError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        let file: CatalogFile = toml::from_str(&content).map_err(|e| CatalogLoadError::Toml {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_file(file)
    }

    fn from_file(file: CatalogFile) -> Result<Self, CatalogLoadError> {
        let mut catalog = Self::new();
        for entry in file.metals {
            catalog.add_metal(Metal::new(&entry.name, entry.charges, entry.unpaired)?)?;
        }
        for name in &file.builtin_ligands {
            catalog.add_builtin_ligand(name)?;
        }
        for entry in file.ligands {
            let mut ligand =
                Ligand::from_raw_atoms(&entry.name, &entry.atoms, entry.charges, entry.unpaired)?;
            if let Some(head) = entry.head {
                ligand.set_head(head)?;
            }
            if let Some(tail) = entry.tail {
                ligand.set_tail(tail)?;
            }
            catalog.add_ligand(ligand)?;
        }
        Ok(catalog)
    }

    pub fn add_metal(&mut self, metal: Metal) -> Result<(), CatalogLoadError> {
        if self.metal(&metal.name).is_some() {
            return Err(CatalogLoadError::DuplicateSpecies(metal.name));
        }
        self.metals.push(Arc::new(metal));
        Ok(())
    }

    pub fn add_ligand(&mut self, ligand: Ligand) -> Result<(), CatalogLoadError> {
        if self.ligand(&ligand.name).is_some() {
            return Err(CatalogLoadError::DuplicateSpecies(ligand.name));
        }
        self.ligands.push(Arc::new(ligand));
        Ok(())
    }

    pub fn add_builtin_ligand(&mut self, name: &str) -> Result<(), CatalogLoadError> {
        let builtin =
            builtin_ligand(name).ok_or_else(|| CatalogLoadError::UnknownBuiltin(name.to_string()))?;
        self.add_ligand(builtin.instantiate(name)?)
    }

    pub fn metals(&self) -> &[Arc<Metal>] {
        &self.metals
    }

    pub fn ligands(&self) -> &[Arc<Ligand>] {
        &self.ligands
    }

    pub fn metal(&self, name: &str) -> Option<&Arc<Metal>> {
        self.metals.iter().find(|m| m.name == name)
    }

    pub fn ligand(&self, name: &str) -> Option<&Arc<Ligand>> {
        self.ligands.iter().find(|l| l.name == name)
    }
}

#[derive(Debug, Error)]
pub enum CatalogLoadError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
    #[error("Invalid species definition: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("Unknown built-in ligand: '{0}'")]
    UnknownBuiltin(String),
    #[error("Species '{0}' is defined more than once")]
    DuplicateSpecies(String),
}

use super::config::LigandMode;
use crate::core::error::ConfigurationError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("The {mode} ligand mode does not support {operation}")]
    UnimplementedMode {
        mode: LigandMode,
        operation: &'static str,
    },

    #[error("Internal logic error: {0}")]
    Internal(String),
}

/// A (combination, template) pairing that cannot be turned into a conformer.
///
/// These failures are local to the pairing; other pairings are still built.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TemplateMismatchError {
    #[error("Template '{template}' has no metal placeholder")]
    NoPlaceholder { template: String },

    #[error("Template '{template}' has {count} metal placeholders; expected exactly one")]
    MultiplePlaceholders { template: String, count: usize },

    #[error("Template '{template}' has {slots} ligand slot(s) but the combination holds {ligands} ligand(s)")]
    SlotCountMismatch {
        template: String,
        slots: usize,
        ligands: usize,
    },

    #[error("Combination placed on template '{template}' has no metal")]
    MissingMetal { template: String },
}

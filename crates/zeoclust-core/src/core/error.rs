use thiserror::Error;

/// Errors raised while constructing catalog species, combinations, or
/// engine configuration from malformed input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Species '{species}' has no accessible {field}; expected a non-empty list")]
    EmptyStateSet {
        species: String,
        field: &'static str,
    },

    #[error("Ligand '{ligand}' has no atoms")]
    EmptyAtomList { ligand: String },

    #[error("Anchor index {index} is out of range for ligand '{ligand}' with {len} atom(s)")]
    AnchorOutOfRange {
        ligand: String,
        index: usize,
        len: usize,
    },

    #[error("Invalid coordinate '{value}' in ligand '{ligand}'")]
    InvalidCoordinate { ligand: String, value: String },

    #[error("Combination already holds metal '{existing}'; cannot add '{requested}'")]
    MetalAlreadyAssigned { existing: String, requested: String },

    #[error("Missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("Invalid value for parameter '{parameter}': {reason}")]
    InvalidParameter {
        parameter: &'static str,
        reason: String,
    },
}

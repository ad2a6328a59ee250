use super::atom::AtomRecord;
use super::combination::Combination;
use super::species::Parity;
use super::template::BindingModeTemplate;
use std::sync::Arc;

/// A concrete placement of one combination on one binding-mode template.
///
/// The atom list holds the metal line followed by each translated ligand
/// block, in template slot order. Scaffold atoms are not repeated here; the
/// totals already include the scaffold's base charge and parity.
#[derive(Debug, Clone)]
pub struct AbstractConformer {
    pub combination: Arc<Combination>,
    pub template: Arc<BindingModeTemplate>,
    pub atoms: Vec<AtomRecord>,
    pub total_charge: i32,
    pub total_parity: Parity,
}

impl AbstractConformer {
    /// The combination's canonical key in its human-readable form.
    pub fn canonical_label(&self) -> String {
        self.combination.key().to_string()
    }

    pub fn multiplicity(&self) -> u32 {
        self.total_parity.multiplicity()
    }
}

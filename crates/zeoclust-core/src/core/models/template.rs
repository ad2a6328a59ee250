use super::atom::AtomRecord;

/// Element label marking where the metal goes in a binding-mode template.
pub const METAL_PLACEHOLDER: &str = "X";

/// A geometric arrangement of one metal site and its ligand anchor points
/// relative to the scaffold.
///
/// Entries labelled [`METAL_PLACEHOLDER`] mark the metal site; every other
/// entry is a ligand anchor, in slot order. A well-formed template holds
/// exactly one placeholder, which is checked when a conformer is built rather
/// than at construction, so malformed templates only fail their own pairings.
#[derive(Debug, Clone, PartialEq)]
pub struct BindingModeTemplate {
    pub name: String,
    atoms: Vec<AtomRecord>,
}

impl BindingModeTemplate {
    pub fn new(name: &str, atoms: Vec<AtomRecord>) -> Self {
        Self {
            name: name.to_string(),
            atoms,
        }
    }

    pub fn atoms(&self) -> &[AtomRecord] {
        &self.atoms
    }

    /// Indices of the entries labelled as metal placeholders.
    pub fn placeholder_indices(&self) -> Vec<usize> {
        self.atoms
            .iter()
            .enumerate()
            .filter(|(_, atom)| atom.symbol == METAL_PLACEHOLDER)
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Ligand anchor entries in slot order.
    pub fn anchors(&self) -> impl Iterator<Item = &AtomRecord> {
        self.atoms
            .iter()
            .filter(|atom| atom.symbol != METAL_PLACEHOLDER)
    }

    pub fn ligand_slot_count(&self) -> usize {
        self.anchors().count()
    }
}

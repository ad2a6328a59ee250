use super::atom::AtomRecord;
use super::species::Parity;

/// The rigid host structure (e.g. a zeolite ring) onto which clusters are built.
///
/// A scaffold is loaded once per screening run and never modified. Its base
/// charge offsets the counter-charge requirements and its base parity is
/// folded into the spin state reported for every conformer.
#[derive(Debug, Clone, PartialEq)]
pub struct Scaffold {
    pub base_charge: i32,
    pub base_parity: Parity,
    pub atoms: Vec<AtomRecord>,
}

impl Scaffold {
    pub fn new(base_charge: i32, base_parity: Parity, atoms: Vec<AtomRecord>) -> Self {
        Self {
            base_charge,
            base_parity,
            atoms,
        }
    }

    pub fn num_atoms(&self) -> usize {
        self.atoms.len()
    }
}

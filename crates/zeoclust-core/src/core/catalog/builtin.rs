use crate::core::error::ConfigurationError;
use crate::core::models::species::{Ligand, LigandAtom};
use phf::{Map, phf_map};

/// Compile-time definition of a commonly used ligand.
#[derive(Debug)]
pub struct BuiltinLigand {
    pub atoms: &'static [(&'static str, [f64; 3])],
    pub charges: &'static [i32],
    pub unpaired: &'static [u32],
}

impl BuiltinLigand {
    pub fn instantiate(&self, name: &str) -> Result<Ligand, ConfigurationError> {
        let atoms = self
            .atoms
            .iter()
            .map(|(symbol, [x, y, z])| LigandAtom::new(symbol, *x, *y, *z))
            .collect();
        Ligand::new(
            name,
            atoms,
            self.charges.iter().copied(),
            self.unpaired.iter().copied(),
        )
    }
}

// Geometries are given with the metal-binding atom at the origin.
static BUILTIN_LIGANDS: Map<&'static str, BuiltinLigand> = phf_map! {
    "OH" => BuiltinLigand {
        atoms: &[("O", [0.0, 0.0, 0.0]), ("H", [0.0, 0.0, -1.0])],
        charges: &[-1],
        unpaired: &[0],
    },
    "Hydride" => BuiltinLigand {
        atoms: &[("H", [0.0, 0.0, 0.0])],
        charges: &[-1],
        unpaired: &[0],
    },
    "Oxide" => BuiltinLigand {
        atoms: &[("O", [0.0, 0.0, 0.0])],
        charges: &[-2],
        unpaired: &[0],
    },
};

pub fn builtin_ligand(name: &str) -> Option<&'static BuiltinLigand> {
    BUILTIN_LIGANDS.get(name)
}

/// Names of every built-in ligand, sorted.
pub fn builtin_ligand_names() -> Vec<&'static str> {
    let mut names: Vec<_> = BUILTIN_LIGANDS.keys().copied().collect();
    names.sort_unstable();
    names
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::species::Parity;

    #[test]
    fn registry_lists_common_ligands() {
        assert_eq!(builtin_ligand_names(), vec!["Hydride", "OH", "Oxide"]);
    }

    #[test]
    fn hydroxide_instantiates_with_two_atoms_and_tail() {
        let oh = builtin_ligand("OH").unwrap().instantiate("OH").unwrap();
        assert_eq!(oh.atoms().len(), 2);
        assert_eq!(oh.head().symbol, "O");
        assert_eq!(oh.tail().symbol, "H");
        assert_eq!(oh.states.first(), (-1, Parity::Even));
    }

    #[test]
    fn oxide_is_a_single_atom_dianion() {
        let oxide = builtin_ligand("Oxide").unwrap().instantiate("Oxide").unwrap();
        assert_eq!(oxide.atoms().len(), 1);
        assert_eq!(oxide.tail_index(), 0);
        assert_eq!(oxide.states.charges(), &[-2]);
    }

    #[test]
    fn unknown_names_are_absent() {
        assert!(builtin_ligand("Chloride").is_none());
    }
}

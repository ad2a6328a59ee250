use super::species::{Ligand, Metal, Parity};
use crate::core::error::ConfigurationError;
use std::fmt;
use std::sync::Arc;

/// A species taking part in a combination, tagged by its role.
#[derive(Debug, Clone)]
pub enum Component {
    Metal(Arc<Metal>),
    Ligand(Arc<Ligand>),
}

/// Order-independent fingerprint of a combination.
///
/// Equality and hashing use the sorted component names together with the
/// aggregate charge and parity, so two combinations built in different orders
/// compare equal. The [`Display`](fmt::Display) form concatenates the sorted
/// names and appends `(charge)(parity)`, e.g. `HydroxideHydroxideZn(0)(0)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    tokens: Vec<String>,
    charge: i32,
    parity: Parity,
}

impl CanonicalKey {
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    fn insert_token(&mut self, token: &str) {
        let position = self.tokens.partition_point(|t| t.as_str() <= token);
        self.tokens.insert(position, token.to_string());
    }
}

impl fmt::Display for CanonicalKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            f.write_str(token)?;
        }
        write!(f, "({})({})", self.charge, self.parity)
    }
}

/// One metal plus an ordered multiset of ligands, with running charge and
/// parity bookkeeping.
///
/// Combinations are append-only: components can be added but never removed.
/// The canonical key is kept current after every addition.
#[derive(Debug, Clone, Default)]
pub struct Combination {
    metal: Option<Arc<Metal>>,
    ligands: Vec<Arc<Ligand>>,
    charge: i32,
    parity: Parity,
    key: CanonicalKey,
}

impl Combination {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds any component with the given contributed charge and parity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MetalAlreadyAssigned`] when a second metal
    /// is added; the combination is left unchanged.
    pub fn add(
        &mut self,
        component: Component,
        charge: i32,
        parity: Parity,
    ) -> Result<(), ConfigurationError> {
        match component {
            Component::Metal(metal) => self.add_metal(metal, charge, parity),
            Component::Ligand(ligand) => {
                self.add_ligand(ligand, charge, parity);
                Ok(())
            }
        }
    }

    pub fn add_metal(
        &mut self,
        metal: Arc<Metal>,
        charge: i32,
        parity: Parity,
    ) -> Result<(), ConfigurationError> {
        if let Some(existing) = &self.metal {
            return Err(ConfigurationError::MetalAlreadyAssigned {
                existing: existing.name.clone(),
                requested: metal.name.clone(),
            });
        }
        self.absorb(&metal.name, charge, parity);
        self.metal = Some(metal);
        Ok(())
    }

    pub fn add_ligand(&mut self, ligand: Arc<Ligand>, charge: i32, parity: Parity) {
        self.absorb(&ligand.name, charge, parity);
        self.ligands.push(ligand);
    }

    fn absorb(&mut self, token: &str, charge: i32, parity: Parity) {
        self.charge += charge;
        self.parity = self.parity ^ parity;
        self.key.insert_token(token);
        self.key.charge = self.charge;
        self.key.parity = self.parity;
    }

    pub fn metal(&self) -> Option<&Arc<Metal>> {
        self.metal.as_ref()
    }

    pub fn ligands(&self) -> &[Arc<Ligand>] {
        &self.ligands
    }

    pub fn num_ligands(&self) -> usize {
        self.ligands.len()
    }

    pub fn charge(&self) -> i32 {
        self.charge
    }

    pub fn parity(&self) -> Parity {
        self.parity
    }

    pub fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// True when every ligand slot holds the same species.
    pub fn is_homogeneous(&self) -> bool {
        self.ligands
            .windows(2)
            .all(|pair| pair[0].name == pair[1].name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::species::LigandAtom;

    fn zinc() -> Arc<Metal> {
        Arc::new(Metal::new("Zn", [2], [0]).unwrap())
    }

    fn ligand(name: &str, charge: i32) -> Arc<Ligand> {
        Arc::new(
            Ligand::new(name, vec![LigandAtom::new("O", 0.0, 0.0, 0.0)], [charge], [0]).unwrap(),
        )
    }

    #[test]
    fn new_combination_is_empty() {
        let combo = Combination::new();
        assert!(combo.metal().is_none());
        assert_eq!(combo.num_ligands(), 0);
        assert_eq!(combo.charge(), 0);
        assert_eq!(combo.parity(), Parity::Even);
        assert_eq!(combo.key().to_string(), "(0)(0)");
    }

    #[test]
    fn key_sorts_tokens_and_appends_charge_and_parity() {
        let mut combo = Combination::new();
        combo.add_metal(zinc(), 2, Parity::Even).unwrap();
        let oh = ligand("Hydroxide", -1);
        combo.add_ligand(oh.clone(), -1, Parity::Even);
        combo.add_ligand(oh, -1, Parity::Even);

        assert_eq!(combo.key().to_string(), "HydroxideHydroxideZn(0)(0)");
        assert_eq!(combo.key().tokens(), &["Hydroxide", "Hydroxide", "Zn"]);
        assert_eq!(combo.num_ligands(), 2);
        assert_eq!(combo.charge(), 0);
    }

    #[test]
    fn key_is_independent_of_construction_order() {
        let zn = zinc();
        let oh = ligand("OH", -1);
        let oxide = ligand("Oxide", -2);

        let mut metal_first = Combination::new();
        metal_first.add_metal(zn.clone(), 3, Parity::Odd).unwrap();
        metal_first.add_ligand(oh.clone(), -1, Parity::Even);
        metal_first.add_ligand(oxide.clone(), -2, Parity::Even);

        let mut ligands_first = Combination::new();
        ligands_first.add_ligand(oxide, -2, Parity::Even);
        ligands_first.add_ligand(oh, -1, Parity::Even);
        ligands_first.add_metal(zn, 3, Parity::Odd).unwrap();

        assert_eq!(metal_first.key(), ligands_first.key());
        assert_eq!(metal_first.key().to_string(), "OHOxideZn(0)(1)");
    }

    #[test]
    fn parity_accumulates_modulo_two() {
        let mut combo = Combination::new();
        combo.add_metal(zinc(), 2, Parity::Odd).unwrap();
        combo.add_ligand(ligand("NO", -1), -1, Parity::Odd);
        assert_eq!(combo.parity(), Parity::Even);
        combo.add_ligand(ligand("NO", -1), -1, Parity::Odd);
        assert_eq!(combo.parity(), Parity::Odd);
    }

    #[test]
    fn second_metal_is_rejected_without_changing_state() {
        let mut combo = Combination::new();
        combo.add_metal(zinc(), 2, Parity::Even).unwrap();
        let copper = Arc::new(Metal::new("Cu", [2], [1]).unwrap());

        let err = combo.add_metal(copper, 2, Parity::Odd).unwrap_err();
        assert_eq!(
            err,
            ConfigurationError::MetalAlreadyAssigned {
                existing: "Zn".to_string(),
                requested: "Cu".to_string()
            }
        );
        assert_eq!(combo.key().to_string(), "Zn(2)(0)");
    }

    #[test]
    fn add_dispatches_on_component_role() {
        let mut combo = Combination::new();
        combo
            .add(Component::Ligand(ligand("OH", -1)), -1, Parity::Even)
            .unwrap();
        combo
            .add(Component::Metal(zinc()), 2, Parity::Even)
            .unwrap();
        assert_eq!(combo.metal().map(|m| m.name.as_str()), Some("Zn"));
        assert_eq!(combo.num_ligands(), 1);
        assert_eq!(combo.key().to_string(), "OHZn(1)(0)");
    }

    #[test]
    fn homogeneity_reflects_ligand_species() {
        let mut combo = Combination::new();
        combo.add_metal(zinc(), 2, Parity::Even).unwrap();
        assert!(combo.is_homogeneous());
        combo.add_ligand(ligand("OH", -1), -1, Parity::Even);
        combo.add_ligand(ligand("OH", -1), -1, Parity::Even);
        assert!(combo.is_homogeneous());
        combo.add_ligand(ligand("Hydride", -1), -1, Parity::Even);
        assert!(!combo.is_homogeneous());
    }
}

use super::config::CounterChargeSpec;
use crate::core::error::ConfigurationError;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::species::Parity;
use crate::core::models::template::BindingModeTemplate;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Binding-mode templates grouped by ligand slot count.
#[derive(Debug, Clone, Default)]
pub struct ModeIndex {
    by_slots: BTreeMap<usize, Vec<Arc<BindingModeTemplate>>>,
    max_ligs: usize,
}

impl ModeIndex {
    pub fn new(templates: impl IntoIterator<Item = BindingModeTemplate>) -> Self {
        let mut index = Self::default();
        for template in templates {
            let slots = template.ligand_slot_count();
            index.max_ligs = index.max_ligs.max(slots);
            index
                .by_slots
                .entry(slots)
                .or_default()
                .push(Arc::new(template));
        }
        index
    }

    /// True when at least one template offers exactly `slots` ligand slots.
    pub fn contains(&self, slots: usize) -> bool {
        self.by_slots.contains_key(&slots)
    }

    pub fn templates(&self, slots: usize) -> &[Arc<BindingModeTemplate>] {
        self.by_slots.get(&slots).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The largest slot count among all templates.
    pub fn max_ligs(&self) -> usize {
        self.max_ligs
    }

    pub fn slot_counts(&self) -> impl Iterator<Item = usize> + '_ {
        self.by_slots.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.by_slots.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.by_slots.is_empty()
    }
}

/// Required net cluster charge mapped to the spin parities allowed with it.
///
/// Keys already have the scaffold's base charge subtracted, so they compare
/// directly against the aggregate charge of a combination.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CounterChargeTable {
    entries: BTreeMap<i32, Vec<Parity>>,
}

impl CounterChargeTable {
    /// Builds the table for `scaffold`. Repeated charges merge their parities.
    pub fn from_specs(
        specs: &[CounterChargeSpec],
        scaffold: &Scaffold,
    ) -> Result<Self, ConfigurationError> {
        let mut table = Self::default();
        for spec in specs {
            if spec.unpaired.is_empty() {
                return Err(ConfigurationError::EmptyStateSet {
                    species: format!("counter charge {}", spec.charge),
                    field: "unpaired electrons",
                });
            }
            let parities = table
                .entries
                .entry(spec.charge - scaffold.base_charge)
                .or_default();
            for parity in spec.unpaired.iter().copied().map(Parity::from_unpaired) {
                if !parities.contains(&parity) {
                    parities.push(parity);
                }
            }
        }
        Ok(table)
    }

    pub fn contains_charge(&self, charge: i32) -> bool {
        self.entries.contains_key(&charge)
    }

    /// True when `charge` is a key and `parity` is listed for it.
    pub fn allows(&self, charge: i32, parity: Parity) -> bool {
        self.entries
            .get(&charge)
            .is_some_and(|parities| parities.contains(&parity))
    }

    pub fn charges(&self) -> impl Iterator<Item = i32> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;
    use nalgebra::Point3;

    fn template(name: &str, slots: usize) -> BindingModeTemplate {
        let mut atoms = vec![AtomRecord::new("X", Point3::origin())];
        atoms.extend((0..slots).map(|i| AtomRecord::new("O", Point3::new(i as f64, 1.0, 0.0))));
        BindingModeTemplate::new(name, atoms)
    }

    #[test]
    fn mode_index_groups_by_slot_count() {
        let index = ModeIndex::new(vec![
            template("a", 2),
            template("b", 0),
            template("c", 2),
            template("d", 4),
        ]);
        assert_eq!(index.len(), 4);
        assert_eq!(index.max_ligs(), 4);
        assert!(index.contains(0));
        assert!(!index.contains(1));
        let names: Vec<&str> = index.templates(2).iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a", "c"]);
        assert!(index.templates(3).is_empty());
        assert_eq!(index.slot_counts().collect::<Vec<_>>(), vec![0, 2, 4]);
    }

    #[test]
    fn empty_mode_index_has_zero_max_ligs() {
        let index = ModeIndex::new(Vec::new());
        assert!(index.is_empty());
        assert_eq!(index.max_ligs(), 0);
    }

    #[test]
    fn counter_charge_keys_subtract_scaffold_charge() {
        let scaffold = Scaffold::new(-2, Parity::Even, Vec::new());
        let specs = vec![
            CounterChargeSpec::new(0, [0]),
            CounterChargeSpec::new(-1, [1]),
        ];
        let table = CounterChargeTable::from_specs(&specs, &scaffold).unwrap();

        assert_eq!(table.charges().collect::<Vec<_>>(), vec![1, 2]);
        assert!(table.allows(2, Parity::Even));
        assert!(!table.allows(2, Parity::Odd));
        assert!(table.allows(1, Parity::Odd));
        assert!(!table.contains_charge(0));
    }

    #[test]
    fn repeated_counter_charges_merge_parities() {
        let scaffold = Scaffold::new(0, Parity::Even, Vec::new());
        let specs = vec![
            CounterChargeSpec::new(0, [0, 2]),
            CounterChargeSpec::new(0, [1]),
        ];
        let table = CounterChargeTable::from_specs(&specs, &scaffold).unwrap();
        assert_eq!(table.len(), 1);
        assert!(table.allows(0, Parity::Even));
        assert!(table.allows(0, Parity::Odd));
    }

    #[test]
    fn counter_charge_without_parities_is_rejected() {
        let scaffold = Scaffold::new(0, Parity::Even, Vec::new());
        let specs = vec![CounterChargeSpec::new(0, [])];
        let err = CounterChargeTable::from_specs(&specs, &scaffold).unwrap_err();
        assert!(matches!(err, ConfigurationError::EmptyStateSet { .. }));
    }
}

use super::{EnumerationOutcome, collect_outcome};
use crate::core::models::combination::Combination;
use crate::core::models::species::{Ligand, Parity};
use crate::engine::context::{EnumerationContext, MetalUnit};
use crate::engine::error::EngineError;
use crate::engine::index::{CounterChargeTable, ModeIndex};
use crate::engine::progress::Progress;
use crate::engine::stats::EnumerationStats;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// One way to fill a ligand slot: a species in one of its accessible states.
#[derive(Debug, Clone)]
struct LigandOption {
    ligand: Arc<Ligand>,
    charge: i32,
    parity: Parity,
}

/// (aggregate charge, aggregate parity, slots used, first usable option).
type SearchState = (i32, Parity, usize, usize);

/// Enumerates combinations whose ligand slots may hold different species.
///
/// Each metal state is the root of a bounded search over ligand multisets of
/// up to `max_ligs` entries. Options are taken in non-decreasing index order,
/// so every multiset is visited once. A state is accepted when a template has
/// its slot count and the counter-charge table allows its charge and parity;
/// the search continues past accepted states until the slot bound.
#[instrument(skip_all, name = "mixed_enumeration_task")]
pub fn run(context: &EnumerationContext) -> Result<EnumerationOutcome, EngineError> {
    let units = context.metal_units();
    let options = ligand_options(context.ligands);
    info!(
        units = units.len(),
        options = options.len(),
        max_ligs = context.modes.max_ligs(),
        "Enumerating mixed-ligand combinations."
    );
    context.reporter.report(Progress::TaskStart {
        total_steps: units.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = units.iter();

    #[cfg(feature = "parallel")]
    let iterator = units.par_iter();

    let batches = iterator
        .map(|unit| {
            let batch = search_unit(unit, &options, context);
            context.reporter.report(Progress::TaskIncrement);
            batch
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    context.reporter.report(Progress::TaskFinish);

    let outcome = collect_outcome(batches, context.config);
    info!(
        combinations = outcome.combinations.len(),
        explored = outcome.stats.states_explored,
        pruned = outcome.stats.states_pruned,
        "Mixed-ligand enumeration complete."
    );
    Ok(outcome)
}

fn ligand_options(ligands: &[Arc<Ligand>]) -> Vec<LigandOption> {
    ligands
        .iter()
        .flat_map(|ligand| {
            ligand.states.iter().map(move |(charge, parity)| LigandOption {
                ligand: Arc::clone(ligand),
                charge,
                parity,
            })
        })
        .collect()
}

fn search_unit(
    unit: &MetalUnit,
    options: &[LigandOption],
    context: &EnumerationContext,
) -> Result<(Vec<Combination>, EnumerationStats), EngineError> {
    let mut root = Combination::new();
    root.add_metal(Arc::clone(&unit.metal), unit.charge, unit.parity)?;

    let mut search = MixedSearch::new(options, context.modes, context.counter_charges);
    search.explore(&root, 0);
    search.stats.units = 1;
    Ok((search.found, search.stats))
}

struct MixedSearch<'a> {
    options: &'a [LigandOption],
    modes: &'a ModeIndex,
    counter_charges: &'a CounterChargeTable,
    max_ligs: usize,
    feasible: HashMap<SearchState, bool>,
    found: Vec<Combination>,
    stats: EnumerationStats,
}

impl<'a> MixedSearch<'a> {
    fn new(
        options: &'a [LigandOption],
        modes: &'a ModeIndex,
        counter_charges: &'a CounterChargeTable,
    ) -> Self {
        Self {
            options,
            modes,
            counter_charges,
            max_ligs: modes.max_ligs(),
            feasible: HashMap::new(),
            found: Vec::new(),
            stats: EnumerationStats::default(),
        }
    }

    fn accepts(&mut self, combination: &Combination) -> bool {
        if !self.modes.contains(combination.num_ligands()) {
            self.stats.rejected_no_template += 1;
            false
        } else if !self
            .counter_charges
            .allows(combination.charge(), combination.parity())
        {
            self.stats.rejected_charge += 1;
            false
        } else {
            true
        }
    }

    /// Records every accepting state below `combination` and returns whether
    /// there was at least one.
    fn explore(&mut self, combination: &Combination, start: usize) -> bool {
        let state = (
            combination.charge(),
            combination.parity(),
            combination.num_ligands(),
            start,
        );
        if self.feasible.get(&state) == Some(&false) {
            self.stats.states_pruned += 1;
            return false;
        }
        self.stats.states_explored += 1;

        let mut any_accepted = false;
        if self.accepts(combination) {
            self.stats.accepted += 1;
            self.found.push(combination.clone());
            any_accepted = true;
        }

        if combination.num_ligands() < self.max_ligs {
            let options = self.options;
            for (idx, option) in options.iter().enumerate().skip(start) {
                let mut child = combination.clone();
                child.add_ligand(Arc::clone(&option.ligand), option.charge, option.parity);
                any_accepted |= self.explore(&child, idx);
            }
        }

        self.feasible.insert(state, any_accepted);
        any_accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::scaffold::Scaffold;
    use crate::core::models::species::{LigandAtom, Metal};
    use crate::core::models::template::BindingModeTemplate;
    use crate::engine::config::{CounterChargeSpec, EnumerationConfig, LigandMode};
    use crate::engine::progress::ProgressReporter;
    use nalgebra::Point3;

    fn template(slots: usize) -> BindingModeTemplate {
        let mut atoms = vec![AtomRecord::new("X", Point3::origin())];
        atoms.extend((0..slots).map(|i| AtomRecord::new("O", Point3::new(i as f64, 1.0, 0.0))));
        BindingModeTemplate::new(&format!("mode{}", slots), atoms)
    }

    fn ligand(name: &str, charges: &[i32], unpaired: &[u32]) -> Arc<Ligand> {
        Arc::new(
            Ligand::new(
                name,
                vec![LigandAtom::new("O", 0.0, 0.0, 0.0)],
                charges.iter().copied(),
                unpaired.iter().copied(),
            )
            .unwrap(),
        )
    }

    fn metal(name: &str, charges: &[i32], unpaired: &[u32]) -> Arc<Metal> {
        Arc::new(Metal::new(name, charges.iter().copied(), unpaired.iter().copied()).unwrap())
    }

    fn enumerate(
        slot_counts: &[usize],
        specs: Vec<CounterChargeSpec>,
        metals: &[Arc<Metal>],
        ligands: &[Arc<Ligand>],
    ) -> EnumerationOutcome {
        let scaffold = Scaffold::new(0, Parity::Even, Vec::new());
        let modes = ModeIndex::new(slot_counts.iter().map(|&n| template(n)));
        let table = CounterChargeTable::from_specs(&specs, &scaffold).unwrap();
        let config = EnumerationConfig {
            mode: LigandMode::Mixed,
            counter_charges: specs,
            max_results: None,
        };
        let reporter = ProgressReporter::new();
        let context = EnumerationContext::new(metals, ligands, &modes, &table, &config, &reporter);
        run(&context).unwrap()
    }

    fn keys(outcome: &EnumerationOutcome) -> Vec<String> {
        outcome
            .combinations
            .iter()
            .map(|c| c.key().to_string())
            .collect()
    }

    #[test]
    fn heterogeneous_multisets_are_found() {
        let outcome = enumerate(
            &[3],
            vec![CounterChargeSpec::new(0, [0])],
            &[metal("Fe", &[4], &[0])],
            &[ligand("OH", &[-1], &[0]), ligand("Oxide", &[-2], &[0])],
        );

        assert_eq!(keys(&outcome), vec!["FeOHOHOxide(0)(0)"]);
        assert!(!outcome.combinations[0].is_homogeneous());
    }

    #[test]
    fn search_continues_past_accepting_states() {
        let outcome = enumerate(
            &[1, 2],
            vec![
                CounterChargeSpec::new(1, [0]),
                CounterChargeSpec::new(0, [0]),
            ],
            &[metal("Cu", &[2], &[0])],
            &[ligand("OH", &[-1], &[0])],
        );

        assert_eq!(keys(&outcome), vec!["CuOH(1)(0)", "CuOHOH(0)(0)"]);
    }

    #[test]
    fn parity_must_be_listed_for_the_charge() {
        let outcome = enumerate(
            &[2],
            vec![CounterChargeSpec::new(0, [0])],
            &[metal("Cu", &[2], &[1])],
            &[ligand("OH", &[-1], &[0]), ligand("NO", &[-1], &[1])],
        );

        // Cu(II) is odd; only one odd ligand restores even parity.
        assert_eq!(keys(&outcome), vec!["CuNOOH(0)(0)"]);
    }

    #[test]
    fn every_ligand_state_is_an_option() {
        let outcome = enumerate(
            &[1],
            vec![CounterChargeSpec::new(0, [0, 1])],
            &[metal("V", &[2, 3], &[0])],
            &[ligand("L", &[-2, -3], &[0, 1])],
        );

        assert_eq!(keys(&outcome), vec!["LV(0)(0)", "LV(0)(1)"]);
        assert_eq!(outcome.stats.duplicates, 2);
    }

    #[test]
    fn bare_metal_is_an_accepting_state() {
        let outcome = enumerate(
            &[0, 1],
            vec![CounterChargeSpec::new(0, [0])],
            &[metal("Fe", &[0], &[0])],
            &[ligand("OH", &[-1], &[0])],
        );
        assert_eq!(keys(&outcome), vec!["Fe(0)(0)"]);
    }

    #[test]
    fn infeasible_subtrees_are_pruned() {
        let ligands: Vec<Arc<Ligand>> = ["A", "B", "C", "D"]
            .iter()
            .map(|name| ligand(name, &[-1], &[0]))
            .collect();
        let outcome = enumerate(
            &[4],
            vec![CounterChargeSpec::new(-10, [0])],
            &[metal("Pt", &[2], &[0])],
            &ligands,
        );

        assert!(outcome.combinations.is_empty());
        assert!(outcome.stats.states_pruned > 0);
    }

    #[test]
    fn results_satisfy_charge_parity_and_slot_constraints() {
        let specs = vec![
            CounterChargeSpec::new(0, [0]),
            CounterChargeSpec::new(1, [1]),
        ];
        let scaffold = Scaffold::new(0, Parity::Even, Vec::new());
        let table = CounterChargeTable::from_specs(&specs, &scaffold).unwrap();
        let outcome = enumerate(
            &[1, 2, 4],
            specs,
            &[metal("Co", &[2, 3], &[0, 1]), metal("Ni", &[2], &[0])],
            &[
                ligand("OH", &[-1], &[0]),
                ligand("Oxide", &[-2], &[0]),
                ligand("NO", &[-1, 1], &[1]),
            ],
        );

        assert!(!outcome.combinations.is_empty());
        for combination in &outcome.combinations {
            assert!(table.allows(combination.charge(), combination.parity()));
            assert!([1, 2, 4].contains(&combination.num_ligands()));
        }
    }
}

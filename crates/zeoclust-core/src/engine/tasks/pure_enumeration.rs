use super::{EnumerationOutcome, collect_outcome};
use crate::core::models::combination::Combination;
use crate::core::models::species::Ligand;
use crate::engine::context::{EnumerationContext, MetalUnit};
use crate::engine::error::EngineError;
use crate::engine::progress::Progress;
use crate::engine::stats::EnumerationStats;
use std::sync::Arc;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Enumerates combinations whose ligand slots all hold one species.
///
/// For each metal state the ligand count is solved directly from the
/// counter-charge keys instead of searched for.
#[instrument(skip_all, name = "pure_enumeration_task")]
pub fn run(context: &EnumerationContext) -> Result<EnumerationOutcome, EngineError> {
    let units = context.metal_units();
    info!(
        units = units.len(),
        ligands = context.ligands.len(),
        "Enumerating pure-ligand combinations."
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
            let batch = enumerate_unit(unit, context);
            context.reporter.report(Progress::TaskIncrement);
            batch
        })
        .collect::<Result<Vec<_>, EngineError>>()?;

    context.reporter.report(Progress::TaskFinish);

    let outcome = collect_outcome(batches, context.config);
    info!(
        combinations = outcome.combinations.len(),
        "Pure-ligand enumeration complete."
    );
    Ok(outcome)
}

fn enumerate_unit(
    unit: &MetalUnit,
    context: &EnumerationContext,
) -> Result<(Vec<Combination>, EnumerationStats), EngineError> {
    let mut stats = EnumerationStats {
        units: 1,
        ..Default::default()
    };
    let mut found = Vec::new();

    let mut bare = Combination::new();
    bare.add_metal(Arc::clone(&unit.metal), unit.charge, unit.parity)?;

    if !context.counter_charges.contains_charge(bare.charge()) {
        stats.rejected_charge += 1;
    } else if !context.modes.contains(0) {
        stats.rejected_no_template += 1;
    } else {
        stats.accepted += 1;
        found.push(bare.clone());
    }

    for ligand in context.ligands {
        for &ligand_charge in ligand.states.charges() {
            for target in context.counter_charges.charges() {
                match ligand_count(bare.charge(), target, ligand_charge) {
                    Ok(count) if context.modes.contains(count) => {
                        stats.accepted += 1;
                        found.push(with_ligands(&bare, ligand, count));
                    }
                    Ok(_) => stats.rejected_no_template += 1,
                    Err(Rejection::NeutralLigand) => stats.rejected_neutral_ligand += 1,
                    Err(Rejection::NonInteger) => stats.rejected_non_integer += 1,
                    Err(Rejection::NonPositive) => stats.rejected_non_positive += 1,
                }
            }
        }
    }

    Ok((found, stats))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rejection {
    NeutralLigand,
    NonInteger,
    NonPositive,
}

/// Number of ligands of charge `ligand_charge` that brings `metal_charge` to
/// `target`.
fn ligand_count(metal_charge: i32, target: i32, ligand_charge: i32) -> Result<usize, Rejection> {
    if ligand_charge == 0 {
        return Err(Rejection::NeutralLigand);
    }
    let numerator = metal_charge - target;
    let denominator = -ligand_charge;
    if numerator % denominator != 0 {
        return Err(Rejection::NonInteger);
    }
    let count = numerator / denominator;
    if count <= 0 {
        return Err(Rejection::NonPositive);
    }
    Ok(count as usize)
}

/// Clones `bare` and appends `count` copies of `ligand`, each contributing
/// the ligand's first declared state.
fn with_ligands(bare: &Combination, ligand: &Arc<Ligand>, count: usize) -> Combination {
    let (charge, parity) = ligand.states.first();
    let mut combination = bare.clone();
    for _ in 0..count {
        combination.add_ligand(Arc::clone(ligand), charge, parity);
    }
    combination
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::atom::AtomRecord;
    use crate::core::models::scaffold::Scaffold;
    use crate::core::models::species::{LigandAtom, Metal, Parity};
    use crate::core::models::template::BindingModeTemplate;
    use crate::engine::config::{CounterChargeSpec, EnumerationConfig, LigandMode};
    use crate::engine::index::{CounterChargeTable, ModeIndex};
    use crate::engine::progress::ProgressReporter;
    use nalgebra::Point3;

    fn template(name: &str, slots: usize) -> BindingModeTemplate {
        let mut atoms = vec![AtomRecord::new("X", Point3::origin())];
        atoms.extend((0..slots).map(|i| AtomRecord::new("O", Point3::new(i as f64, 1.0, 0.0))));
        BindingModeTemplate::new(name, atoms)
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

    struct Fixture {
        modes: ModeIndex,
        table: CounterChargeTable,
        config: EnumerationConfig,
    }

    impl Fixture {
        fn new(slot_counts: &[usize], specs: Vec<CounterChargeSpec>, scaffold_charge: i32) -> Self {
            let scaffold = Scaffold::new(scaffold_charge, Parity::Even, Vec::new());
            let modes = ModeIndex::new(
                slot_counts
                    .iter()
                    .enumerate()
                    .map(|(i, &n)| template(&format!("mode{}", i), n)),
            );
            let table = CounterChargeTable::from_specs(&specs, &scaffold).unwrap();
            let config = EnumerationConfig {
                mode: LigandMode::Pure,
                counter_charges: specs,
                max_results: None,
            };
            Self {
                modes,
                table,
                config,
            }
        }

        fn run(&self, metals: &[Arc<Metal>], ligands: &[Arc<Ligand>]) -> EnumerationOutcome {
            let reporter = ProgressReporter::new();
            let context = EnumerationContext::new(
                metals,
                ligands,
                &self.modes,
                &self.table,
                &self.config,
                &reporter,
            );
            run(&context).unwrap()
        }
    }

    fn keys(outcome: &EnumerationOutcome) -> Vec<String> {
        outcome
            .combinations
            .iter()
            .map(|c| c.key().to_string())
            .collect()
    }

    #[test]
    fn odd_metal_charges_with_oxide_yield_nothing() {
        let fixture = Fixture::new(&[1, 2, 3], vec![CounterChargeSpec::new(0, [0])], 0);
        let outcome = fixture.run(&[metal("M", &[1, 3], &[0])], &[ligand("Oxide", &[-2], &[0])]);

        assert!(outcome.combinations.is_empty());
        assert_eq!(outcome.stats.rejected_non_integer, 2);
        assert_eq!(outcome.stats.rejected_charge, 2);
    }

    #[test]
    fn zinc_with_two_hydroxides_is_accepted() {
        let fixture = Fixture::new(&[2], vec![CounterChargeSpec::new(0, [0])], 0);
        let outcome = fixture.run(
            &[metal("Zn", &[2], &[0])],
            &[ligand("Hydroxide", &[-1], &[0])],
        );

        assert_eq!(keys(&outcome), vec!["HydroxideHydroxideZn(0)(0)"]);
        assert_eq!(outcome.combinations[0].charge(), 0);
        assert_eq!(outcome.combinations[0].num_ligands(), 2);
    }

    #[test]
    fn bare_metal_is_accepted_with_zero_slot_template() {
        let fixture = Fixture::new(&[0], vec![CounterChargeSpec::new(0, [0])], 0);
        let outcome = fixture.run(&[metal("Fe", &[0], &[0])], &[]);

        assert_eq!(keys(&outcome), vec!["Fe(0)(0)"]);
        assert_eq!(outcome.combinations[0].num_ligands(), 0);
    }

    #[test]
    fn separately_built_identical_metals_collapse() {
        let fixture = Fixture::new(&[0, 2], vec![CounterChargeSpec::new(0, [0])], 0);
        let outcome = fixture.run(
            &[metal("Zn", &[2, 0], &[0]), metal("Zn", &[2, 0], &[0])],
            &[ligand("OH", &[-1], &[0])],
        );

        assert_eq!(keys(&outcome), vec!["OHOHZn(0)(0)", "Zn(0)(0)"]);
        assert_eq!(outcome.stats.duplicates, 2);
        assert_eq!(outcome.stats.units, 4);
    }

    #[test]
    fn every_result_charge_is_a_counter_charge_key() {
        let fixture = Fixture::new(
            &[0, 1, 2, 3, 4],
            vec![
                CounterChargeSpec::new(0, [0]),
                CounterChargeSpec::new(-1, [1]),
            ],
            -2,
        );
        let outcome = fixture.run(
            &[metal("Cu", &[1, 2], &[0, 1]), metal("Fe", &[2, 3], &[0])],
            &[
                ligand("OH", &[-1], &[0]),
                ligand("Oxide", &[-2], &[0]),
                ligand("Hydride", &[-1], &[0]),
            ],
        );

        assert!(!outcome.combinations.is_empty());
        for combination in &outcome.combinations {
            assert!(fixture.table.contains_charge(combination.charge()));
            assert!(combination.is_homogeneous());
        }
    }

    #[test]
    fn scaffold_charge_shifts_required_cluster_charge() {
        // A -2 scaffold needs a +2 cluster for a neutral system.
        let fixture = Fixture::new(&[0, 1], vec![CounterChargeSpec::new(0, [0])], -2);
        let outcome = fixture.run(&[metal("Cu", &[3, 2], &[0])], &[ligand("OH", &[-1], &[0])]);

        assert_eq!(keys(&outcome), vec!["CuOH(2)(0)", "Cu(2)(0)"]);
    }

    #[test]
    fn repeated_ligands_contribute_their_first_declared_state() {
        let fixture = Fixture::new(&[1, 2], vec![CounterChargeSpec::new(0, [0])], 0);
        let outcome = fixture.run(&[metal("Ni", &[2], &[0])], &[ligand("L", &[-1, -2], &[1])]);

        // The -2 state solves the count to one ligand, but the -1 state is added.
        assert_eq!(keys(&outcome), vec!["LLNi(0)(0)", "LNi(1)(1)"]);
    }

    #[test]
    fn neutral_ligand_states_are_counted_not_fatal() {
        let fixture = Fixture::new(&[1], vec![CounterChargeSpec::new(0, [0])], 0);
        let outcome = fixture.run(&[metal("Pd", &[0], &[0])], &[ligand("H2O", &[0], &[0])]);

        assert!(outcome.combinations.is_empty());
        assert_eq!(outcome.stats.rejected_neutral_ligand, 1);
    }

    #[test]
    fn ligand_count_solves_only_positive_integers() {
        assert_eq!(ligand_count(2, 0, -1), Ok(2));
        assert_eq!(ligand_count(3, 1, -2), Ok(1));
        assert_eq!(ligand_count(3, 0, -2), Err(Rejection::NonInteger));
        assert_eq!(ligand_count(0, 0, -1), Err(Rejection::NonPositive));
        assert_eq!(ligand_count(1, 2, -1), Err(Rejection::NonPositive));
        assert_eq!(ligand_count(2, 0, 0), Err(Rejection::NeutralLigand));
    }

    #[test]
    fn result_limit_truncates_in_unit_order() {
        let mut fixture = Fixture::new(&[0, 1, 2], vec![CounterChargeSpec::new(0, [0])], 0);
        fixture.config.max_results = Some(1);
        let outcome = fixture.run(&[metal("Zn", &[2], &[0])], &[
            ligand("OH", &[-1], &[0]),
            ligand("Oxide", &[-2], &[0]),
        ]);

        assert_eq!(keys(&outcome), vec!["OHOHZn(0)(0)"]);
        assert_eq!(outcome.stats.truncated, 1);
    }
}

use super::matching::Pairing;
use crate::core::models::atom::AtomRecord;
use crate::core::models::combination::Combination;
use crate::core::models::conformer::AbstractConformer;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::species::Ligand;
use crate::core::models::template::BindingModeTemplate;
use crate::core::utils::geometry::{anchor_vector, translate_all};
use crate::engine::config::LigandMode;
use crate::engine::error::{EngineError, TemplateMismatchError};
use crate::engine::progress::{Progress, ProgressReporter};
use itertools::Itertools;
use nalgebra::Point3;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// A pairing that could not be built, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairingFailure {
    pub combination: String,
    pub template: String,
    pub error: TemplateMismatchError,
}

#[derive(Debug, Clone, Default)]
pub struct BuildOutcome {
    pub conformers: Vec<AbstractConformer>,
    pub failures: Vec<PairingFailure>,
}

#[instrument(skip_all, name = "conformer_build_task")]
pub fn run(
    pairings: &[Pairing],
    scaffold: &Scaffold,
    mode: LigandMode,
    reporter: &ProgressReporter,
) -> Result<BuildOutcome, EngineError> {
    if mode == LigandMode::Pure && pairings.iter().any(|p| !p.combination.is_homogeneous()) {
        return Err(EngineError::UnimplementedMode {
            mode,
            operation: "slot assignment of heterogeneous ligand sets",
        });
    }

    info!(pairings = pairings.len(), %mode, "Building conformers.");
    reporter.report(Progress::TaskStart {
        total_steps: pairings.len() as u64,
    });

    #[cfg(not(feature = "parallel"))]
    let iterator = pairings.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairings.par_iter();

    let results: Vec<_> = iterator
        .map(|pairing| {
            let built = match mode {
                LigandMode::Pure => build_single_pass(pairing, scaffold).map(|c| vec![c]),
                LigandMode::Mixed => build_all_assignments(pairing, scaffold),
            };
            reporter.report(Progress::TaskIncrement);
            built
        })
        .collect();

    reporter.report(Progress::TaskFinish);

    let mut outcome = BuildOutcome::default();
    for (pairing, result) in pairings.iter().zip(results) {
        match result {
            Ok(conformers) => outcome.conformers.extend(conformers),
            Err(error) => {
                warn!(
                    combination = %pairing.combination.key(),
                    template = %pairing.template.name,
                    "Skipping pairing: {}",
                    error
                );
                outcome.failures.push(PairingFailure {
                    combination: pairing.combination.key().to_string(),
                    template: pairing.template.name.clone(),
                    error,
                });
            }
        }
    }

    info!(
        conformers = outcome.conformers.len(),
        failures = outcome.failures.len(),
        "Conformer building complete."
    );
    Ok(outcome)
}

/// Builds the one conformer of a pairing, filling slots in the combination's
/// ligand order.
pub fn build_single_pass(
    pairing: &Pairing,
    scaffold: &Scaffold,
) -> Result<AbstractConformer, TemplateMismatchError> {
    build_conformer(
        &pairing.combination,
        &pairing.template,
        pairing.combination.ligands(),
        scaffold,
    )
}

/// Builds one conformer per distinct assignment of ligand species to slots.
pub fn build_all_assignments(
    pairing: &Pairing,
    scaffold: &Scaffold,
) -> Result<Vec<AbstractConformer>, TemplateMismatchError> {
    slot_assignments(&pairing.combination)
        .iter()
        .map(|slots| build_conformer(&pairing.combination, &pairing.template, slots, scaffold))
        .collect()
}

/// Every distinct ordering of the combination's ligand multiset.
///
/// Ligands sharing a name are interchangeable, so orderings that differ only
/// by swapping them are produced once.
pub fn slot_assignments(combination: &Combination) -> Vec<Vec<Arc<Ligand>>> {
    let ligands = combination.ligands();
    let groups: Vec<usize> = ligands
        .iter()
        .map(|ligand| {
            ligands
                .iter()
                .position(|other| other.name == ligand.name)
                .unwrap_or(0)
        })
        .collect();

    groups
        .iter()
        .copied()
        .permutations(groups.len())
        .unique()
        .map(|order| order.into_iter().map(|g| Arc::clone(&ligands[g])).collect())
        .collect()
}

/// Places `combination` on `template`, putting `slot_ligands[i]` on the
/// `i`-th anchor.
///
/// The placeholder entry becomes the metal line. Each ligand is rigidly
/// translated by its anchor's position vector and written as free atoms.
///
/// # Errors
///
/// Returns [`TemplateMismatchError`] if the template does not hold exactly one
/// placeholder, the combination has no metal, or the slot and ligand counts
/// differ.
pub fn build_conformer(
    combination: &Arc<Combination>,
    template: &Arc<BindingModeTemplate>,
    slot_ligands: &[Arc<Ligand>],
    scaffold: &Scaffold,
) -> Result<AbstractConformer, TemplateMismatchError> {
    let placeholder = match template.placeholder_indices().as_slice() {
        [] => {
            return Err(TemplateMismatchError::NoPlaceholder {
                template: template.name.clone(),
            });
        }
        [index] => *index,
        many => {
            return Err(TemplateMismatchError::MultiplePlaceholders {
                template: template.name.clone(),
                count: many.len(),
            });
        }
    };
    let metal = combination
        .metal()
        .ok_or_else(|| TemplateMismatchError::MissingMetal {
            template: template.name.clone(),
        })?;
    let slots = template.ligand_slot_count();
    if slots != slot_ligands.len() {
        return Err(TemplateMismatchError::SlotCountMismatch {
            template: template.name.clone(),
            slots,
            ligands: slot_ligands.len(),
        });
    }

    let mut entries = template.atoms().to_vec();
    entries[placeholder].symbol = metal.name.clone();

    let ligand_atoms: usize = slot_ligands.iter().map(|l| l.atoms().len()).sum();
    let mut atoms = Vec::with_capacity(1 + ligand_atoms);
    atoms.push(entries[placeholder].clone());

    let anchors = entries
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != placeholder)
        .map(|(_, anchor)| anchor);
    for (anchor, ligand) in anchors.zip(slot_ligands) {
        let offset = anchor_vector(&Point3::origin(), &anchor.position);
        let positions = translate_all(ligand.atoms().iter().map(|a| &a.position), &offset);
        atoms.extend(
            ligand
                .atoms()
                .iter()
                .zip(positions)
                .map(|(atom, position)| AtomRecord::new(&atom.symbol, position)),
        );
    }

    Ok(AbstractConformer {
        combination: Arc::clone(combination),
        template: Arc::clone(template),
        atoms,
        total_charge: combination.charge() + scaffold.base_charge,
        total_parity: combination.parity() ^ scaffold.base_parity,
    })
}

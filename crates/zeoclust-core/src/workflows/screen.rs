use crate::core::catalog::registry::SpeciesCatalog;
use crate::core::models::combination::Combination;
use crate::core::models::conformer::AbstractConformer;
use crate::core::models::scaffold::Scaffold;
use crate::core::models::template::BindingModeTemplate;
use crate::engine::config::{EnumerationConfig, LigandMode};
use crate::engine::context::EnumerationContext;
use crate::engine::error::EngineError;
use crate::engine::index::{CounterChargeTable, ModeIndex};
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::stats::EnumerationStats;
use crate::engine::tasks;
use crate::engine::tasks::conformer_build::PairingFailure;
use std::sync::Arc;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone)]
pub struct ScreeningResult {
    /// Distinct combinations, in discovery order.
    pub combinations: Vec<Arc<Combination>>,
    pub conformers: Vec<AbstractConformer>,
    /// Pairings skipped because the template did not fit the combination.
    pub failures: Vec<PairingFailure>,
    pub stats: EnumerationStats,
}

#[instrument(skip_all, name = "screening_workflow")]
pub fn run(
    scaffold: &Scaffold,
    templates: Vec<BindingModeTemplate>,
    catalog: &SpeciesCatalog,
    config: &EnumerationConfig,
    reporter: &ProgressReporter,
) -> Result<ScreeningResult, EngineError> {
    // === Phase 1: Index templates and counter charges ===
    reporter.report(Progress::PhaseStart { name: "Indexing" });
    let modes = ModeIndex::new(templates);
    let counter_charges = CounterChargeTable::from_specs(&config.counter_charges, scaffold)?;
    info!(
        templates = modes.len(),
        max_ligs = modes.max_ligs(),
        counter_charges = counter_charges.len(),
        metals = catalog.metals().len(),
        ligands = catalog.ligands().len(),
        mode = %config.mode,
        "Screening inputs indexed."
    );
    if modes.is_empty() {
        warn!("No binding-mode templates were supplied; no conformers can be built.");
    }
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Enumerate distinct combinations ===
    reporter.report(Progress::PhaseStart {
        name: "Enumeration",
    });
    let context = EnumerationContext::new(
        catalog.metals(),
        catalog.ligands(),
        &modes,
        &counter_charges,
        config,
        reporter,
    );
    let outcome = match config.mode {
        LigandMode::Pure => tasks::pure_enumeration::run(&context)?,
        LigandMode::Mixed => tasks::mixed_enumeration::run(&context)?,
    };
    let combinations: Vec<Arc<Combination>> =
        outcome.combinations.into_iter().map(Arc::new).collect();
    reporter.report(Progress::StatusUpdate {
        text: format!("{} distinct combination(s)", combinations.len()),
    });
    reporter.report(Progress::PhaseFinish);

    // === Phase 3: Match templates and build conformers ===
    reporter.report(Progress::PhaseStart {
        name: "Conformer Building",
    });
    let pairings = tasks::matching::pairings(&combinations, &modes);
    let built = tasks::conformer_build::run(&pairings, scaffold, config.mode, reporter)?;
    reporter.report(Progress::PhaseFinish);

    info!(
        combinations = combinations.len(),
        conformers = built.conformers.len(),
        failures = built.failures.len(),
        rejected = outcome.stats.rejected(),
        "Screening complete."
    );

    Ok(ScreeningResult {
        combinations,
        conformers: built.conformers,
        failures: built.failures,
        stats: outcome.stats,
    })
}

use crate::core::models::combination::Combination;
use crate::core::models::template::BindingModeTemplate;
use crate::engine::index::ModeIndex;
use std::sync::Arc;

/// A combination paired with one template of the same slot count.
#[derive(Debug, Clone)]
pub struct Pairing {
    pub combination: Arc<Combination>,
    pub template: Arc<BindingModeTemplate>,
}

/// Pairs each combination with every template offering its ligand count.
///
/// A combination matching several templates appears once per template, in
/// template order; combinations with no matching template yield nothing.
pub fn pairings(combinations: &[Arc<Combination>], modes: &ModeIndex) -> Vec<Pairing> {
    combinations
        .iter()
        .flat_map(|combination| {
            modes
                .templates(combination.num_ligands())
                .iter()
                .map(move |template| Pairing {
                    combination: Arc::clone(combination),
                    template: Arc::clone(template),
                })
        })
        .collect()
}

use super::config::EnumerationConfig;
use super::index::{CounterChargeTable, ModeIndex};
use super::progress::ProgressReporter;
use crate::core::models::species::{Ligand, Metal, Parity};
use std::sync::Arc;

/// Read-only inputs shared by every enumeration worker.
#[derive(Clone, Copy)]
pub struct EnumerationContext<'a> {
    pub metals: &'a [Arc<Metal>],
    pub ligands: &'a [Arc<Ligand>],
    pub modes: &'a ModeIndex,
    pub counter_charges: &'a CounterChargeTable,
    pub config: &'a EnumerationConfig,
    pub reporter: &'a ProgressReporter<'a>,
}

impl<'a> EnumerationContext<'a> {
    pub fn new(
        metals: &'a [Arc<Metal>],
        ligands: &'a [Arc<Ligand>],
        modes: &'a ModeIndex,
        counter_charges: &'a CounterChargeTable,
        config: &'a EnumerationConfig,
        reporter: &'a ProgressReporter<'a>,
    ) -> Self {
        Self {
            metals,
            ligands,
            modes,
            counter_charges,
            config,
            reporter,
        }
    }

    /// Every (metal, oxidation charge, spin parity) unit, metal-major.
    pub fn metal_units(&self) -> Vec<MetalUnit> {
        self.metals
            .iter()
            .flat_map(|metal| {
                metal
                    .states
                    .iter()
                    .map(move |(charge, parity)| MetalUnit {
                        metal: Arc::clone(metal),
                        charge,
                        parity,
                    })
            })
            .collect()
    }
}

/// One independent slice of the search: a metal in a fixed electronic state.
#[derive(Debug, Clone)]
pub struct MetalUnit {
    pub metal: Arc<Metal>,
    pub charge: i32,
    pub parity: Parity,
}

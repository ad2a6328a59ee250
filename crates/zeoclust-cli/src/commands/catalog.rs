use crate::cli::CatalogArgs;
use crate::error::{CliError, Result};
use itertools::Itertools;
use tracing::info;
use zeoclust::core::catalog::{
    builtin::{builtin_ligand, builtin_ligand_names},
    registry::SpeciesCatalog,
};
use zeoclust::core::models::species::ElectronicStates;

pub fn run(args: CatalogArgs) -> Result<()> {
    println!("Built-in ligands:");
    for name in builtin_ligand_names() {
        let Some(builtin) = builtin_ligand(name) else {
            continue;
        };
        let ligand = builtin
            .instantiate(name)
            .map_err(|e| CliError::Other(e.into()))?;
        println!(
            "  {:<12} {:>2} atom(s)  {}",
            name,
            ligand.atoms().len(),
            describe_states(&ligand.states)
        );
    }

    let Some(path) = args.catalog else {
        return Ok(());
    };

    info!("Loading species catalog from {:?}", &path);
    let catalog = SpeciesCatalog::load(&path).map_err(|e| CliError::FileParsing {
        path: path.clone(),
        source: e.into(),
    })?;

    println!("\nMetals in {}:", path.display());
    for metal in catalog.metals() {
        println!("  {:<12} {}", metal.name, describe_states(&metal.states));
    }
    println!("\nLigands in {}:", path.display());
    for ligand in catalog.ligands() {
        println!(
            "  {:<12} {:>2} atom(s)  {}",
            ligand.name,
            ligand.atoms().len(),
            describe_states(&ligand.states)
        );
    }
    Ok(())
}

fn describe_states(states: &ElectronicStates) -> String {
    format!(
        "charges [{}]  parities [{}]",
        states.charges().iter().join(", "),
        states.parities().iter().join(", ")
    )
}

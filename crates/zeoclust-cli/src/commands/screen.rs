use crate::cli::ScreenArgs;
use crate::config::{build_config, AppConfig};
use crate::error::{CliError, Result};
use crate::utils::progress::CliProgressHandler;
use tracing::{info, warn};
use zeoclust::{
    core::{
        catalog::registry::SpeciesCatalog,
        io::{
            gaussian::{self, GaussianFile},
            traits::{JobHeader, StructureInput},
        },
        models::scaffold::Scaffold,
    },
    engine::progress::ProgressReporter,
    workflows::{self, screen::ScreeningResult},
};

pub fn run(args: ScreenArgs) -> Result<()> {
    info!("Merging configuration from file and CLI arguments...");
    let config = build_config(&args)?;

    info!("Loading scaffold from {:?}", &config.scaffold_path);
    let (scaffold, header) =
        GaussianFile::read_scaffold_from_path(&config.scaffold_path).map_err(|e| {
            CliError::FileParsing {
                path: config.scaffold_path.clone(),
                source: e.into(),
            }
        })?;

    info!("Loading binding modes from {:?}", &config.binding_modes_dir);
    let templates = gaussian::load_binding_modes(&config.binding_modes_dir, &scaffold).map_err(
        |e| CliError::FileParsing {
            path: config.binding_modes_dir.clone(),
            source: e.into(),
        },
    )?;

    info!("Loading species catalog from {:?}", &config.catalog_path);
    let catalog =
        SpeciesCatalog::load(&config.catalog_path).map_err(|e| CliError::FileParsing {
            path: config.catalog_path.clone(),
            source: e.into(),
        })?;

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());

    println!(
        "Screening {} metal(s) and {} ligand(s) over {} binding mode(s) in {} mode...",
        catalog.metals().len(),
        catalog.ligands().len(),
        templates.len(),
        config.core_config.mode
    );
    info!("Invoking the core screening workflow...");
    let result = workflows::screen::run(
        &scaffold,
        templates,
        &catalog,
        &config.core_config,
        &reporter,
    )?;

    print_summary(&result);

    if result.conformers.is_empty() {
        warn!("Workflow completed but produced no conformers.");
        println!("Warning: no conformers were produced; nothing to write.");
        return Ok(());
    }

    write_output(&config, &result, &scaffold, &header)
}

fn print_summary(result: &ScreeningResult) {
    let stats = &result.stats;
    println!(
        "Found {} combination(s) from {} metal state(s): {} rejected, {} duplicate(s), {} truncated.",
        result.combinations.len(),
        stats.units,
        stats.rejected(),
        stats.duplicates,
        stats.truncated
    );
    println!("Built {} conformer(s).", result.conformers.len());

    if !result.failures.is_empty() {
        println!(
            "{} pairing(s) could not be built:",
            result.failures.len()
        );
        for failure in &result.failures {
            println!(
                "  - {} on {}: {}",
                failure.combination, failure.template, failure.error
            );
        }
    }
}

fn write_output(
    config: &AppConfig,
    result: &ScreeningResult,
    scaffold: &Scaffold,
    header: &JobHeader,
) -> Result<()> {
    if config.dry_run {
        info!("Dry run requested; skipping file output.");
        println!(
            "Dry run: {} job file(s) would be written to {:?}.",
            result.conformers.len(),
            &config.output_dir
        );
        return Ok(());
    }

    let written = gaussian::write_all(
        &result.conformers,
        scaffold,
        header,
        &config.output_dir,
        config.make_dirs,
    )
    .map_err(|e| CliError::Output {
        path: config.output_dir.clone(),
        source: e.into(),
    })?;

    println!(
        "Wrote {} job file(s) to {:?}.",
        written.len(),
        &config.output_dir
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    const SCAFFOLD: &str = "\
%mem=4GB
# opt b3lyp/6-31g(d)

scaffold ring

-2 1
Si 0 0.0 0.0 0.0
O  0 1.6 0.0 0.0

";

    const BINDING_MODE: &str = "\
# opt

mode

0 1
Si 0 0.0 0.0 0.0
O  0 1.6 0.0 0.0
X  0 0.0 0.0 2.0
O  0 0.0 0.0 4.0

";

    const CATALOG: &str = r#"
builtin-ligands = ["OH"]

[[metals]]
name = "Cu"
charges = [3]
unpaired = [0]
"#;

    fn write_inputs(root: &Path, extra: &str) -> std::path::PathBuf {
        fs::write(root.join("ring.com"), SCAFFOLD).unwrap();
        fs::create_dir(root.join("modes")).unwrap();
        fs::write(root.join("modes").join("single.com"), BINDING_MODE).unwrap();
        fs::write(root.join("species.toml"), CATALOG).unwrap();

        let run_file = root.join("run.toml");
        fs::write(
            &run_file,
            format!(
                "scaffold = \"ring.com\"\nbinding-modes = \"modes\"\ncatalog = \"species.toml\"\noutput-dir = \"out\"\nmake-dirs = false\n{}\n[[counter-charges]]\ncharge = 0\n",
                extra
            ),
        )
        .unwrap();
        run_file
    }

    fn args_for(config: std::path::PathBuf, dry_run: bool) -> ScreenArgs {
        ScreenArgs {
            config,
            output_dir: None,
            mode: None,
            max_results: None,
            dry_run,
        }
    }

    #[test]
    fn screen_writes_one_job_per_conformer() {
        let dir = tempdir().unwrap();
        let run_file = write_inputs(dir.path(), "");

        run(args_for(run_file, false)).expect("screen should succeed");

        let written: Vec<_> = fs::read_dir(dir.path().join("out"))
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(written, vec!["CuOH_charge0_mult1_conf1.com".to_string()]);
    }

    #[test]
    fn dry_run_writes_nothing() {
        let dir = tempdir().unwrap();
        let run_file = write_inputs(dir.path(), "");

        run(args_for(run_file, true)).expect("dry run should succeed");

        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn unreadable_scaffold_is_reported_with_its_path() {
        let dir = tempdir().unwrap();
        let run_file = write_inputs(dir.path(), "");
        fs::write(dir.path().join("ring.com"), "").unwrap();

        let result = run(args_for(run_file, true));
        assert!(
            matches!(result, Err(CliError::FileParsing { path, .. }) if path.ends_with("ring.com"))
        );
    }
}

use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::ScreenArgs;
use crate::error::{CliError, Result};
use std::path::PathBuf;
use zeoclust::engine::config::{CounterChargeSpec, EnumerationConfigBuilder, LigandMode};

/// Merges CLI flags over the run file over built-in defaults.
pub fn build_config(args: &ScreenArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let file_config = FileConfig::from_file(&args.config)?;

    let scaffold_path = required(file_config.scaffold, "scaffold")?;
    let binding_modes_dir = required(file_config.binding_modes, "binding-modes")?;
    let catalog_path = required(file_config.catalog, "catalog")?;

    let output_dir = args
        .output_dir
        .clone()
        .or(file_config.output_dir)
        .unwrap_or(defaults.output_dir);
    let make_dirs = file_config.make_dirs.unwrap_or(defaults.make_dirs);

    let mode: LigandMode = args
        .mode
        .map(Into::into)
        .or(file_config.mode)
        .unwrap_or(defaults.mode);
    let max_results = args.max_results.or(file_config.max_results);

    let counter_charges: Vec<CounterChargeSpec> = if file_config.counter_charges.is_empty() {
        defaults.counter_charges
    } else {
        file_config
            .counter_charges
            .into_iter()
            .map(Into::into)
            .collect()
    };

    let core_config = EnumerationConfigBuilder::new()
        .mode(mode)
        .counter_charges(counter_charges)
        .max_results(max_results)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    Ok(AppConfig {
        scaffold_path,
        binding_modes_dir,
        catalog_path,
        output_dir,
        make_dirs,
        dry_run: args.dry_run,
        core_config,
    })
}

fn required(value: Option<PathBuf>, key: &str) -> Result<PathBuf> {
    value.ok_or_else(|| {
        CliError::Config(format!(
            "`{}` is required in the run configuration file.",
            key
        ))
    })
}

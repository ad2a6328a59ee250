use std::path::PathBuf;
use zeoclust::engine::config::EnumerationConfig;

pub struct AppConfig {
    pub scaffold_path: PathBuf,
    pub binding_modes_dir: PathBuf,
    pub catalog_path: PathBuf,
    pub output_dir: PathBuf,
    pub make_dirs: bool,
    pub dry_run: bool,
    pub core_config: EnumerationConfig,
}

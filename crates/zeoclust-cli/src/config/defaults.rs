use std::path::PathBuf;
use zeoclust::engine::config::{CounterChargeSpec, LigandMode};

pub struct DefaultsConfig {
    pub mode: LigandMode,
    pub output_dir: PathBuf,
    pub make_dirs: bool,
    pub counter_charges: Vec<CounterChargeSpec>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: LigandMode::Pure,
            output_dir: PathBuf::from("clusters"),
            make_dirs: true,
            counter_charges: vec![CounterChargeSpec::new(0, [0])],
        }
    }
}

use crate::core::error::ConfigurationError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Ligand composition allowed within a single combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LigandMode {
    /// Every ligand slot holds the same species.
    #[default]
    Pure,
    /// Ligand slots may hold different species.
    Mixed,
}

impl fmt::Display for LigandMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LigandMode::Pure => write!(f, "pure"),
            LigandMode::Mixed => write!(f, "mixed"),
        }
    }
}

impl FromStr for LigandMode {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pure" => Ok(LigandMode::Pure),
            "mixed" => Ok(LigandMode::Mixed),
            other => Err(ConfigurationError::InvalidParameter {
                parameter: "mode",
                reason: format!("expected 'pure' or 'mixed', got '{}'", other),
            }),
        }
    }
}

/// A target net charge for the whole system (scaffold included) and the
/// unpaired-electron counts allowed alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CounterChargeSpec {
    pub charge: i32,
    pub unpaired: Vec<u32>,
}

impl CounterChargeSpec {
    pub fn new(charge: i32, unpaired: impl IntoIterator<Item = u32>) -> Self {
        Self {
            charge,
            unpaired: unpaired.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnumerationConfig {
    pub mode: LigandMode,
    pub counter_charges: Vec<CounterChargeSpec>,
    /// Stops collecting combinations once this many distinct ones are found.
    pub max_results: Option<usize>,
}

#[derive(Default)]
pub struct EnumerationConfigBuilder {
    mode: Option<LigandMode>,
    counter_charges: Option<Vec<CounterChargeSpec>>,
    max_results: Option<usize>,
}

impl EnumerationConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(mut self, mode: LigandMode) -> Self {
        self.mode = Some(mode);
        self
    }
    pub fn counter_charges(mut self, specs: Vec<CounterChargeSpec>) -> Self {
        self.counter_charges = Some(specs);
        self
    }
    pub fn counter_charge(mut self, spec: CounterChargeSpec) -> Self {
        self.counter_charges.get_or_insert_with(Vec::new).push(spec);
        self
    }
    pub fn max_results(mut self, limit: Option<usize>) -> Self {
        self.max_results = limit;
        self
    }

    pub fn build(self) -> Result<EnumerationConfig, ConfigurationError> {
        let counter_charges = self
            .counter_charges
            .ok_or(ConfigurationError::MissingParameter("counter_charges"))?;
        if counter_charges.is_empty() {
            return Err(ConfigurationError::MissingParameter("counter_charges"));
        }
        if let Some(spec) = counter_charges.iter().find(|s| s.unpaired.is_empty()) {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "counter_charges",
                reason: format!("charge {} lists no unpaired-electron counts", spec.charge),
            });
        }
        if self.max_results == Some(0) {
            return Err(ConfigurationError::InvalidParameter {
                parameter: "max_results",
                reason: "must be at least 1".to_string(),
            });
        }

        Ok(EnumerationConfig {
            mode: self.mode.ok_or(ConfigurationError::MissingParameter("mode"))?,
            counter_charges,
            max_results: self.max_results,
        })
    }
}

use nalgebra::Point3;
use std::fmt;
use std::str::FromStr;

/// Optimization constraint attached to an atom line in a structure file.
///
/// Gaussian-style job files mark atoms as free (`0`) or frozen (`-1`) in the
/// column between the element symbol and the coordinates. Generated ligand
/// atoms are always written as free.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum FrozenFlag {
    /// The atom may move during a downstream optimization.
    #[default]
    Free,
    /// The atom is held fixed during a downstream optimization.
    Frozen,
}

impl FrozenFlag {
    pub fn as_str(&self) -> &'static str {
        match self {
            FrozenFlag::Free => "0",
            FrozenFlag::Frozen => "-1",
        }
    }
}

impl fmt::Display for FrozenFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FrozenFlag {
    type Err = ();

    /// Parses the frozen column of an atom line.
    ///
    /// Only the two literal markers used by Gaussian input files are accepted;
    /// anything else (typically the first coordinate of a line without a
    /// frozen column) is rejected so the caller can fall back to the default.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "0" => Ok(FrozenFlag::Free),
            "-1" => Ok(FrozenFlag::Frozen),
            _ => Err(()),
        }
    }
}

/// A single atom line of a scaffold, a binding-mode template, or a generated
/// conformer.
#[derive(Debug, Clone, PartialEq)]
pub struct AtomRecord {
    /// Element symbol, or the metal placeholder label in templates.
    pub symbol: String,
    /// Frozen/free marker carried through to the output file.
    pub frozen: FrozenFlag,
    /// Cartesian coordinates in Angstroms.
    pub position: Point3<f64>,
}

impl AtomRecord {
    /// Creates a free (unfrozen) atom record.
    pub fn new(symbol: &str, position: Point3<f64>) -> Self {
        Self {
            symbol: symbol.to_string(),
            frozen: FrozenFlag::default(),
            position,
        }
    }

    pub fn with_frozen(mut self, frozen: FrozenFlag) -> Self {
        self.frozen = frozen;
        self
    }
}

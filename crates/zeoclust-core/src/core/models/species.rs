use crate::core::error::ConfigurationError;
use itertools::iproduct;
use nalgebra::Point3;
use serde::Deserialize;
use std::fmt;
use std::ops::BitXor;

/// Number of unpaired electrons reduced modulo 2.
///
/// Only the even/odd character of a spin state is tracked; combining two
/// species adds their unpaired electrons, which for parities is an XOR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Parity {
    #[default]
    Even,
    Odd,
}

impl Parity {
    pub fn from_unpaired(unpaired: u32) -> Self {
        if unpaired % 2 == 0 {
            Parity::Even
        } else {
            Parity::Odd
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Parity::Even => 0,
            Parity::Odd => 1,
        }
    }

    /// Spin multiplicity of the lowest state with this parity (singlet or doublet).
    pub fn multiplicity(self) -> u32 {
        self.as_u8() as u32 + 1
    }
}

impl BitXor for Parity {
    type Output = Parity;

    fn bitxor(self, rhs: Self) -> Self::Output {
        if self == rhs {
            Parity::Even
        } else {
            Parity::Odd
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The physically accessible charges and unpaired-electron parities of a species.
///
/// Both sets keep the order in which states were first declared, with
/// duplicates removed. The first declared state is the one consumed when a
/// species is added to a combination by the pure enumerator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElectronicStates {
    charges: Vec<i32>,
    parities: Vec<Parity>,
}

impl ElectronicStates {
    /// Builds the state sets for `species`, reducing unpaired counts to parity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::EmptyStateSet`] if either sequence is empty.
    pub fn new<C, U>(species: &str, charges: C, unpaired: U) -> Result<Self, ConfigurationError>
    where
        C: IntoIterator<Item = i32>,
        U: IntoIterator<Item = u32>,
    {
        let mut charge_set = Vec::new();
        for charge in charges {
            if !charge_set.contains(&charge) {
                charge_set.push(charge);
            }
        }
        let mut parity_set = Vec::new();
        for parity in unpaired.into_iter().map(Parity::from_unpaired) {
            if !parity_set.contains(&parity) {
                parity_set.push(parity);
            }
        }

        if charge_set.is_empty() {
            return Err(ConfigurationError::EmptyStateSet {
                species: species.to_string(),
                field: "charges",
            });
        }
        if parity_set.is_empty() {
            return Err(ConfigurationError::EmptyStateSet {
                species: species.to_string(),
                field: "unpaired electrons",
            });
        }

        Ok(Self {
            charges: charge_set,
            parities: parity_set,
        })
    }

    pub fn charges(&self) -> &[i32] {
        &self.charges
    }

    pub fn parities(&self) -> &[Parity] {
        &self.parities
    }

    /// The first declared (charge, parity) pair.
    pub fn first(&self) -> (i32, Parity) {
        (self.charges[0], self.parities[0])
    }

    /// Every accessible (charge, parity) pair, charge-major.
    pub fn iter(&self) -> impl Iterator<Item = (i32, Parity)> + '_ {
        iproduct!(self.charges.iter().copied(), self.parities.iter().copied())
    }
}

/// A metal center with its accessible oxidation and spin states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metal {
    pub name: String,
    pub states: ElectronicStates,
}

impl Metal {
    pub fn new<C, U>(name: &str, charges: C, unpaired: U) -> Result<Self, ConfigurationError>
    where
        C: IntoIterator<Item = i32>,
        U: IntoIterator<Item = u32>,
    {
        Ok(Self {
            name: name.to_string(),
            states: ElectronicStates::new(name, charges, unpaired)?,
        })
    }
}

/// A coordinate as it may appear in hand-written or file-derived input.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum CoordinateInput {
    Number(f64),
    Text(String),
}

impl CoordinateInput {
    fn to_f64(&self, ligand: &str) -> Result<f64, ConfigurationError> {
        match self {
            CoordinateInput::Number(value) => Ok(*value),
            CoordinateInput::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| ConfigurationError::InvalidCoordinate {
                        ligand: ligand.to_string(),
                        value: text.clone(),
                    })
            }
        }
    }
}

impl From<f64> for CoordinateInput {
    fn from(value: f64) -> Self {
        CoordinateInput::Number(value)
    }
}

impl From<&str> for CoordinateInput {
    fn from(value: &str) -> Self {
        CoordinateInput::Text(value.to_string())
    }
}

/// An untyped ligand atom row: `[symbol, x, y, z]`.
pub type RawLigandAtom = (String, CoordinateInput, CoordinateInput, CoordinateInput);

/// One atom of a ligand's intrinsic geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct LigandAtom {
    pub symbol: String,
    pub position: Point3<f64>,
}

impl LigandAtom {
    pub fn new(symbol: &str, x: f64, y: f64, z: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            position: Point3::new(x, y, z),
        }
    }
}

/// A ligand species: accessible states plus an intrinsic geometry.
///
/// The geometry is expressed relative to the ligand's own frame and is placed
/// by rigid translation onto a template anchor. The head atom bonds to the
/// metal; the tail atom fixes an orientation reference for multi-atom ligands.
#[derive(Debug, Clone, PartialEq)]
pub struct Ligand {
    pub name: String,
    pub states: ElectronicStates,
    atoms: Vec<LigandAtom>,
    head_index: usize,
    tail_index: usize,
}

impl Ligand {
    /// Creates a ligand with the default anchors: head at atom 0, tail at
    /// atom 1 (or 0 for single-atom ligands).
    ///
    /// # Errors
    ///
    /// Fails if the state sets are empty or the atom list is empty.
    pub fn new<C, U>(
        name: &str,
        atoms: Vec<LigandAtom>,
        charges: C,
        unpaired: U,
    ) -> Result<Self, ConfigurationError>
    where
        C: IntoIterator<Item = i32>,
        U: IntoIterator<Item = u32>,
    {
        let states = ElectronicStates::new(name, charges, unpaired)?;
        if atoms.is_empty() {
            return Err(ConfigurationError::EmptyAtomList {
                ligand: name.to_string(),
            });
        }
        let tail_index = if atoms.len() > 1 { 1 } else { 0 };
        Ok(Self {
            name: name.to_string(),
            states,
            atoms,
            head_index: 0,
            tail_index,
        })
    }

    /// Creates a ligand from untyped atom rows, converting every coordinate to
    /// floating point whether it was given as a number or as text.
    pub fn from_raw_atoms<C, U>(
        name: &str,
        raw_atoms: &[RawLigandAtom],
        charges: C,
        unpaired: U,
    ) -> Result<Self, ConfigurationError>
    where
        C: IntoIterator<Item = i32>,
        U: IntoIterator<Item = u32>,
    {
        let atoms = raw_atoms
            .iter()
            .map(|(symbol, x, y, z)| {
                Ok(LigandAtom::new(
                    symbol,
                    x.to_f64(name)?,
                    y.to_f64(name)?,
                    z.to_f64(name)?,
                ))
            })
            .collect::<Result<Vec<_>, ConfigurationError>>()?;
        Self::new(name, atoms, charges, unpaired)
    }

    pub fn atoms(&self) -> &[LigandAtom] {
        &self.atoms
    }

    pub fn head_index(&self) -> usize {
        self.head_index
    }

    pub fn tail_index(&self) -> usize {
        self.tail_index
    }

    pub fn head(&self) -> &LigandAtom {
        &self.atoms[self.head_index]
    }

    pub fn tail(&self) -> &LigandAtom {
        &self.atoms[self.tail_index]
    }

    pub fn set_head(&mut self, index: usize) -> Result<(), ConfigurationError> {
        self.check_anchor(index)?;
        self.head_index = index;
        Ok(())
    }

    pub fn set_tail(&mut self, index: usize) -> Result<(), ConfigurationError> {
        self.check_anchor(index)?;
        self.tail_index = index;
        Ok(())
    }

    fn check_anchor(&self, index: usize) -> Result<(), ConfigurationError> {
        if index >= self.atoms.len() {
            return Err(ConfigurationError::AnchorOutOfRange {
                ligand: self.name.clone(),
                index,
                len: self.atoms.len(),
            });
        }
        Ok(())
    }
}

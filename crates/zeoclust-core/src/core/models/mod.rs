//! # Core Models Module
//!
//! Value types describing the chemistry being screened: the species catalog
//! entries (metals and ligands with their accessible electronic states), the
//! combinations assembled from them, and the fixed geometry inputs (scaffold
//! and binding-mode templates).
//!
//! - [`atom`] - Atom records shared by scaffolds, templates and conformers
//! - [`species`] - `Metal`, `Ligand`, `ElectronicStates` and `Parity`
//! - [`combination`] - Append-only metal + ligand multisets with canonical keys
//! - [`conformer`] - Generated metal + ligand coordinates for one combination/template pair
//! - [`scaffold`] - The rigid host structure
//! - [`template`] - Binding-mode templates with a metal placeholder and ligand anchors

pub mod atom;
pub mod combination;
pub mod conformer;
pub mod scaffold;
pub mod species;
pub mod template;

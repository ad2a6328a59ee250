//! Provides input/output functionality for structure files.
//!
//! Scaffolds and binding-mode templates are read from Gaussian-style job
//! files, and generated conformers are written back in the same format with
//! the scaffold's job settings. Format handling sits behind the
//! [`traits::StructureInput`] and [`traits::StructureWriter`] traits.

pub mod gaussian;
pub mod traits;

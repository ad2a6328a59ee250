//! # Core Module
//!
//! The stateless foundation of the library: the chemistry data model, the
//! species catalog, and structure-file I/O.
//!
//! - **Data Model** ([`models`]) - Species, electronic states, combinations, scaffolds,
//!   binding-mode templates and generated conformers
//! - **Species Catalog** ([`catalog`]) - TOML-backed metal and ligand catalogs plus
//!   built-in common ligands
//! - **File I/O** ([`io`]) - Gaussian-style job file reading and writing
//! - **Errors** ([`error`]) - Validation errors raised while building the data model

pub mod catalog;
pub mod error;
pub mod io;
pub mod models;
pub(crate) mod utils;

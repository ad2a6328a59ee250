//! # zeoclust
//!
//! Combinatorial generation of metal-ligand clusters on a rigid scaffold, for
//! setting up catalyst screening calculations.
//!
//! Given a scaffold, a set of binding-mode templates and a catalog of metals
//! and ligands with their accessible electronic states, the library
//! enumerates every charge- and parity-balanced combination, removes
//! duplicates that differ only in construction order, pairs each combination
//! with the templates that have room for its ligands, and places the atoms.
//!
//! - [`core`]: data models, the species catalog and structure-file I/O.
//! - [`engine`]: configuration, indexes, deduplication and the enumeration
//!   and building tasks.
//! - [`workflows`]: the end-to-end screening workflow.

pub mod core;
pub mod engine;
pub mod workflows;

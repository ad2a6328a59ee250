//! Species catalog: the metals and ligands offered to the enumerator.
//!
//! Catalogs are read from TOML files and may pull in ligands from a small
//! compile-time registry of common species (hydroxide, hydride, oxide).

pub mod builtin;
pub mod registry;

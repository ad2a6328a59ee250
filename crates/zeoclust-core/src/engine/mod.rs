//! # Engine Module
//!
//! The stateful part of a screening run: it turns a species catalog, a
//! counter-charge requirement and a set of binding-mode templates into
//! distinct combinations and their conformers.
//!
//! - **Configuration** ([`config`]) - Ligand mode, counter charges and result limits
//! - **Indexes** ([`index`]) - Templates by slot count and the counter-charge table
//! - **Deduplication** ([`dedup`]) - The seen-key accumulator and batch merging
//! - **Tasks** ([`tasks`]) - Pure and mixed enumeration, mode matching, conformer building
//! - **Progress Monitoring** ([`progress`]) - Progress events for front ends
//! - **Error Handling** ([`error`]) - Run-level and per-pairing errors

pub mod config;
pub mod context;
pub mod dedup;
pub mod error;
pub mod index;
pub mod progress;
pub mod stats;
pub mod tasks;

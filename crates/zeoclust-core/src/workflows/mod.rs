//! # Workflows Module
//!
//! High-level entry points that run a complete screening procedure.
//!
//! - **Screening Workflow** ([`screen`]) - Enumeration, template matching and
//!   conformer building for one scaffold

pub mod screen;

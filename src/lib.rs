#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

//! # plipcsv Library
//!
//! This library flattens batches of PLIP XML interaction reports into one
//! feature table: one row per ligand, one column per observed feature.
//! Features come in three families — renamed ligand properties, residue
//! property tallies over contacting binding-site residues, and typed
//! interaction counts per residue instance.
//!
//! The aggregate is rendered as a Polars DataFrame and written as CSV, with
//! missing features left as nulls rather than zero counts.

mod aggregate;
mod error;
mod report;
mod vocab;

// Re-export key public types
pub use aggregate::{aggregate, run, to_dataframe, FeatureTable};
pub use error::{Error, Result};
pub use report::{parse_report, LigandFeatures};
pub use vocab::{interaction_kind, property_name, residue_properties};

//! Provides input/output functionality for configuration file formats.
//!
//! The [`traits::MolecularFile`] trait defines a uniform read/write interface over
//! buffered streams and file paths; [`dlpoly`] implements it for DL_POLY `CONFIG` files.

pub mod dlpoly;
pub mod traits;

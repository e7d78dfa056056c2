//! # dlpconf
//!
//! Reading and writing of DL_POLY `CONFIG`/`REVCON` configuration files.
//!
//! A configuration file stores one snapshot of a simulation: the periodic cell (if any)
//! and, for every atom, its site label and position, optionally followed by its velocity
//! and the force acting on it. This crate parses such files into an [`AtomicStructure`]
//! and serializes structures back into the fixed-column layout DL_POLY expects.
//!
//! ## Layout
//!
//! - **[`core::elements`]** - The periodic-table symbol set used to recognize element symbols.
//! - **[`core::models`]** - The in-memory atomic structure and its computed-results side-channel.
//! - **[`core::io`]** - The [`MolecularFile`](core::io::traits::MolecularFile) interface and the
//!   DL_POLY reader/writer built on it.
//!
//! ## Example
//!
//! ```
//! use dlpconf::core::io::dlpoly::{read_config, write_config, LevelOfDetail};
//! use std::io::Cursor;
//!
//! let text = "water\n         0         0\nOW 1\n0.0 0.0 0.0\n";
//! let record = read_config(&mut Cursor::new(text)).unwrap();
//! let structure = record.into_structure().unwrap();
//! assert_eq!(structure.symbols(), ["O"]);
//!
//! let mut out = Vec::new();
//! write_config(&structure, LevelOfDetail::Positions, "water", &mut out).unwrap();
//! ```
//!
//! [`AtomicStructure`]: core::models::structure::AtomicStructure

pub mod core;

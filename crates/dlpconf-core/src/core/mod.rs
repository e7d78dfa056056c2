//! # Core Module
//!
//! The building blocks of the crate: a periodic-table lookup, a minimal atomic
//! structure container, and the file I/O layer that converts between the two and
//! DL_POLY configuration text.

pub mod elements;
pub mod io;
pub mod models;

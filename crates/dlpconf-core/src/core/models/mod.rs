//! Data models for atomic structures.
//!
//! [`structure::AtomicStructure`] holds what a configuration file describes: element
//! symbols, positions, the simulation cell and its periodicity, named per-atom arrays,
//! velocities, and a [`results::SinglePointResults`] side-channel for computed forces.

pub mod results;
pub mod structure;

use super::results::SinglePointResults;
use nalgebra::{Matrix3, Point3, Vector3};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StructureError {
    #[error("Length mismatch for '{field}': expected {expected} entries, found {found}")]
    LengthMismatch {
        field: String,
        expected: usize,
        found: usize,
    },
}

/// An ordered collection of atoms in an (optionally periodic) simulation cell.
///
/// All per-atom data is stored as parallel arrays aligned by atom index. Every array
/// attached after construction is checked against the atom count, so the alignment
/// invariant holds for the lifetime of the structure.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AtomicStructure {
    /// Element symbol of each atom.
    symbols: Vec<String>,
    /// Cartesian position of each atom.
    positions: Vec<Point3<f64>>,
    /// Lattice vectors, one per row. All zeros for a non-periodic structure.
    cell: Matrix3<f64>,
    /// Periodicity along each of the three lattice vectors.
    pbc: [bool; 3],
    /// Named auxiliary per-atom string arrays (e.g. site labels under `"names"`).
    arrays: BTreeMap<String, Vec<String>>,
    /// Per-atom velocities, if stored.
    velocities: Option<Vec<Vector3<f64>>>,
    /// Computed quantities attached to this configuration.
    results: Option<SinglePointResults>,
}

impl AtomicStructure {
    /// Builds a structure from parallel symbol and position arrays.
    ///
    /// # Arguments
    ///
    /// * `symbols` - The element symbol of each atom.
    /// * `positions` - The Cartesian position of each atom.
    /// * `cell` - The lattice vectors, one per row.
    /// * `pbc` - Periodicity along each lattice vector.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::LengthMismatch`] if `positions` and `symbols` differ in length.
    pub fn new(
        symbols: Vec<String>,
        positions: Vec<Point3<f64>>,
        cell: Matrix3<f64>,
        pbc: [bool; 3],
    ) -> Result<Self, StructureError> {
        check_len("positions", symbols.len(), positions.len())?;
        Ok(Self {
            symbols,
            positions,
            cell,
            pbc,
            ..Default::default()
        })
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    pub fn positions(&self) -> &[Point3<f64>] {
        &self.positions
    }

    pub fn cell(&self) -> &Matrix3<f64> {
        &self.cell
    }

    pub fn pbc(&self) -> [bool; 3] {
        self.pbc
    }

    /// Returns `true` if the structure is periodic along all three lattice vectors.
    pub fn is_fully_periodic(&self) -> bool {
        self.pbc.iter().all(|&p| p)
    }

    /// Returns `true` if all three periodicity flags agree.
    pub fn has_uniform_periodicity(&self) -> bool {
        self.pbc.iter().all(|&p| p == self.pbc[0])
    }

    /// Attaches (or replaces) a named per-atom string array.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::LengthMismatch`] if `values` is not one entry per atom.
    pub fn set_array(
        &mut self,
        name: impl Into<String>,
        values: Vec<String>,
    ) -> Result<(), StructureError> {
        let name = name.into();
        check_len(&name, self.len(), values.len())?;
        self.arrays.insert(name, values);
        Ok(())
    }

    pub fn array(&self, name: &str) -> Option<&[String]> {
        self.arrays.get(name).map(Vec::as_slice)
    }

    /// Stores per-atom velocities.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::LengthMismatch`] if `velocities` is not one entry per atom.
    pub fn set_velocities(&mut self, velocities: Vec<Vector3<f64>>) -> Result<(), StructureError> {
        check_len("velocities", self.len(), velocities.len())?;
        self.velocities = Some(velocities);
        Ok(())
    }

    pub fn velocities(&self) -> Option<&[Vector3<f64>]> {
        self.velocities.as_deref()
    }

    /// Attaches computed results, replacing any previously attached.
    ///
    /// # Errors
    ///
    /// Returns [`StructureError::LengthMismatch`] if the results carry forces that are
    /// not one entry per atom.
    pub fn attach_results(&mut self, results: SinglePointResults) -> Result<(), StructureError> {
        if let Some(forces) = &results.forces {
            check_len("forces", self.len(), forces.len())?;
        }
        self.results = Some(results);
        Ok(())
    }

    pub fn results(&self) -> Option<&SinglePointResults> {
        self.results.as_ref()
    }

    /// Per-atom forces from the attached results, if any were computed.
    pub fn forces(&self) -> Option<&[Vector3<f64>]> {
        self.results.as_ref()?.forces.as_deref()
    }
}

fn check_len(field: &str, expected: usize, found: usize) -> Result<(), StructureError> {
    if expected == found {
        Ok(())
    } else {
        Err(StructureError::LengthMismatch {
            field: field.to_string(),
            expected,
            found,
        })
    }
}

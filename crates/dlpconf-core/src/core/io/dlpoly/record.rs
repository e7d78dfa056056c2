use super::error::{DlpConfigError, FieldErrorKind};
use crate::core::models::results::SinglePointResults;
use crate::core::models::structure::AtomicStructure;
use nalgebra::{Matrix3, Point3, Vector3};
use serde::Deserialize;
use std::fmt;

/// Name of the per-atom array that carries the original site labels.
pub const LABELS_ARRAY: &str = "names";

/// How much per-atom data a configuration carries (`levcfg`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Deserialize)]
#[serde(try_from = "i64")]
pub enum LevelOfDetail {
    /// Positions only.
    #[default]
    Positions = 0,
    /// Positions and velocities.
    Velocities = 1,
    /// Positions, velocities and forces.
    Forces = 2,
}

impl LevelOfDetail {
    /// The integer flag written to the header line.
    pub fn as_flag(self) -> i64 {
        self as i64
    }

    pub fn includes_velocities(self) -> bool {
        self >= LevelOfDetail::Velocities
    }

    pub fn includes_forces(self) -> bool {
        self >= LevelOfDetail::Forces
    }
}

impl TryFrom<i64> for LevelOfDetail {
    type Error = FieldErrorKind;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(LevelOfDetail::Positions),
            1 => Ok(LevelOfDetail::Velocities),
            2 => Ok(LevelOfDetail::Forces),
            _ => Err(FieldErrorKind::UnsupportedLevel { value }),
        }
    }
}

impl fmt::Display for LevelOfDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            LevelOfDetail::Positions => "positions",
            LevelOfDetail::Velocities => "positions + velocities",
            LevelOfDetail::Forces => "positions + velocities + forces",
        };
        write!(f, "{} ({})", self.as_flag(), description)
    }
}

/// The optional per-atom blocks of a configuration, shaped by its level of detail.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordDetail {
    PositionsOnly,
    WithVelocities {
        velocities: Vec<Vector3<f64>>,
    },
    WithVelocitiesAndForces {
        velocities: Vec<Vector3<f64>>,
        forces: Vec<Vector3<f64>>,
    },
}

impl RecordDetail {
    pub fn level(&self) -> LevelOfDetail {
        match self {
            RecordDetail::PositionsOnly => LevelOfDetail::Positions,
            RecordDetail::WithVelocities { .. } => LevelOfDetail::Velocities,
            RecordDetail::WithVelocitiesAndForces { .. } => LevelOfDetail::Forces,
        }
    }

    pub fn velocities(&self) -> Option<&[Vector3<f64>]> {
        match self {
            RecordDetail::PositionsOnly => None,
            RecordDetail::WithVelocities { velocities }
            | RecordDetail::WithVelocitiesAndForces { velocities, .. } => Some(velocities),
        }
    }

    pub fn forces(&self) -> Option<&[Vector3<f64>]> {
        match self {
            RecordDetail::WithVelocitiesAndForces { forces, .. } => Some(forces),
            _ => None,
        }
    }
}

/// One parsed configuration file.
///
/// `labels`, `symbols`, `positions` and the arrays inside `detail` are aligned by atom
/// index and always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRecord {
    /// The title line, with trailing whitespace removed.
    pub title: String,
    /// The periodic boundary key (`imcon`). Positive means periodic.
    pub image_convention: i64,
    /// Atom count declared in the header, when present.
    pub declared_atom_count: Option<usize>,
    /// Site labels exactly as they appear in the file.
    pub labels: Vec<String>,
    /// Element symbols resolved from `labels`.
    pub symbols: Vec<String>,
    pub positions: Vec<Point3<f64>>,
    /// Lattice vectors, one per row. Zero-filled when not periodic.
    pub cell: Matrix3<f64>,
    pub detail: RecordDetail,
}

impl ConfigRecord {
    pub fn is_periodic(&self) -> bool {
        self.image_convention > 0
    }

    pub fn level_of_detail(&self) -> LevelOfDetail {
        self.detail.level()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Converts the record into an [`AtomicStructure`].
    ///
    /// Site labels are attached as the [`LABELS_ARRAY`] array, velocities as stored
    /// velocities, and forces through a [`SinglePointResults`] side-channel.
    ///
    /// # Errors
    ///
    /// Returns [`DlpConfigError::Structure`] if the per-atom arrays are misaligned,
    /// which cannot happen for records produced by the reader.
    pub fn into_structure(self) -> Result<AtomicStructure, DlpConfigError> {
        let pbc = [self.is_periodic(); 3];
        let mut structure = AtomicStructure::new(self.symbols, self.positions, self.cell, pbc)?;
        structure.set_array(LABELS_ARRAY, self.labels)?;

        match self.detail {
            RecordDetail::PositionsOnly => {}
            RecordDetail::WithVelocities { velocities } => {
                structure.set_velocities(velocities)?;
            }
            RecordDetail::WithVelocitiesAndForces { velocities, forces } => {
                structure.set_velocities(velocities)?;
                structure.attach_results(SinglePointResults::with_forces(forces))?;
            }
        }
        Ok(structure)
    }
}

use nalgebra::Vector3;

/// Quantities computed for a single configuration, attached to a structure after the fact.
///
/// Forces read from a configuration file live here rather than on the structure itself,
/// so that a structure's stored state stays limited to what defines it (species,
/// positions, cell and velocities).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SinglePointResults {
    /// Total potential energy of the configuration, if known.
    pub energy: Option<f64>,
    /// Per-atom forces, aligned by atom index with the owning structure.
    pub forces: Option<Vec<Vector3<f64>>>,
}

impl SinglePointResults {
    /// Creates results carrying only per-atom forces.
    pub fn with_forces(forces: Vec<Vector3<f64>>) -> Self {
        Self {
            energy: None,
            forces: Some(forces),
        }
    }
}

use super::error::DlpConfigError;
use super::format::{INDEX_WIDTH, INT_WIDTH, SYMBOL_WIDTH, format_title, write_triplet};
use super::record::LevelOfDetail;
use crate::core::models::structure::AtomicStructure;
use nalgebra::Vector3;
use std::io::Write;
use tracing::{debug, warn};

/// Image convention written for periodic structures (general parallelepiped cell).
pub const PERIODIC_IMAGE_CONVENTION: i64 = 3;

/// Writes `structure` as a DL_POLY configuration.
///
/// Velocity and force lines are emitted according to `level`; when the structure has no
/// velocities or forces, rows of zeros are written in their place. A structure that is
/// periodic along only some axes is written as non-periodic.
///
/// # Errors
///
/// Returns [`DlpConfigError::Io`] if writing fails.
pub fn write_config(
    structure: &AtomicStructure,
    level: LevelOfDetail,
    title: &str,
    writer: &mut impl Write,
) -> Result<(), DlpConfigError> {
    let image_convention = if structure.is_fully_periodic() {
        PERIODIC_IMAGE_CONVENTION
    } else {
        if !structure.has_uniform_periodicity() {
            warn!(
                "Periodicity {:?} cannot be expressed in CONFIG; writing as non-periodic.",
                structure.pbc()
            );
        }
        0
    };
    debug!(
        "Writing CONFIG: {} atoms, levcfg = {}, imcon = {}",
        structure.len(),
        level.as_flag(),
        image_convention
    );

    writeln!(writer, "{}", format_title(title))?;
    writeln!(
        writer,
        "{:>w$}{:>w$}{:>w$}",
        level.as_flag(),
        image_convention,
        structure.len(),
        w = INT_WIDTH
    )?;

    if image_convention > 0 {
        let cell = structure.cell();
        for row in cell.row_iter() {
            write_triplet(writer, [row[0], row[1], row[2]])?;
        }
    }

    let velocities = level
        .includes_velocities()
        .then(|| structure.velocities())
        .flatten();
    let forces = level
        .includes_forces()
        .then(|| structure.forces())
        .flatten();

    for (i, (symbol, position)) in structure
        .symbols()
        .iter()
        .zip(structure.positions())
        .enumerate()
    {
        writeln!(
            writer,
            "{:<sw$}{:>iw$}",
            symbol,
            i + 1,
            sw = SYMBOL_WIDTH,
            iw = INDEX_WIDTH
        )?;
        write_triplet(writer, [position.x, position.y, position.z])?;
        if level.includes_velocities() {
            write_triplet(writer, components(velocities, i))?;
        }
        if level.includes_forces() {
            write_triplet(writer, components(forces, i))?;
        }
    }
    Ok(())
}

fn components(vectors: Option<&[Vector3<f64>]>, index: usize) -> [f64; 3] {
    vectors
        .and_then(|v| v.get(index))
        .map_or([0.0; 3], |v| [v.x, v.y, v.z])
}

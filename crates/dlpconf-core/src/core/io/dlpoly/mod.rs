//! DL_POLY `CONFIG`/`REVCON` configuration files.
//!
//! ## Layout
//!
//! ```text
//! title                                    (free text, 72 columns)
//! levcfg imcon [natoms]                    (integers, 10 columns each)
//! cell row 1                               (only if imcon > 0)
//! cell row 2
//! cell row 3
//! label index                              (repeated per atom)
//! x y z
//! vx vy vz                                 (only if levcfg > 0)
//! fx fy fz                                 (only if levcfg > 1)
//! ```
//!
//! Reals are written in 20-column fields with 10 decimals. On read, labels are mapped to
//! element symbols with [`resolve_symbol`]; labels that name no element become `X`.

mod error;
mod format;
mod options;
mod reader;
mod record;
mod symbols;
mod writer;

pub use error::{DlpConfigError, FieldErrorKind, RecordField};
pub use options::{DEFAULT_TITLE, OptionsLoadError, WriteOptions};
pub use reader::read_config;
pub use record::{ConfigRecord, LABELS_ARRAY, LevelOfDetail, RecordDetail};
pub use symbols::resolve_symbol;
pub use writer::{PERIODIC_IMAGE_CONVENTION, write_config};

use super::traits::MolecularFile;
use crate::core::models::structure::AtomicStructure;
use std::io::{BufRead, Write};

/// Header information of a configuration file that is not part of the structure.
#[derive(Debug, Clone, PartialEq)]
pub struct DlpConfigMetadata {
    pub title: String,
    pub level_of_detail: LevelOfDetail,
    /// The `imcon` key as read. Ignored on write, where it follows the structure's periodicity.
    pub image_convention: i64,
    pub declared_atom_count: Option<usize>,
}

impl Default for DlpConfigMetadata {
    fn default() -> Self {
        WriteOptions::default().into()
    }
}

impl From<WriteOptions> for DlpConfigMetadata {
    fn from(options: WriteOptions) -> Self {
        Self {
            title: options.title,
            level_of_detail: options.level_of_detail,
            image_convention: 0,
            declared_atom_count: None,
        }
    }
}

impl DlpConfigMetadata {
    pub fn write_options(&self) -> WriteOptions {
        WriteOptions {
            title: self.title.clone(),
            level_of_detail: self.level_of_detail,
        }
    }
}

pub struct DlpConfigFile;

impl MolecularFile for DlpConfigFile {
    type Metadata = DlpConfigMetadata;
    type Error = DlpConfigError;

    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(AtomicStructure, Self::Metadata), Self::Error> {
        let record = read_config(reader)?;
        let metadata = DlpConfigMetadata {
            title: record.title.clone(),
            level_of_detail: record.level_of_detail(),
            image_convention: record.image_convention,
            declared_atom_count: record.declared_atom_count,
        };
        Ok((record.into_structure()?, metadata))
    }

    fn write_to(
        structure: &AtomicStructure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        write_config(structure, metadata.level_of_detail, &metadata.title, writer)
    }

    fn write_structure_to(
        structure: &AtomicStructure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error> {
        Self::write_to(structure, &DlpConfigMetadata::default(), writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::results::SinglePointResults;
    use nalgebra::{Matrix3, Point3, Vector3};
    use std::io::Cursor;

    const TOLERANCE: f64 = 1e-10;

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= TOLERANCE
    }

    fn vectors_approx_eq(a: &[Vector3<f64>], b: &[Vector3<f64>]) -> bool {
        a.len() == b.len()
            && a.iter()
                .zip(b)
                .all(|(u, v)| (0..3).all(|k| approx_eq(u[k], v[k])))
    }

    fn triclinic_cell() -> Matrix3<f64> {
        Matrix3::new(
            12.345678901, 0.0, 0.0, //
            -3.2, 11.5, 0.0, //
            1.25, -0.75, 9.8765432109,
        )
    }

    fn sample_structure() -> AtomicStructure {
        let mut s = AtomicStructure::new(
            vec!["O".into(), "H".into(), "H".into(), "Na".into()],
            vec![
                Point3::new(0.1234567891, -1.5, 2.0),
                Point3::new(0.9572, 0.0, 0.0),
                Point3::new(-0.239987, 0.926627, 0.0),
                Point3::new(5.5, 5.5, -5.5),
            ],
            triclinic_cell(),
            [true; 3],
        )
        .unwrap();
        s.set_velocities(vec![
            Vector3::new(0.01, -0.02, 0.03),
            Vector3::new(1.5, 2.5, -3.5),
            Vector3::zeros(),
            Vector3::new(-0.0000000001, 0.0, 7.25),
        ])
        .unwrap();
        s.attach_results(SinglePointResults::with_forces(vec![
            Vector3::new(-10.0, 0.0, 3.3),
            Vector3::new(0.0, 1e-3, 0.0),
            Vector3::new(123.456, -654.321, 0.5),
            Vector3::zeros(),
        ]))
        .unwrap();
        s
    }

    fn round_trip(structure: &AtomicStructure, level: LevelOfDetail) -> AtomicStructure {
        let mut out = Vec::new();
        write_config(structure, level, DEFAULT_TITLE, &mut out).unwrap();
        read_config(&mut Cursor::new(out))
            .unwrap()
            .into_structure()
            .unwrap()
    }

    #[test]
    fn round_trip_preserves_structure_at_every_level() {
        let original = sample_structure();
        for level in [
            LevelOfDetail::Positions,
            LevelOfDetail::Velocities,
            LevelOfDetail::Forces,
        ] {
            let read = round_trip(&original, level);

            assert_eq!(read.symbols(), original.symbols());
            assert_eq!(read.pbc(), [true; 3]);
            for (a, b) in read.positions().iter().zip(original.positions()) {
                assert!((a - b).iter().all(|d| d.abs() <= TOLERANCE));
            }
            for (a, b) in read.cell().iter().zip(original.cell().iter()) {
                assert!(approx_eq(*a, *b), "cell {a} != {b}");
            }

            match read.velocities() {
                Some(v) => {
                    assert!(level.includes_velocities());
                    assert!(vectors_approx_eq(v, original.velocities().unwrap()));
                }
                None => assert!(!level.includes_velocities()),
            }
            match read.forces() {
                Some(f) => {
                    assert!(level.includes_forces());
                    assert!(vectors_approx_eq(f, original.forces().unwrap()));
                }
                None => assert!(!level.includes_forces()),
            }
        }
    }

    #[test]
    fn large_magnitudes_survive_a_round_trip() {
        let mut original = AtomicStructure::new(
            vec!["C".into()],
            vec![Point3::new(1.0, -123456789.0, 0.0)],
            Matrix3::from_diagonal_element(1.0e9),
            [true; 3],
        )
        .unwrap();
        original
            .set_velocities(vec![Vector3::new(-1.0e12, 0.0, 5.0e8)])
            .unwrap();
        original
            .attach_results(SinglePointResults::with_forces(vec![Vector3::new(
                0.0, 2.5e10, -9.99e8,
            )]))
            .unwrap();

        let read = round_trip(&original, LevelOfDetail::Forces);
        assert_eq!(read.positions(), original.positions());
        assert_eq!(read.cell(), original.cell());
        assert_eq!(read.velocities(), original.velocities());
        assert_eq!(read.forces(), original.forces());
    }

    #[test]
    fn non_periodic_round_trip_yields_zero_cell() {
        let base = sample_structure();
        let original = AtomicStructure::new(
            base.symbols().to_vec(),
            base.positions().to_vec(),
            Matrix3::from_diagonal_element(30.0),
            [false; 3],
        )
        .unwrap();

        let mut out = Vec::new();
        write_config(&original, LevelOfDetail::Positions, "gas", &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().nth(1), Some("         0         0         4"));
        assert!(text.lines().nth(2).unwrap().starts_with("O "));

        let read = round_trip(&original, LevelOfDetail::Positions);
        assert_eq!(read.pbc(), [false; 3]);
        assert_eq!(*read.cell(), Matrix3::zeros());
        assert_eq!(read.len(), 4);
    }

    #[test]
    fn mixed_periodicity_degrades_to_non_periodic() {
        let original = sample_structure();
        let partial = AtomicStructure::new(
            original.symbols().to_vec(),
            original.positions().to_vec(),
            *original.cell(),
            [true, false, true],
        )
        .unwrap();

        let mut out = Vec::new();
        write_config(&partial, LevelOfDetail::Positions, "slab", &mut out).unwrap();
        let record = read_config(&mut Cursor::new(out)).unwrap();
        assert_eq!(record.image_convention, 0);
        assert!(!record.is_periodic());
        assert_eq!(record.cell, Matrix3::zeros());
        assert_eq!(record.len(), 4);
    }

    #[test]
    fn upgrading_level_reads_back_zero_dynamics() {
        let original = AtomicStructure::new(
            vec!["C".into()],
            vec![Point3::new(1.0, 2.0, 3.0)],
            Matrix3::zeros(),
            [false; 3],
        )
        .unwrap();
        let read = round_trip(&original, LevelOfDetail::Forces);
        assert_eq!(read.velocities().unwrap(), [Vector3::zeros()]);
        assert_eq!(read.forces().unwrap(), [Vector3::zeros()]);
    }

    #[test]
    fn malformed_cell_row_yields_no_structure() {
        let text = "bad\n0 3\n10 0 0\n0 10\n0 0 10\nC 1\n0 0 0\n";
        let result = DlpConfigFile::read_from(&mut Cursor::new(text));
        assert!(matches!(result, Err(DlpConfigError::Cell { row: 2, .. })));
    }

    #[test]
    fn empty_atom_section_reads_as_empty_structure() {
        let (structure, metadata) =
            DlpConfigFile::read_from(&mut Cursor::new("empty\n0 0\n\n")).unwrap();
        assert!(structure.is_empty());
        assert_eq!(structure.pbc(), [false; 3]);
        assert_eq!(metadata.title, "empty");
        assert_eq!(metadata.level_of_detail, LevelOfDetail::Positions);
    }

    #[test]
    fn read_from_returns_header_metadata_and_labels() {
        let text = "box of argon\n1 2 1\n10 0 0\n0 10 0\n0 0 10\nAr1 1\n1 1 1\n0 0 0\n";
        let (structure, metadata) = DlpConfigFile::read_from(&mut Cursor::new(text)).unwrap();
        assert_eq!(
            metadata,
            DlpConfigMetadata {
                title: "box of argon".into(),
                level_of_detail: LevelOfDetail::Velocities,
                image_convention: 2,
                declared_atom_count: Some(1),
            }
        );
        assert_eq!(structure.array(LABELS_ARRAY).unwrap(), ["Ar1"]);
        assert_eq!(structure.symbols(), ["Ar"]);
    }

    #[test]
    fn write_to_then_read_from_preserves_title_and_level() {
        let original = sample_structure();
        let metadata = DlpConfigMetadata {
            title: "solvated ion".into(),
            level_of_detail: LevelOfDetail::Velocities,
            ..Default::default()
        };
        let mut out = Vec::new();
        DlpConfigFile::write_to(&original, &metadata, &mut out).unwrap();

        let (read, read_metadata) = DlpConfigFile::read_from(&mut Cursor::new(out)).unwrap();
        assert_eq!(read_metadata.title, "solvated ion");
        assert_eq!(read_metadata.level_of_detail, LevelOfDetail::Velocities);
        assert_eq!(read_metadata.image_convention, PERIODIC_IMAGE_CONVENTION);
        assert_eq!(read_metadata.declared_atom_count, Some(4));
        assert!(read.velocities().is_some());
        assert!(read.forces().is_none());
    }

    #[test]
    fn write_structure_to_uses_default_title_and_positions_only() {
        let mut out = Vec::new();
        DlpConfigFile::write_structure_to(&sample_structure(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with(DEFAULT_TITLE));
        assert_eq!(text.lines().nth(1), Some("         0         3         4"));
        assert_eq!(text.lines().count(), 2 + 3 + 4 * 2);
    }

    #[test]
    fn path_helpers_round_trip_through_a_file() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("CONFIG");
        let metadata = DlpConfigMetadata {
            level_of_detail: LevelOfDetail::Forces,
            ..Default::default()
        };

        DlpConfigFile::write_to_path(&sample_structure(), &metadata, &path).unwrap();
        let (read, read_metadata) = DlpConfigFile::read_from_path(&path).unwrap();
        assert_eq!(read.len(), 4);
        assert_eq!(read_metadata.level_of_detail, LevelOfDetail::Forces);
        assert_eq!(read_metadata.title, DEFAULT_TITLE);
    }

    #[test]
    fn read_from_path_reports_missing_file_as_io_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let result = DlpConfigFile::read_from_path(dir.path().join("REVCON"));
        assert!(matches!(result, Err(DlpConfigError::Io(_))));
    }
}

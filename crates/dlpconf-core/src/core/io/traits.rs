use crate::core::models::structure::AtomicStructure;
use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Common interface for structure file formats.
///
/// Implementors provide stream-based parsing and serialization; the path-based helpers
/// are derived from those and take care of opening and buffering files.
pub trait MolecularFile {
    /// Format-specific information that is not part of the structure itself
    /// (titles, header flags, original site labels, ...).
    type Metadata;

    /// The error type for parsing and serialization.
    type Error: Error + From<io::Error>;

    /// Reads one structure and its metadata from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is malformed or the reader fails.
    fn read_from(
        reader: &mut impl BufRead,
    ) -> Result<(AtomicStructure, Self::Metadata), Self::Error>;

    /// Writes a structure using the settings carried in `metadata`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(
        structure: &AtomicStructure,
        metadata: &Self::Metadata,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Writes a structure with the format's default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_structure_to(
        structure: &AtomicStructure,
        writer: &mut impl Write,
    ) -> Result<(), Self::Error>;

    /// Opens `path` and reads one structure from it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or its content is malformed.
    fn read_from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<(AtomicStructure, Self::Metadata), Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }

    /// Creates (or truncates) `path` and writes the structure to it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(
        structure: &AtomicStructure,
        metadata: &Self::Metadata,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(structure, metadata, &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    /// Creates (or truncates) `path` and writes the structure with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_structure_to_path<P: AsRef<Path>>(
        structure: &AtomicStructure,
        path: P,
    ) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_structure_to(structure, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}

use super::error::{DlpConfigError, FieldErrorKind, RecordField};
use super::format::{parse_int, parse_triplet};
use super::record::{ConfigRecord, LevelOfDetail, RecordDetail};
use super::symbols::resolve_symbol;
use nalgebra::{Matrix3, Point3, Vector3};
use std::io::{self, BufRead};
use tracing::{debug, trace, warn};

/// Line-by-line view of a stream that remembers how many lines it has handed out.
struct LineCursor<'a, R> {
    reader: &'a mut R,
    line: usize,
}

impl<'a, R: BufRead> LineCursor<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self { reader, line: 0 }
    }

    /// Returns the next line without its terminator, or `None` at end of stream.
    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.reader.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        self.line += 1;
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }

    /// Whether the data already buffered past the current line holds anything but
    /// whitespace. Nothing is consumed.
    fn has_buffered_content(&mut self) -> io::Result<bool> {
        Ok(self
            .reader
            .fill_buf()?
            .iter()
            .any(|b| !b.is_ascii_whitespace()))
    }

    /// Number of the line the next call to `next_line` would return.
    fn upcoming(&self) -> usize {
        self.line + 1
    }
}

struct Header {
    level: LevelOfDetail,
    image_convention: i64,
    declared_atom_count: Option<usize>,
}

/// Parses one DL_POLY configuration from `reader`.
///
/// The stream must be positioned at the title line. Atom records are read until a
/// blank line or the end of the stream; one further line after the atom section is
/// consumed and ignored.
///
/// # Errors
///
/// Returns a [`DlpConfigError`] describing the first malformed or missing line. No
/// partial record is produced.
pub fn read_config(reader: &mut impl BufRead) -> Result<ConfigRecord, DlpConfigError> {
    let mut lines = LineCursor::new(reader);

    let title = lines
        .next_line()?
        .ok_or(DlpConfigError::UnexpectedEof {
            line: 1,
            context: "title line",
        })?
        .trim_end()
        .to_string();

    let header = read_header(&mut lines)?;
    debug!(
        "CONFIG header: levcfg = {}, imcon = {}, declared atoms = {:?}",
        header.level.as_flag(),
        header.image_convention,
        header.declared_atom_count
    );

    let cell = if header.image_convention > 0 {
        read_cell(&mut lines)?
    } else {
        Matrix3::zeros()
    };

    let mut labels = Vec::new();
    let mut symbols = Vec::new();
    let mut positions = Vec::new();
    let mut velocities = Vec::new();
    let mut forces = Vec::new();

    while let Some(label_line) = lines.next_line()? {
        let Some(label) = label_line.split_whitespace().next() else {
            break;
        };
        let atom = labels.len() + 1;
        let symbol = resolve_symbol(label);
        trace!("Atom {} on line {}: label '{}' -> '{}'", atom, lines.line, label, symbol);

        let [x, y, z] = read_vector(&mut lines, atom, RecordField::Position)?;
        positions.push(Point3::new(x, y, z));
        if header.level.includes_velocities() {
            velocities.push(Vector3::from(read_vector(
                &mut lines,
                atom,
                RecordField::Velocity,
            )?));
        }
        if header.level.includes_forces() {
            forces.push(Vector3::from(read_vector(
                &mut lines,
                atom,
                RecordField::Force,
            )?));
        }

        labels.push(label.to_string());
        symbols.push(symbol.to_string());
    }

    // Trailing footer line; its content carries no data.
    lines.next_line()?;
    if lines.has_buffered_content()? {
        warn!(
            "Ignoring content after line {}; only the first {} atom records were read.",
            lines.line,
            labels.len()
        );
    }

    if let Some(declared) = header.declared_atom_count {
        if declared != labels.len() {
            warn!(
                "CONFIG header declares {} atoms but {} atom records were read.",
                declared,
                labels.len()
            );
        }
    }
    debug!("Read {} atom records from CONFIG.", labels.len());

    let detail = match header.level {
        LevelOfDetail::Positions => RecordDetail::PositionsOnly,
        LevelOfDetail::Velocities => RecordDetail::WithVelocities { velocities },
        LevelOfDetail::Forces => RecordDetail::WithVelocitiesAndForces { velocities, forces },
    };

    Ok(ConfigRecord {
        title,
        image_convention: header.image_convention,
        declared_atom_count: header.declared_atom_count,
        labels,
        symbols,
        positions,
        cell,
        detail,
    })
}

fn read_header<R: BufRead>(lines: &mut LineCursor<'_, R>) -> Result<Header, DlpConfigError> {
    let line_num = lines.upcoming();
    let header_err = |kind| DlpConfigError::Header {
        line: line_num,
        kind,
    };

    let line = lines
        .next_line()?
        .ok_or_else(|| header_err(FieldErrorKind::MissingLine))?;
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() < 2 {
        return Err(header_err(FieldErrorKind::TooFewTokens {
            expected: 2,
            found: tokens.len(),
        }));
    }

    let level = parse_int(tokens[0])
        .and_then(LevelOfDetail::try_from)
        .map_err(header_err)?;
    let image_convention = parse_int(tokens[1]).map_err(header_err)?;
    let declared_atom_count = tokens.get(2).and_then(|t| t.parse::<usize>().ok());

    Ok(Header {
        level,
        image_convention,
        declared_atom_count,
    })
}

fn read_cell<R: BufRead>(lines: &mut LineCursor<'_, R>) -> Result<Matrix3<f64>, DlpConfigError> {
    let mut rows = [[0.0; 3]; 3];
    for (i, row) in rows.iter_mut().enumerate() {
        let line_num = lines.upcoming();
        let cell_err = |kind| DlpConfigError::Cell {
            row: i + 1,
            line: line_num,
            kind,
        };
        let line = lines
            .next_line()?
            .ok_or_else(|| cell_err(FieldErrorKind::MissingLine))?;
        *row = parse_triplet(&line).map_err(cell_err)?;
    }
    debug!("CONFIG cell rows: {:?}", rows);
    Ok(Matrix3::from_fn(|i, j| rows[i][j]))
}

fn read_vector<R: BufRead>(
    lines: &mut LineCursor<'_, R>,
    atom: usize,
    field: RecordField,
) -> Result<[f64; 3], DlpConfigError> {
    let line_num = lines.upcoming();
    let record_err = |kind| DlpConfigError::AtomRecord {
        atom,
        field,
        line: line_num,
        kind,
    };
    let line = lines
        .next_line()?
        .ok_or_else(|| record_err(FieldErrorKind::MissingLine))?;
    parse_triplet(&line).map_err(record_err)
}

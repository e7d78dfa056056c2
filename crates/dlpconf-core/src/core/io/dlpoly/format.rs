use super::error::FieldErrorKind;
use std::io::{self, Write};

pub const TITLE_WIDTH: usize = 72;
pub const INT_WIDTH: usize = 10;
pub const SYMBOL_WIDTH: usize = 8;
pub const INDEX_WIDTH: usize = 10;
pub const REAL_WIDTH: usize = 20;
pub const REAL_PRECISION: usize = 10;

pub fn parse_int(token: &str) -> Result<i64, FieldErrorKind> {
    token.parse().map_err(|_| FieldErrorKind::InvalidInteger {
        value: token.to_string(),
    })
}

/// Parses a real number, also accepting the Fortran `D` exponent marker (`1.5D-03`).
pub fn parse_real(token: &str) -> Result<f64, FieldErrorKind> {
    token
        .parse::<f64>()
        .or_else(|_| token.replace(['D', 'd'], "E").parse::<f64>())
        .map_err(|_| FieldErrorKind::InvalidFloat {
            value: token.to_string(),
        })
}

/// Parses the first three whitespace-separated reals of a line. Extra tokens are ignored.
pub fn parse_triplet(line: &str) -> Result<[f64; 3], FieldErrorKind> {
    let tokens: Vec<&str> = line.split_whitespace().take(3).collect();
    if tokens.len() < 3 {
        return Err(FieldErrorKind::TooFewTokens {
            expected: 3,
            found: tokens.len(),
        });
    }
    Ok([
        parse_real(tokens[0])?,
        parse_real(tokens[1])?,
        parse_real(tokens[2])?,
    ])
}

/// Fits a title into exactly [`TITLE_WIDTH`] columns on a single line.
pub fn format_title(title: &str) -> String {
    let single_line: String = title
        .chars()
        .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
        .take(TITLE_WIDTH)
        .collect();
    format!("{:<width$}", single_line, width = TITLE_WIDTH)
}

/// Writes three reals in [`REAL_WIDTH`] columns each.
///
/// A value that fills or overflows its field gets a leading space so that it never
/// merges with the previous token.
pub fn write_triplet(writer: &mut impl Write, values: [f64; 3]) -> io::Result<()> {
    for value in values {
        let field = format!("{:>w$.p$}", value, w = REAL_WIDTH, p = REAL_PRECISION);
        if field.len() >= REAL_WIDTH {
            write!(writer, " ")?;
        }
        write!(writer, "{}", field)?;
    }
    writeln!(writer)
}

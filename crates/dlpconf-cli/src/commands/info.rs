use crate::cli::InfoArgs;
use crate::error::{CliError, Result};
use dlpconf::core::io::dlpoly::{DlpConfigFile, DlpConfigMetadata};
use dlpconf::core::io::traits::MolecularFile;
use dlpconf::core::models::structure::AtomicStructure;
use std::collections::BTreeMap;
use std::fmt::{self, Write};
use tracing::info;

pub fn run(args: InfoArgs) -> Result<()> {
    info!("Loading configuration from {:?}", &args.input);
    let (structure, metadata) = DlpConfigFile::read_from_path(&args.input)
        .map_err(|e| CliError::config_file(&args.input, e))?;

    let report = summarize(&structure, &metadata).map_err(anyhow::Error::from)?;
    print!("{}", report);
    Ok(())
}

/// Renders the human-readable report printed by `dlpconf info`.
pub fn summarize(
    structure: &AtomicStructure,
    metadata: &DlpConfigMetadata,
) -> std::result::Result<String, fmt::Error> {
    let mut composition: BTreeMap<&str, usize> = BTreeMap::new();
    for symbol in structure.symbols() {
        *composition.entry(symbol.as_str()).or_default() += 1;
    }

    let mut out = String::new();
    writeln!(out, "Title:            {}", metadata.title)?;
    writeln!(out, "Level of detail:  {}", metadata.level_of_detail)?;
    writeln!(out, "Image convention: {}", metadata.image_convention)?;
    match metadata.declared_atom_count {
        Some(declared) if declared != structure.len() => writeln!(
            out,
            "Atoms:            {} (header declares {})",
            structure.len(),
            declared
        )?,
        _ => writeln!(out, "Atoms:            {}", structure.len())?,
    }

    let formula: Vec<String> = composition
        .iter()
        .map(|(symbol, count)| format!("{symbol}{count}"))
        .collect();
    writeln!(out, "Composition:      {}", formula.join(" "))?;

    if structure.is_fully_periodic() {
        writeln!(out, "Cell:")?;
        for row in structure.cell().row_iter() {
            writeln!(out, "  {:>14.6} {:>14.6} {:>14.6}", row[0], row[1], row[2])?;
        }
        writeln!(out, "Volume:           {:.6}", structure.cell().determinant().abs())?;
    } else {
        writeln!(out, "Cell:             none (non-periodic)")?;
    }
    Ok(out)
}

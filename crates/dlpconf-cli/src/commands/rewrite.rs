use crate::cli::RewriteArgs;
use crate::error::{CliError, Result};
use dlpconf::core::io::dlpoly::{DlpConfigFile, DlpConfigMetadata, WriteOptions};
use dlpconf::core::io::traits::MolecularFile;
use tracing::{info, warn};

pub fn run(args: RewriteArgs) -> Result<()> {
    info!("Loading configuration from {:?}", &args.input);
    let (structure, metadata) = DlpConfigFile::read_from_path(&args.input)
        .map_err(|e| CliError::config_file(&args.input, e))?;

    let options = resolve_options(&args, &metadata)?;
    info!(
        "Writing {} atoms with levcfg = {} and title {:?}",
        structure.len(),
        options.level_of_detail.as_flag(),
        options.title
    );
    if options.level_of_detail > metadata.level_of_detail {
        warn!(
            "Input only stores {}; missing blocks are written as zeros.",
            metadata.level_of_detail
        );
    }

    let level = options.level_of_detail;
    DlpConfigFile::write_to_path(&structure, &options.into(), &args.output)
        .map_err(|e| CliError::config_file(&args.output, e))?;

    println!(
        "✓ Wrote {} atoms (level of detail {}) to {}",
        structure.len(),
        level,
        args.output.display()
    );
    Ok(())
}

/// Combines the input header, the optional options file and command-line overrides,
/// in increasing order of precedence.
fn resolve_options(args: &RewriteArgs, metadata: &DlpConfigMetadata) -> Result<WriteOptions> {
    let mut options = match &args.config {
        Some(path) => {
            info!("Loading write options from {:?}", path);
            WriteOptions::load(path)?
        }
        None => metadata.write_options(),
    };

    if let Some(level) = args.level {
        options.level_of_detail = level;
    }
    if let Some(title) = &args.title {
        options.title = title.clone();
    }
    Ok(options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlpconf::core::io::dlpoly::{DEFAULT_TITLE, LevelOfDetail};
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    const INPUT: &str = "\
ion pair
         1         3         2
        8.0000000000        0.0000000000        0.0000000000
        0.0000000000        8.0000000000        0.0000000000
        0.0000000000        0.0000000000        8.0000000000
Na+              1
        0.0000000000        0.0000000000        0.0000000000
        0.5000000000        0.0000000000        0.0000000000
Cl-              2
        2.8000000000        0.0000000000        0.0000000000
       -0.5000000000        0.0000000000        0.0000000000
";

    fn setup() -> TempDir {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        fs::write(dir.path().join("CONFIG"), INPUT).expect("Failed to write input");
        dir
    }

    fn args(dir: &Path) -> RewriteArgs {
        RewriteArgs {
            input: dir.join("CONFIG"),
            output: dir.join("CONFIG.out"),
            config: None,
            level: None,
            title: None,
        }
    }

    fn read_output(dir: &Path) -> (usize, DlpConfigMetadata) {
        let (structure, metadata) = DlpConfigFile::read_from_path(dir.join("CONFIG.out")).unwrap();
        (structure.len(), metadata)
    }

    #[test]
    fn rewrite_keeps_input_header_by_default() {
        let dir = setup();
        run(args(dir.path())).unwrap();

        let (len, metadata) = read_output(dir.path());
        assert_eq!(len, 2);
        assert_eq!(metadata.title, "ion pair");
        assert_eq!(metadata.level_of_detail, LevelOfDetail::Velocities);
    }

    #[test]
    fn command_line_overrides_win() {
        let dir = setup();
        let mut a = args(dir.path());
        a.level = Some(LevelOfDetail::Forces);
        a.title = Some("forces added".into());
        run(a).unwrap();

        let (_, metadata) = read_output(dir.path());
        assert_eq!(metadata.title, "forces added");
        assert_eq!(metadata.level_of_detail, LevelOfDetail::Forces);

        let text = fs::read_to_string(dir.path().join("CONFIG.out")).unwrap();
        assert_eq!(text.lines().count(), 2 + 3 + 2 * 4);
    }

    #[test]
    fn options_file_replaces_input_header() {
        let dir = setup();
        let config = dir.path().join("write.toml");
        fs::write(&config, "level-of-detail = 0\n").unwrap();
        let mut a = args(dir.path());
        a.config = Some(config);
        run(a).unwrap();

        let (_, metadata) = read_output(dir.path());
        assert_eq!(metadata.title, DEFAULT_TITLE);
        assert_eq!(metadata.level_of_detail, LevelOfDetail::Positions);
    }

    #[test]
    fn invalid_options_file_is_reported() {
        let dir = setup();
        let config = dir.path().join("write.toml");
        fs::write(&config, "level-of-detail = \"high\"\n").unwrap();
        let mut a = args(dir.path());
        a.config = Some(config);

        assert!(matches!(run(a), Err(CliError::Options(_))));
        assert!(!dir.path().join("CONFIG.out").exists());
    }

    #[test]
    fn unreadable_input_names_the_input_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(args(dir.path())).unwrap_err();
        match err {
            CliError::ConfigFile { path, .. } => assert!(path.ends_with("CONFIG")),
            other => panic!("Expected ConfigFile error, got {other:?}"),
        }
    }
}

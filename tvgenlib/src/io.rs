//! Reading tables from disk and writing the output pair.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::assemble::{convert_lines, Streams};
use crate::error::TvgenError;
use crate::options::ConvertOptions;
use crate::table::JsonTableLoader;
use crate::Result;

/// Suffix of the stimulus file.
pub const INPUTS_SUFFIX: &str = "-inputs.txt";
/// Suffix of the expected-output file.
pub const EXPECTED_SUFFIX: &str = "-expected.txt";

/// Where the two streams of a table are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Stimulus file
    pub inputs: PathBuf,
    /// Expected-output file
    pub expected: PathBuf,
}

impl OutputPaths {
    /// Output paths for `table`: `<name>-inputs.txt` and `<name>-expected.txt`
    /// where `<name>` is the table's file name without a `.csv` extension.
    ///
    /// Files land next to the table unless `dir` is given.
    pub fn for_table(table: &Path, dir: Option<&Path>) -> Self {
        let file_name = table
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let stem = file_name
            .strip_suffix(".csv")
            .unwrap_or(&file_name)
            .to_string();
        let dir = dir
            .map(Path::to_path_buf)
            .unwrap_or_else(|| table.parent().map(Path::to_path_buf).unwrap_or_default());

        Self {
            inputs: dir.join(format!("{stem}{INPUTS_SUFFIX}")),
            expected: dir.join(format!("{stem}{EXPECTED_SUFFIX}")),
        }
    }
}

/// Read a file into lines, without line terminators.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TvgenError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Convert a table file.
///
/// Lookup tables are read from JSON files, relative to
/// [`ConvertOptions::tables_dir`] when set.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn convert_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Streams> {
    let lines = read_lines(path.as_ref())?;
    let loader = JsonTableLoader {
        base_dir: options.tables_dir.clone(),
    };
    convert_lines(&lines, options, &loader)
}

fn remove_if_exists(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(TvgenError::FileWrite {
            path: path.to_path_buf(),
            source,
        }),
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|source| TvgenError::FileWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Write both streams, replacing any previous output.
///
/// Old files are removed first. If either write fails, both files are
/// removed again so a failed run never leaves a half-written pair behind.
pub fn write_streams(streams: &Streams, paths: &OutputPaths) -> Result<()> {
    remove_if_exists(&paths.inputs)?;
    remove_if_exists(&paths.expected)?;

    let written = write_file(&paths.inputs, &streams.input_text())
        .and_then(|()| write_file(&paths.expected, &streams.expected_text()));

    if let Err(e) = written {
        warn!(error = %e, "Write failed, removing partial output");
        let _ = fs::remove_file(&paths.inputs);
        let _ = fs::remove_file(&paths.expected);
        return Err(e);
    }

    info!(
        inputs = %paths.inputs.display(),
        expected = %paths.expected.display(),
        "Wrote output files"
    );
    Ok(())
}

/// Remove stale output for `paths`, e.g. after a failed conversion.
pub fn discard_outputs(paths: &OutputPaths) -> Result<()> {
    remove_if_exists(&paths.inputs)?;
    remove_if_exists(&paths.expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_output_paths_next_to_table() {
        let paths = OutputPaths::for_table(Path::new("vectors/alu.csv"), None);
        assert_eq!(paths.inputs, PathBuf::from("vectors/alu-inputs.txt"));
        assert_eq!(paths.expected, PathBuf::from("vectors/alu-expected.txt"));
    }

    #[test]
    fn test_output_paths_custom_dir() {
        let paths = OutputPaths::for_table(Path::new("vectors/alu.csv"), Some(Path::new("out")));
        assert_eq!(paths.inputs, PathBuf::from("out/alu-inputs.txt"));
        assert_eq!(paths.expected, PathBuf::from("out/alu-expected.txt"));
    }

    #[test]
    fn test_output_paths_other_extension() {
        let paths = OutputPaths::for_table(Path::new("alu.tsv"), None);
        assert_eq!(paths.inputs, PathBuf::from("alu.tsv-inputs.txt"));
    }

    #[test]
    fn test_read_lines_strips_terminators() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("t.csv");
        fs::write(&path, "a,b\r\nc,d\n").unwrap();

        assert_eq!(read_lines(&path).unwrap(), vec!["a,b", "c,d"]);
    }

    #[test]
    fn test_read_lines_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_lines(dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, TvgenError::FileRead { .. }));
    }

    #[test]
    fn test_convert_file_with_lut() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join("luts")).unwrap();
        fs::write(
            dir.path().join("luts/state.json"),
            r#"{"IDLE": "00", "RUN": "01"}"#,
        )
        .unwrap();
        let table = dir.path().join("fsm.csv");
        fs::write(
            &table,
            "#;F::base_2:1;;F::lut:2->luts/state.json\n;1;;2\nreset;1;;IDLE\nrun;0;;RUN\n",
        )
        .unwrap();

        let options = ConvertOptions::new().tables_dir(dir.path());
        let streams = convert_file(&table, &options).unwrap();
        assert_eq!(streams.inputs, vec!["1", "0", "0"]);
        assert_eq!(streams.expected, vec!["--", "00", "01"]);
    }

    #[test]
    fn test_write_streams_replaces_existing() {
        let dir = tempdir().unwrap();
        let paths = OutputPaths::for_table(&dir.path().join("t.csv"), None);
        fs::write(&paths.inputs, "stale stale stale").unwrap();

        let streams = Streams {
            inputs: vec!["01".into(), "11".into()],
            expected: vec!["--".into(), "10".into()],
        };
        write_streams(&streams, &paths).unwrap();

        assert_eq!(fs::read_to_string(&paths.inputs).unwrap(), "01\n11");
        assert_eq!(fs::read_to_string(&paths.expected).unwrap(), "--\n10");
    }

    #[test]
    fn test_write_streams_failure_leaves_nothing() {
        let dir = tempdir().unwrap();
        let paths = OutputPaths {
            inputs: dir.path().join("t-inputs.txt"),
            expected: dir.path().join("missing-dir").join("t-expected.txt"),
        };

        let err = write_streams(&Streams::default(), &paths).unwrap_err();
        assert!(matches!(err, TvgenError::FileWrite { .. }));
        assert!(!paths.inputs.exists());
    }

    #[test]
    fn test_discard_outputs() {
        let dir = tempdir().unwrap();
        let paths = OutputPaths::for_table(&dir.path().join("t.csv"), None);
        fs::write(&paths.inputs, "x").unwrap();

        discard_outputs(&paths).unwrap();
        assert!(!paths.inputs.exists());
        assert!(!paths.expected.exists());
    }
}

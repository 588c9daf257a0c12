//! Per-step manifest files.
//!
//! A manifest is a small CSV with a header row and one `filepath` row per
//! produced item, ordered by item index. Downstream steps locate their
//! inputs by reading the upstream step's manifest.
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use csv::StringRecord;

/// Default manifest column holding produced file paths.
pub const DEFAULT_FILEPATH_COLUMN: &str = "filepath";

/// An ordered list of the files a step produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Manifest {
    paths: Vec<PathBuf>,
}

impl Manifest {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Write the manifest with a single `filepath` column.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(&path)
            .with_context(|| format!("Failed to create manifest: {}", path.as_ref().display()))?;

        writer
            .write_record([DEFAULT_FILEPATH_COLUMN])
            .context("Failed to write manifest header")?;
        for item in &self.paths {
            writer
                .write_record([item.to_string_lossy().as_ref()])
                .with_context(|| format!("Failed to write manifest row for {}", item.display()))?;
        }
        writer
            .flush()
            .with_context(|| format!("Failed to write manifest: {}", path.as_ref().display()))?;
        Ok(())
    }

    /// Read a manifest, selecting the path column by header name.
    ///
    /// Column matching is case-insensitive. Paths are returned in row order;
    /// their files are not checked for existence here.
    pub fn read<P: AsRef<Path>>(path: P, filepath_column: &str) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_path(&path)
            .with_context(|| format!("Failed to open manifest: {}", path.as_ref().display()))?;

        let headers = reader
            .headers()
            .context("Failed to read manifest header row")?
            .clone();

        let column_idx = find_column(&headers, filepath_column).ok_or_else(|| {
            anyhow!(
                "Missing filepath column '{}' in {}",
                filepath_column,
                path.as_ref().display()
            )
        })?;

        let mut paths = Vec::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result
                .with_context(|| format!("Failed to read manifest row {}", row_idx + 1))?;
            let value = record
                .get(column_idx)
                .ok_or_else(|| anyhow!("Missing path value at manifest row {}", row_idx + 1))?;
            paths.push(PathBuf::from(value));
        }

        Ok(Self { paths })
    }
}

fn find_column(headers: &StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|header| header.eq_ignore_ascii_case(name))
}

/// Recover the item index embedded in a payload filename.
///
/// Filenames like `matrix_12.csv` or `vector_3.csv` carry the item index
/// after the final underscore. Mapped steps rely on this to place results,
/// so completion order never affects manifest order.
pub fn index_from_filename(path: &Path) -> Option<usize> {
    let stem = path.file_stem()?.to_str()?;
    let (_, index) = stem.rsplit_once('_')?;
    index.parse().ok()
}

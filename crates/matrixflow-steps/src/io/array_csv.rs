//! Headerless CSV readers and writers for staged arrays.
//!
//! Values are written with Rust's shortest round-trip float formatting, so
//! reading a staged file recovers the original `f64` bits exactly.
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use csv::ReaderBuilder;
use ndarray::{Array1, Array2, Axis};

/// Write a matrix as headerless CSV, one matrix row per line.
pub fn write_matrix_csv<P: AsRef<Path>>(path: P, matrix: &Array2<f64>) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create matrix file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);

    for row in matrix.axis_iter(Axis(0)) {
        let line = row
            .iter()
            .map(|value| value.to_string())
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{}", line)
            .with_context(|| format!("Failed to write matrix file: {}", path.as_ref().display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write matrix file: {}", path.as_ref().display()))?;
    Ok(())
}

/// Read a matrix written by [`write_matrix_csv`].
pub fn read_matrix_csv<P: AsRef<Path>>(path: P) -> Result<Array2<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .flexible(true)
        .from_path(&path)
        .with_context(|| format!("Failed to open matrix file: {}", path.as_ref().display()))?;

    let mut data = Vec::new();
    let mut n_rows = 0;
    let mut n_cols = None;

    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| {
            format!(
                "Failed to read row {} of {}",
                row_idx + 1,
                path.as_ref().display()
            )
        })?;
        let row: Vec<f64> = record
            .iter()
            .map(|field| field.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .with_context(|| {
                format!(
                    "Invalid value at row {} of {}",
                    row_idx + 1,
                    path.as_ref().display()
                )
            })?;

        match n_cols {
            None => n_cols = Some(row.len()),
            Some(expected) if expected != row.len() => {
                return Err(anyhow!(
                    "Ragged row {} in {}: expected {} values, got {}",
                    row_idx + 1,
                    path.as_ref().display(),
                    expected,
                    row.len()
                ));
            }
            Some(_) => {}
        }

        n_rows += 1;
        data.extend(row);
    }

    let n_cols = n_cols.unwrap_or(0);
    Array2::from_shape_vec((n_rows, n_cols), data)
        .with_context(|| format!("Failed to build matrix from {}", path.as_ref().display()))
}

/// Write a vector as headerless single-column CSV, one value per line.
pub fn write_vector_csv<P: AsRef<Path>>(path: P, vector: &Array1<f64>) -> Result<()> {
    let file = File::create(&path)
        .with_context(|| format!("Failed to create vector file: {}", path.as_ref().display()))?;
    let mut writer = BufWriter::new(file);

    for value in vector.iter() {
        writeln!(writer, "{}", value)
            .with_context(|| format!("Failed to write vector file: {}", path.as_ref().display()))?;
    }

    writer
        .flush()
        .with_context(|| format!("Failed to write vector file: {}", path.as_ref().display()))?;
    Ok(())
}

/// Read a vector written by [`write_vector_csv`].
pub fn read_vector_csv<P: AsRef<Path>>(path: P) -> Result<Array1<f64>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(b',')
        .from_path(&path)
        .with_context(|| format!("Failed to open vector file: {}", path.as_ref().display()))?;

    let mut values = Vec::new();
    for (row_idx, result) in reader.records().enumerate() {
        let record = result.with_context(|| {
            format!(
                "Failed to read row {} of {}",
                row_idx + 1,
                path.as_ref().display()
            )
        })?;
        let field = record.get(0).ok_or_else(|| {
            anyhow!("Empty row {} in {}", row_idx + 1, path.as_ref().display())
        })?;
        let value = field.trim().parse::<f64>().with_context(|| {
            format!(
                "Invalid value at row {} of {}",
                row_idx + 1,
                path.as_ref().display()
            )
        })?;
        values.push(value);
    }

    Ok(Array1::from_vec(values))
}

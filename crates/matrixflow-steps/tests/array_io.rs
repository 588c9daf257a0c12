use matrixflow_steps::io::{read_matrix_csv, read_vector_csv, write_matrix_csv, write_vector_csv};
use ndarray::{array, Array1, Array2};

// ---------------------------------------------------------------------------
// Matrix round trips
// ---------------------------------------------------------------------------

#[test]
fn test_matrix_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.csv");

    // 1/3 has no short decimal form; shortest round-trip printing must still
    // recover the exact f64 bits.
    let matrix = array![[0.0, 1.0 / 3.0, -2.5], [1e-300, 1e300, 42.0]];
    write_matrix_csv(&path, &matrix).unwrap();
    let loaded = read_matrix_csv(&path).unwrap();

    assert_eq!(loaded, matrix);
}

#[test]
fn test_empty_matrix_round_trips() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("matrix.csv");

    let matrix = Array2::<f64>::zeros((0, 0));
    write_matrix_csv(&path, &matrix).unwrap();
    let loaded = read_matrix_csv(&path).unwrap();

    assert_eq!(loaded.nrows(), 0);
}

#[test]
fn test_ragged_rows_error_names_file_and_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("ragged.csv");
    std::fs::write(&path, "1.0,2.0\n3.0\n").unwrap();

    let err = read_matrix_csv(&path).unwrap_err();
    let message = format!("{:#}", err);
    assert!(message.contains("Ragged row 2"), "got: {}", message);
    assert!(message.contains("ragged.csv"), "got: {}", message);
}

#[test]
fn test_non_numeric_cell_errors_with_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.csv");
    std::fs::write(&path, "1.0,2.0\n3.0,oops\n").unwrap();

    let err = read_matrix_csv(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("row 2"));
}

#[test]
fn test_missing_file_errors_with_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.csv");

    let err = read_matrix_csv(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("absent.csv"));
}

// ---------------------------------------------------------------------------
// Vector round trips
// ---------------------------------------------------------------------------

#[test]
fn test_vector_round_trip_is_exact() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vector.csv");

    let vector: Array1<f64> = array![3.0, 6.999999999999999, 7.0];
    write_vector_csv(&path, &vector).unwrap();
    let loaded = read_vector_csv(&path).unwrap();

    assert_eq!(loaded, vector);
}

#[test]
fn test_vector_file_is_one_value_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vector.csv");

    write_vector_csv(&path, &array![1.5, 2.5]).unwrap();
    let content = std::fs::read_to_string(&path).unwrap();

    assert_eq!(content, "1.5\n2.5\n");
}

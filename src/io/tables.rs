// src/io/tables.rs

use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SimError};
use crate::model::distribution::DistributionTable;

#[derive(Debug, Deserialize)]
struct TableRow {
    value: f64,
    probability: f64,
}

/// Loads a distribution table from a CSV file with a `value,probability` header.
///
/// The table is validated exactly like the built-in ones.
pub fn load_distribution_table(name: &str, file_path: &Path) -> Result<DistributionTable> {
    let csv_error = |source| SimError::Csv {
        path: file_path.to_path_buf(),
        source,
    };

    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(file_path)
        .map_err(csv_error)?;

    let mut entries = Vec::new();
    for row in rdr.deserialize() {
        let row: TableRow = row.map_err(csv_error)?;
        entries.push((row.value, row.probability));
    }

    DistributionTable::new(name, entries)
}

/// Uses the table at `path` if given, otherwise the built-in one.
pub fn table_or_default(
    name: &str,
    path: Option<&Path>,
    default: fn() -> Result<DistributionTable>,
) -> Result<DistributionTable> {
    match path {
        Some(path) => load_distribution_table(name, path),
        None => default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    fn temp_csv(file_name: &str, contents: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("fansim-tables-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(file_name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn loads_valid_table() {
        let path = temp_csv("delay.csv", "value,probability\n20,0.6\n30, 0.3\n45,0.1\n");
        let table = load_distribution_table("arrival delay", &path).unwrap();
        assert_eq!(table.values(), &[20.0, 30.0, 45.0]);
        assert_eq!(table.name(), "arrival delay");
    }

    #[test]
    fn rejects_table_that_does_not_sum_to_one() {
        let path = temp_csv("bad.csv", "value,probability\n20,0.6\n30,0.3\n");
        let err = load_distribution_table("arrival delay", &path).unwrap_err();
        assert!(err.is_configuration());
    }

    #[test]
    fn malformed_rows_are_csv_errors() {
        let path = temp_csv("garbled.csv", "value,probability\ntwenty,0.6\n");
        assert!(matches!(
            load_distribution_table("arrival delay", &path),
            Err(SimError::Csv { .. })
        ));
    }

    #[test]
    fn falls_back_to_builtin_table() {
        let table = table_or_default("arrival delay", None, DistributionTable::arrival_delays).unwrap();
        assert_eq!(table.len(), 3);
    }
}

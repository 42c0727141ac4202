//! Loaders for the two reference datasets: the principle catalog and the KPI
//! weighting matrix. Both are read once per run from a data directory.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{KpiMatrix, Principle};

pub const PRINCIPLES_FILE: &str = "triz-principles.json";
pub const KPI_MATRIX_FILE: &str = "kpi-matrix.json";

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reference data not found: {path}")]
    NotFound { path: PathBuf },

    #[error("reference data unreadable: {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("reference data malformed: {path}: {message}")]
    Malformed { path: PathBuf, message: String },
}

fn read_file(path: &Path) -> Result<String, CatalogError> {
    if !path.exists() {
        return Err(CatalogError::NotFound {
            path: path.to_path_buf(),
        });
    }
    std::fs::read_to_string(path).map_err(|source| CatalogError::Unreadable {
        path: path.to_path_buf(),
        source,
    })
}

/// Load the ordered principle catalog.
///
/// Ids must be unique; catalog order is preserved and drives both output
/// determinism and request pacing downstream.
pub fn load_principles(data_dir: &Path) -> Result<Vec<Principle>, CatalogError> {
    let path = data_dir.join(PRINCIPLES_FILE);
    let raw = read_file(&path)?;

    let principles: Vec<Principle> =
        serde_json::from_str(&raw).map_err(|e| CatalogError::Malformed {
            path: path.clone(),
            message: e.to_string(),
        })?;

    if principles.is_empty() {
        return Err(CatalogError::Malformed {
            path,
            message: "principle catalog is empty".to_string(),
        });
    }

    let mut seen = std::collections::HashSet::new();
    for p in &principles {
        if !seen.insert(p.id) {
            return Err(CatalogError::Malformed {
                path,
                message: format!("duplicate principle id {}", p.id),
            });
        }
    }

    Ok(principles)
}

/// Load the KPI weighting matrix.
pub fn load_kpi_matrix(data_dir: &Path) -> Result<KpiMatrix, CatalogError> {
    let path = data_dir.join(KPI_MATRIX_FILE);
    let raw = read_file(&path)?;

    let matrix: KpiMatrix = serde_json::from_str(&raw).map_err(|e| CatalogError::Malformed {
        path: path.clone(),
        message: e.to_string(),
    })?;

    if matrix.categories.is_empty() {
        return Err(CatalogError::Malformed {
            path,
            message: "KPI matrix has no categories".to_string(),
        });
    }

    Ok(matrix)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_principles(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::NotFound { .. }));
    }

    #[test]
    fn duplicate_ids_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PRINCIPLES_FILE),
            r#"[{"id":1,"name":"Segmentation"},{"id":1,"name":"Extraction"}]"#,
        )
        .unwrap();
        let err = load_principles(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }

    #[test]
    fn loads_catalog_in_order() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(PRINCIPLES_FILE),
            r#"[
                {"id":1,"name":"Segmentation","description":"Divide an object into independent parts."},
                {"id":2,"name":"Taking out"}
            ]"#,
        )
        .unwrap();
        let principles = load_principles(dir.path()).unwrap();
        assert_eq!(principles.len(), 2);
        assert_eq!(principles[0].id, 1);
        assert_eq!(principles[1].description, None);
    }

    #[test]
    fn loads_kpi_matrix() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(KPI_MATRIX_FILE),
            r#"{"categories":[{"category":"Impact","kpi":"IFR Alignment (Ideality)","weight":0.25}]}"#,
        )
        .unwrap();
        let matrix = load_kpi_matrix(dir.path()).unwrap();
        assert_eq!(matrix.categories.len(), 1);
        assert!((matrix.categories[0].weight - 0.25).abs() < 1e-12);
    }

    #[test]
    fn bad_json_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(KPI_MATRIX_FILE), "not json").unwrap();
        let err = load_kpi_matrix(dir.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Malformed { .. }));
    }
}

//! Parameter file loading
//!
//! Parameters live in a dotenv-format file (`KEY=value`, one per line,
//! `#` comments allowed). File order is preserved because the canonical query
//! string is built from the pairs in the order they are defined.

use std::path::{Path, PathBuf};

use crate::constants::params;
use crate::errors::{AuthError, AuthResult};

/// Parameter file status information
#[derive(Debug, Clone)]
pub struct ParamsStatus {
    /// Path of the parameter file that was inspected
    pub path: PathBuf,
    /// Whether the file exists
    pub exists: bool,
    /// Number of parameters the file defines (0 when missing or unreadable)
    pub param_count: usize,
}

impl ParamsStatus {
    /// Check if at least one parameter is available
    pub fn has_params(&self) -> bool {
        self.exists && self.param_count > 0
    }

    /// Get descriptive status message for display
    pub fn status_message(&self) -> String {
        match (self.exists, self.param_count) {
            (false, _) => format!(
                "No parameter file at {} - requests will be unsigned",
                self.path.display()
            ),
            (true, 0) => format!(
                "Parameter file {} defines no parameters",
                self.path.display()
            ),
            (true, n) => format!(
                "{} parameter(s) loaded from {}",
                n,
                self.path.display()
            ),
        }
    }
}

/// Resolve the parameter file path, honoring a CLI override
pub fn params_file_path(override_path: Option<&Path>) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(params::DEFAULT_FILE_NAME))
}

/// Load request parameters from a dotenv-format file, in file order
pub fn load_params(path: &Path) -> AuthResult<Vec<(String, String)>> {
    let iter = dotenv::from_path_iter(path).map_err(|source| AuthError::ParamsFile {
        path: path.to_path_buf(),
        source,
    })?;

    let mut loaded = Vec::new();
    for item in iter {
        let (key, value) = item.map_err(|source| AuthError::ParamsFile {
            path: path.to_path_buf(),
            source,
        })?;
        loaded.push((key, value));
    }

    tracing::debug!(
        "Loaded {} parameter(s) from {}",
        loaded.len(),
        path.display()
    );
    Ok(loaded)
}

/// Inspect the parameter file without failing on problems
pub fn get_params_status(path: &Path) -> ParamsStatus {
    let exists = path.exists();
    let param_count = if exists {
        load_params(path).map(|p| p.len()).unwrap_or(0)
    } else {
        0
    };

    ParamsStatus {
        path: path.to_path_buf(),
        exists,
        param_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::tempdir;

    #[test]
    fn test_load_params_preserves_file_order() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "SIGNATURE=abc123\nEXPIRES=1700000000\n").unwrap();

        let params = load_params(&path).unwrap();
        assert_eq!(
            params,
            vec![
                ("SIGNATURE".to_string(), "abc123".to_string()),
                ("EXPIRES".to_string(), "1700000000".to_string()),
            ]
        );
    }

    #[test]
    fn test_load_params_missing_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nope.env");

        assert!(load_params(&path).is_err());
    }

    #[test]
    fn test_status_for_missing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("absent.env");

        let status = get_params_status(&path);
        assert!(!status.exists);
        assert!(!status.has_params());
        assert!(status.status_message().contains("unsigned"));
    }

    #[test]
    fn test_status_for_populated_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "KEY=value\n").unwrap();

        let status = get_params_status(&path);
        assert!(status.exists);
        assert_eq!(status.param_count, 1);
        assert!(status.has_params());
        assert!(status.status_message().contains("1 parameter"));
    }

    #[test]
    fn test_status_for_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "# only a comment\n").unwrap();

        let status = get_params_status(&path);
        assert!(status.exists);
        assert_eq!(status.param_count, 0);
        assert!(!status.has_params());
    }

    #[test]
    fn test_params_file_path_default_and_override() {
        assert_eq!(params_file_path(None), PathBuf::from(".env"));
        assert_eq!(
            params_file_path(Some(Path::new("/tmp/custom.env"))),
            PathBuf::from("/tmp/custom.env")
        );
    }
}

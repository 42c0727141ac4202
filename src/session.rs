//! Run-scoped session identity and artifact locations.

use std::path::{Path, PathBuf};

use chrono::Utc;

/// One pipeline run. The id is derived from the wall clock once at creation
/// and passed explicitly to everything that writes artifacts.
#[derive(Debug, Clone)]
pub struct Session {
    id: String,
    dir: PathBuf,
}

impl Session {
    /// Create a new session under `output_root`, making its directory.
    pub fn create(output_root: &Path) -> std::io::Result<Self> {
        let id = format!("session_{}", Utc::now().timestamp_millis());
        Self::with_id(output_root, id)
    }

    /// Create a session with a caller-supplied id. Used in tests.
    pub fn with_id(output_root: &Path, id: impl Into<String>) -> std::io::Result<Self> {
        let id = id.into();
        let dir = output_root.join(&id);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { id, dir })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn artifact_path(&self, filename: &str) -> PathBuf {
        self.dir.join(filename)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_makes_directory_with_timestamped_id() {
        let root = tempfile::tempdir().unwrap();
        let session = Session::create(root.path()).unwrap();
        assert!(session.id().starts_with("session_"));
        assert!(session.dir().is_dir());
        assert!(session
            .artifact_path("top-solutions.json")
            .starts_with(root.path()));
    }
}

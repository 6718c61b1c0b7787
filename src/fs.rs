use anyhow::{Context, Result};
use std::path::Path;

/// Abstraction over file system operations for testing
pub trait FileSystem: Send + Sync {
    /// Read file contents as a string
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write string contents to a file
    fn write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Write contents to a file via a temporary file and rename, so a
    /// crashed run never leaves a half-written output behind
    fn atomic_write(&self, path: &Path, contents: &str) -> Result<()>;

    /// Check if a path exists
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories
    fn create_dir_all(&self, path: &Path) -> Result<()>;
}

/// Real file system implementation using std::fs
#[derive(Debug, Default, Clone)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        Ok(std::fs::read_to_string(path)?)
    }

    fn write(&self, path: &Path, contents: &str) -> Result<()> {
        Ok(std::fs::write(path, contents)?)
    }

    fn atomic_write(&self, path: &Path, contents: &str) -> Result<()> {
        use std::io::Write;

        // The temp file must live on the same filesystem as the target,
        // otherwise persist() fails with EXDEV.
        let dir = path.parent().unwrap_or_else(|| Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .with_context(|| format!("Failed to create temp file in {}", dir.display()))?;
        tmp.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write temp file for {}", path.display()))?;
        tmp.persist(path)
            .with_context(|| format!("Failed to persist {}", path.display()))?;
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        Ok(std::fs::create_dir_all(path)?)
    }
}

/// In-memory file system for testing
#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::{Arc, RwLock};

    #[derive(Debug, Default, Clone)]
    pub struct InMemoryFileSystem {
        files: Arc<RwLock<HashMap<std::path::PathBuf, String>>>,
        directories: Arc<RwLock<HashSet<std::path::PathBuf>>>,
    }

    impl InMemoryFileSystem {
        pub fn new() -> Self {
            Self::default()
        }

        /// Add a file to the mock file system
        pub fn add_file(&self, path: impl AsRef<Path>, contents: impl Into<String>) {
            let path = path.as_ref().to_path_buf();
            if let Some(parent) = path.parent() {
                let mut current = std::path::PathBuf::new();
                for component in parent.components() {
                    current.push(component);
                    self.directories.write().unwrap().insert(current.clone());
                }
            }
            self.files.write().unwrap().insert(path, contents.into());
        }

        /// Get all files (for verification in tests)
        pub fn get_files(&self) -> HashMap<std::path::PathBuf, String> {
            self.files.read().unwrap().clone()
        }
    }

    impl FileSystem for InMemoryFileSystem {
        fn read_to_string(&self, path: &Path) -> Result<String> {
            self.files
                .read()
                .unwrap()
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("File not found: {}", path.display()))
        }

        fn write(&self, path: &Path, contents: &str) -> Result<()> {
            self.files
                .write()
                .unwrap()
                .insert(path.to_path_buf(), contents.to_string());
            Ok(())
        }

        fn atomic_write(&self, path: &Path, contents: &str) -> Result<()> {
            self.write(path, contents)
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.read().unwrap().contains_key(path)
                || self.directories.read().unwrap().contains(path)
        }

        fn create_dir_all(&self, path: &Path) -> Result<()> {
            let mut current = std::path::PathBuf::new();
            for component in path.components() {
                current.push(component);
                self.directories.write().unwrap().insert(current.clone());
            }
            Ok(())
        }
    }
}

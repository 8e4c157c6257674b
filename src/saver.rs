// Destinations for exported files

use eyre::{Context, Result, eyre};
use fs2::FileExt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Capability that receives generated file contents and a suggested name
pub trait Saver {
    fn save(&mut self, contents: &str, filename: &str) -> Result<()>;
}

/// Writes exports into a directory on disk
#[derive(Debug, Clone)]
pub struct FileSaver {
    dir: PathBuf,
}

impl FileSaver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Reject names that would escape the export directory
    fn validate_filename(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(eyre!("Export filename cannot be empty"));
        }
        if name.contains('/') || name.contains('\\') || name == "." || name == ".." {
            return Err(eyre!("Invalid export filename: {}", name));
        }
        Ok(())
    }
}

impl Saver for FileSaver {
    fn save(&mut self, contents: &str, filename: &str) -> Result<()> {
        Self::validate_filename(filename)?;

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Failed to create export directory: {:?}", self.dir))?;

        let path = self.dir.join(filename);
        debug!(path = ?path, bytes = contents.len(), "save: writing export");

        let mut file = fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .with_context(|| format!("Failed to open export file: {:?}", path))?;

        // Acquire exclusive lock before writing
        file.lock_exclusive().context("Failed to acquire file lock")?;

        file.write_all(contents.as_bytes())?;
        file.sync_all()?;

        // Lock is automatically released when file is dropped
        info!(path = ?path, "Export written");
        Ok(())
    }
}

/// Keeps exports in memory, in the order they were saved
#[derive(Debug, Default)]
pub struct MemorySaver {
    pub saved: Vec<(String, String)>,
}

impl MemorySaver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent `(filename, contents)` pair
    pub fn last(&self) -> Option<&(String, String)> {
        self.saved.last()
    }
}

impl Saver for MemorySaver {
    fn save(&mut self, contents: &str, filename: &str) -> Result<()> {
        self.saved.push((filename.to_string(), contents.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_saver_creates_directory_and_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("downloads");
        let mut saver = FileSaver::new(&dir);

        saver.save("ID,Text\n1,\"a\"", "out.csv").unwrap();

        let content = fs::read_to_string(dir.join("out.csv")).unwrap();
        assert_eq!(content, "ID,Text\n1,\"a\"");
    }

    #[test]
    fn test_file_saver_overwrites() {
        let temp = TempDir::new().unwrap();
        let mut saver = FileSaver::new(temp.path());

        saver.save("first version, longer", "out.csv").unwrap();
        saver.save("second", "out.csv").unwrap();

        let content = fs::read_to_string(temp.path().join("out.csv")).unwrap();
        assert_eq!(content, "second");
    }

    #[test]
    fn test_file_saver_rejects_bad_names() {
        let temp = TempDir::new().unwrap();
        let mut saver = FileSaver::new(temp.path());

        assert!(saver.save("x", "").is_err());
        assert!(saver.save("x", "../escape.csv").is_err());
        assert!(saver.save("x", "..").is_err());
    }

    #[test]
    fn test_memory_saver_records_saves() {
        let mut saver = MemorySaver::new();
        assert!(saver.last().is_none());

        saver.save("a", "one.csv").unwrap();
        saver.save("b", "two.csv").unwrap();

        assert_eq!(saver.saved.len(), 2);
        assert_eq!(saver.last().unwrap(), &("two.csv".to_string(), "b".to_string()));
    }
}

use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

/// Trait for types that represent a generated file
pub trait GeneratedFile {
    /// Get the file path relative to the base directory
    fn path(&self, base: &Path) -> PathBuf;

    /// Get the rules for writing this file
    fn rules(&self) -> FileRules;

    /// Render the file content
    fn render(&self) -> String;

    /// Write the file to disk
    fn write(&self, base: &Path) -> Result<WriteResult> {
        write_with_rules(&self.path(base), &self.render(), &self.rules())
    }
}

fn write_with_rules(path: &Path, content: &str, rules: &FileRules) -> Result<WriteResult> {
    match rules.overwrite {
        Overwrite::Always => {
            write_file(path, content)?;
            Ok(WriteResult::Written)
        }
        Overwrite::IfChanged => {
            if std::fs::read_to_string(path).is_ok_and(|existing| existing == content) {
                tracing::debug!(path = %path.display(), "content unchanged, skipping write");
                Ok(WriteResult::Unchanged)
            } else {
                write_file(path, content)?;
                Ok(WriteResult::Written)
            }
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .wrap_err_with(|| format!("failed to create '{}'", parent.display()))?;
    }
    std::fs::write(path, content).wrap_err_with(|| format!("failed to write '{}'", path.display()))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Result of a write operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteResult {
    /// File was written
    Written,
    /// File already had the exact content
    Unchanged,
}

/// Rules that determine how a file should be written
#[derive(Debug, Clone)]
pub struct FileRules {
    pub overwrite: Overwrite,
}

impl FileRules {
    /// Rules for files that are regenerated on every run.
    pub fn always_overwrite() -> Self {
        Self::default()
    }

    /// Rules that leave the file untouched when nothing changed.
    pub fn if_changed() -> Self {
        Self {
            overwrite: Overwrite::IfChanged,
        }
    }
}

/// How to handle existing files
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overwrite {
    /// Always overwrite
    Always,
    /// Only write when the content differs (keeps mtimes stable for build caches)
    IfChanged,
}

impl Default for FileRules {
    fn default() -> Self {
        Self {
            overwrite: Overwrite::Always,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_write_file_creates_parent_dirs() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("a").join("b").join("mock.go");

        write_file(&path, "package mocks\n").unwrap();

        assert!(path.exists());
        assert_eq!(fs::read_to_string(&path).unwrap(), "package mocks\n");
    }

    #[test]
    fn test_always_overwrites() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock.go");
        fs::write(&path, "original").unwrap();

        let result = write_with_rules(&path, "updated", &FileRules::always_overwrite()).unwrap();

        assert_eq!(result, WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "updated");
    }

    #[test]
    fn test_if_changed_skips_identical() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("mock.go");
        fs::write(&path, "same").unwrap();
        let rules = FileRules::if_changed();

        assert_eq!(write_with_rules(&path, "same", &rules).unwrap(), WriteResult::Unchanged);
        assert_eq!(write_with_rules(&path, "different", &rules).unwrap(), WriteResult::Written);
        assert_eq!(fs::read_to_string(&path).unwrap(), "different");
    }

    struct Readme;

    impl GeneratedFile for Readme {
        fn path(&self, base: &Path) -> PathBuf {
            base.join("README.md")
        }

        fn rules(&self) -> FileRules {
            FileRules::if_changed()
        }

        fn render(&self) -> String {
            "generated\n".to_string()
        }
    }

    #[test]
    fn test_generated_file_write() {
        let temp = TempDir::new().unwrap();

        assert_eq!(Readme.write(temp.path()).unwrap(), WriteResult::Written);
        assert_eq!(Readme.write(temp.path()).unwrap(), WriteResult::Unchanged);
    }
}

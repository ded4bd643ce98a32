//! JSON configuration files written to temporary directories.

use std::fs;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use tempfile::TempDir;

/// A temporary directory holding configuration files.
///
/// Files are removed when the fixture drops.
///
/// # Examples
///
/// ```
/// use test_helpers::fixtures::ConfigDir;
///
/// let dir = ConfigDir::new().expect("temp dir");
/// let path = dir.json("app.json", &serde_json::json!({"VAR": "x"})).expect("write");
/// assert!(path.as_str().ends_with("app.json"));
/// ```
#[derive(Debug)]
pub struct ConfigDir {
    _dir: TempDir,
    root: Utf8PathBuf,
}

impl ConfigDir {
    /// Create an empty fixture directory.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created or its path is
    /// not valid UTF-8.
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("create temporary config directory")?;
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .map_err(|p| anyhow!("non UTF-8 temp dir: {}", p.display()))?;
        Ok(Self { _dir: dir, root })
    }

    /// Root of the fixture directory.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.root
    }

    /// Write `contents` verbatim to `name` and return the file path.
    ///
    /// # Errors
    ///
    /// Returns an error when the file cannot be written.
    pub fn file(&self, name: &str, contents: &str) -> Result<Utf8PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, contents).with_context(|| format!("write fixture {path}"))?;
        Ok(path)
    }

    /// Serialise `value` as pretty JSON into `name` and return the file path.
    ///
    /// # Errors
    ///
    /// Returns an error when serialisation or the write fails.
    pub fn json(&self, name: &str, value: &serde_json::Value) -> Result<Utf8PathBuf> {
        let text = serde_json::to_string_pretty(value).context("serialise fixture")?;
        self.file(name, &text)
    }

    /// Path for `name` inside the directory without creating it.
    #[must_use]
    pub fn missing(&self, name: &str) -> Utf8PathBuf {
        self.root.join(name)
    }
}

//! Icon asset resolution.
//!
//! Maps a classification label to the icon file the tray shell should
//! load: `<icon_dir>/<label>.png`. A missing file is tolerated — the
//! shell falls back to its default icon — so a half-populated icon
//! directory degrades the display instead of breaking it.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct IconSet {
    dir: PathBuf,
}

impl IconSet {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path of the icon for `label`, if the file exists.
    pub fn resolve(&self, label: &str) -> Option<PathBuf> {
        let path = self.dir.join(format!("{label}.png"));
        if path.is_file() {
            Some(path)
        } else {
            tracing::debug!(label, path = %path.display(), "No icon file for label");
            None
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

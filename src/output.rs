//! Writes rendered bytes under the output root.

use crate::render::RenderedPage;
use anyhow::{Context, Result, bail};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

#[derive(Clone, Debug)]
pub struct OutputWriter {
    root: PathBuf,
}

impl OutputWriter {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Write a page to `<root>/<package>/<kind-dir>/<Name>.html`.
    pub fn write_page(&self, page: &RenderedPage) -> Result<PathBuf> {
        self.write(&page.location.relative_file(), &page.bytes)
    }

    /// Write `bytes` to `relative` under the root, creating parent
    /// directories and replacing any existing file.
    ///
    /// The content goes to a temporary file in the destination directory
    /// first and is renamed into place.
    pub fn write(&self, relative: &Path, bytes: &[u8]) -> Result<PathBuf> {
        if relative.is_absolute() {
            bail!("output path {} must be relative", relative.display());
        }
        let target = self.root.join(relative);
        let parent = target
            .parent()
            .with_context(|| format!("output path {} has no parent", target.display()))?;
        fs::create_dir_all(parent)
            .with_context(|| format!("creating output directory {}", parent.display()))?;

        let mut staged = NamedTempFile::new_in(parent)
            .with_context(|| format!("staging {}", target.display()))?;
        staged
            .write_all(bytes)
            .with_context(|| format!("writing {}", target.display()))?;
        // Temporary files are created owner-only; pages are meant to be served.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            staged
                .as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .with_context(|| format!("setting permissions on {}", target.display()))?;
        }
        staged
            .persist(&target)
            .with_context(|| format!("replacing {}", target.display()))?;
        Ok(target)
    }
}

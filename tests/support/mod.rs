#![allow(dead_code)]

use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone, Utc};
use interface_docs::GenerateOptions;
use interface_docs::workspace::RESOURCE_INDEX_DIR;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

// A throwaway ament install prefix: interface files under share/<pkg>/ and
// the matching rosidl_interfaces resource index markers.
pub struct FixturePrefix {
    dir: TempDir,
}

impl FixturePrefix {
    pub fn new() -> Result<Self> {
        let dir = TempDir::new().context("failed to allocate fixture prefix")?;
        fs::create_dir_all(dir.path().join(RESOURCE_INDEX_DIR))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `share/<package>/<relative>` and list it in the package index.
    pub fn add(&self, package: &str, relative: &str, contents: &str) -> Result<PathBuf> {
        let file = self.path().join("share").join(package).join(relative);
        fs::create_dir_all(file.parent().context("interface file has a parent")?)?;
        fs::write(&file, contents)
            .with_context(|| format!("failed to write fixture {}", file.display()))?;
        self.list(package, relative)?;
        Ok(file)
    }

    /// List `relative` in the package index without creating the file.
    pub fn list(&self, package: &str, relative: &str) -> Result<()> {
        let marker = self.path().join(RESOURCE_INDEX_DIR).join(package);
        let mut index = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&marker)
            .with_context(|| format!("failed to open index {}", marker.display()))?;
        writeln!(index, "{relative}")?;
        Ok(())
    }
}

pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap()
}

pub fn options(output: &Path, prefixes: &[&FixturePrefix]) -> GenerateOptions {
    let mut options = GenerateOptions::new(
        output,
        prefixes.iter().map(|p| p.path().to_path_buf()).collect(),
    );
    options.generated_at = Some(fixed_time());
    options
}

/// A small workspace with cross-package, cross-kind and forward references.
/// `demo_msgs/Report` is discovered before `std_msgs/Header`, which it uses.
pub fn sample_prefix() -> Result<FixturePrefix> {
    let prefix = FixturePrefix::new()?;
    prefix.add(
        "action_msgs",
        "msg/GoalStatus.msg",
        "# An action goal's status.\nint8 STATUS_UNKNOWN = 0\nint8 STATUS_ACCEPTED = 1\n\nint8 status\n",
    )?;
    prefix.add(
        "demo_msgs",
        "msg/Report.msg",
        "std_msgs/Header header  # stamp & frame\naction_msgs/GoalStatus status\nPair[] pairs\nint32 count 0\nstring<=8 note \"<b>\"\n",
    )?;
    prefix.add("demo_msgs", "msg/Pair.msg", "int32 left\nint32 right\n")?;
    prefix.add(
        "demo_msgs",
        "srv/Swap.srv",
        "Pair pair\n---\nPair pair\nbool ok\n",
    )?;
    prefix.add(
        "demo_msgs",
        "action/Count.action",
        "int32 target\n---\nint32 reached\n---\nReport report\n",
    )?;
    prefix.add(
        "std_msgs",
        "msg/Header.msg",
        "# Standard metadata.\nbuiltin_interfaces/Time stamp\nstring frame_id\n",
    )?;
    Ok(prefix)
}

pub fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Contents of the `<pre class="raw">` block of a rendered page.
pub fn raw_block(html: &str) -> &str {
    const OPEN: &str = "<pre class=\"raw\">";
    let start = html.find(OPEN).expect("page has a raw block") + OPEN.len();
    let end = html[start..].find("</pre>").expect("raw block is closed") + start;
    &html[start..end]
}

/// True when every `&` in `text` starts one of the escapes Tera produces.
pub fn ampersands_are_entities(text: &str) -> bool {
    const ENTITIES: [&str; 6] = ["&amp;", "&lt;", "&gt;", "&quot;", "&#x27;", "&#x2F;"];
    text.match_indices('&')
        .all(|(idx, _)| ENTITIES.iter().any(|entity| text[idx..].starts_with(entity)))
}

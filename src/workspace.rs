//! Interface discovery across ament install prefixes.
//!
//! Each prefix carries marker files under
//! `share/ament_index/resource_index/rosidl_interfaces/<package>` listing the
//! package's interface files relative to `share/<package>/`, one per line
//! (`msg/Bool.msg`, `srv/SetBool.srv`, `action/Fibonacci.action`, plus
//! generated `.idl` entries which are ignored here).

use crate::catalog::OutputLocation;
use crate::interface::{InterfaceDefinition, InterfaceKind};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const RESOURCE_INDEX_DIR: &str = "share/ament_index/resource_index/rosidl_interfaces";
pub const PREFIX_PATH_ENV: &str = "AMENT_PREFIX_PATH";

/// One interface file found in an install prefix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceSource {
    pub location: OutputLocation,
    pub path: PathBuf,
}

impl InterfaceSource {
    pub fn load(&self) -> Result<InterfaceDefinition> {
        InterfaceDefinition::load(
            self.location.package(),
            self.location.name(),
            self.location.kind(),
            &self.path,
        )
    }
}

/// Install prefixes from `AMENT_PREFIX_PATH`, in overlay order.
pub fn prefixes_from_env() -> Vec<PathBuf> {
    env::var_os(PREFIX_PATH_ENV)
        .map(|raw| {
            env::split_paths(&raw)
                .filter(|path| !path.as_os_str().is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// List the interfaces of every prefix, restricted to `selected` packages
/// when that is non-empty.
///
/// Prefixes are visited in the order given; packages in sorted order; within
/// a package messages come first, then services, then actions, each sorted by
/// name. A package present in several prefixes is listed once per prefix.
pub fn discover(prefixes: &[PathBuf], selected: &[String]) -> Result<Vec<InterfaceSource>> {
    let selected: BTreeSet<&str> = selected.iter().map(String::as_str).collect();
    let mut sources = Vec::new();

    for prefix in prefixes {
        let index_dir = prefix.join(RESOURCE_INDEX_DIR);
        if !index_dir.is_dir() {
            log::debug!("no interface index under {}", prefix.display());
            continue;
        }

        for package in index_packages(&index_dir)? {
            if !selected.is_empty() && !selected.contains(package.as_str()) {
                continue;
            }
            let marker = index_dir.join(&package);
            let contents = fs::read_to_string(&marker)
                .with_context(|| format!("reading resource index {}", marker.display()))?;
            let share_dir = prefix.join("share").join(&package);
            sources.extend(package_sources(&package, &share_dir, &contents));
        }
    }

    log::info!("discovered {} interface file(s)", sources.len());
    Ok(sources)
}

fn index_packages(index_dir: &Path) -> Result<Vec<String>> {
    let mut packages = Vec::new();
    for entry in fs::read_dir(index_dir)
        .with_context(|| format!("listing resource index {}", index_dir.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", index_dir.display()))?;
        if !entry.path().is_file() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) if !name.starts_with('.') => packages.push(name),
            Ok(_) => {}
            Err(name) => log::warn!("skipping non UTF-8 package entry {name:?}"),
        }
    }
    packages.sort();
    Ok(packages)
}

fn package_sources(package: &str, share_dir: &Path, contents: &str) -> Vec<InterfaceSource> {
    let mut entries: Vec<(InterfaceKind, &str, &str)> = contents
        .lines()
        .map(str::trim)
        .filter_map(|line| parse_index_entry(line).map(|(kind, name)| (kind, name, line)))
        .collect();
    entries.sort();
    entries.dedup();

    entries
        .into_iter()
        .map(|(kind, name, relative)| InterfaceSource {
            location: OutputLocation::new(package, kind, name),
            path: share_dir.join(relative),
        })
        .collect()
}

/// Parse `msg/Bool.msg` into its kind and name. Entries whose extension does
/// not match their directory (including `.idl`) are skipped.
pub fn parse_index_entry(entry: &str) -> Option<(InterfaceKind, &str)> {
    let (dir, file) = entry.split_once('/')?;
    let kind = InterfaceKind::from_dir_name(dir)?;
    let (name, ext) = file.rsplit_once('.')?;
    if ext != kind.extension() || name.is_empty() || name.contains('/') {
        return None;
    }
    Some((kind, name))
}

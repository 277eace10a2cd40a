//! Site-level pages: the package list, one index per package, and the
//! stylesheet every page links to.

use crate::catalog::{InterfaceCatalog, OutputLocation, relative_path};
use crate::interface::InterfaceKind;
use crate::output::OutputWriter;
use crate::render::PageRenderer;
use crate::templates::{
    INDEX_FILE, PACKAGE_INDEX_TEMPLATE, SITE_INDEX_TEMPLATE, STYLESHEET, STYLESHEET_FILE,
};
use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

#[derive(Serialize)]
struct SiteIndex<'a> {
    packages: Vec<PackageLink<'a>>,
    stylesheet: String,
    timestamp: String,
}

#[derive(Serialize)]
struct PackageLink<'a> {
    name: &'a str,
    href: String,
    count: usize,
}

#[derive(Serialize)]
struct PackageIndex<'a> {
    package: &'a str,
    groups: Vec<KindGroup<'a>>,
    stylesheet: String,
    site_index: String,
    timestamp: String,
}

#[derive(Serialize)]
struct KindGroup<'a> {
    dir: &'static str,
    label: &'static str,
    entries: Vec<IndexEntry<'a>>,
}

#[derive(Serialize)]
struct IndexEntry<'a> {
    name: &'a str,
    href: String,
}

/// Write the stylesheet, the site index and every package index.
pub fn write_site(
    catalog: &InterfaceCatalog,
    renderer: &PageRenderer,
    writer: &OutputWriter,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();
    written.push(writer.write(Path::new(STYLESHEET_FILE), STYLESHEET.as_bytes())?);

    let packages = catalog.packages();
    let site = render_site_index(&packages, renderer)?;
    written.push(writer.write(Path::new(INDEX_FILE), site.as_bytes())?);

    for (package, locations) in &packages {
        let html = render_package_index(package, locations, renderer)?;
        written.push(writer.write(&Path::new(package).join(INDEX_FILE), html.as_bytes())?);
    }
    Ok(written)
}

fn render_site_index(
    packages: &BTreeMap<&str, Vec<&OutputLocation>>,
    renderer: &PageRenderer,
) -> Result<String> {
    let root = Path::new("");
    let index = SiteIndex {
        packages: packages
            .iter()
            .map(|(name, locations)| PackageLink {
                name: *name,
                href: relative_path(root, &Path::new(name).join(INDEX_FILE)),
                count: locations.len(),
            })
            .collect(),
        stylesheet: relative_path(root, Path::new(STYLESHEET_FILE)),
        timestamp: renderer.timestamp(),
    };
    renderer
        .render_serialized(SITE_INDEX_TEMPLATE, &index)
        .context("rendering site index")
}

fn render_package_index(
    package: &str,
    locations: &[&OutputLocation],
    renderer: &PageRenderer,
) -> Result<String> {
    let package_dir = Path::new(package);
    let groups = InterfaceKind::ALL
        .into_iter()
        .map(|kind| KindGroup {
            dir: kind.dir_name(),
            label: kind.plural_label(),
            entries: locations
                .iter()
                .filter(|location| location.kind() == kind)
                .map(|location| IndexEntry {
                    name: location.name(),
                    href: relative_path(package_dir, &location.relative_file()),
                })
                .collect(),
        })
        .filter(|group| !group.entries.is_empty())
        .collect();

    let index = PackageIndex {
        package,
        groups,
        stylesheet: relative_path(package_dir, Path::new(STYLESHEET_FILE)),
        site_index: relative_path(package_dir, Path::new(INDEX_FILE)),
        timestamp: renderer.timestamp(),
    };
    renderer
        .render_serialized(PACKAGE_INDEX_TEMPLATE, &index)
        .with_context(|| format!("rendering index for package {package}"))
}

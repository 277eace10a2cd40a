//! Two-phase documentation run.
//!
//! Phase 1 discovers every interface and fills the catalog. Phase 2 renders
//! and writes one page per cataloged interface in parallel; workers share the
//! catalog and the renderer by reference and write to distinct paths. A
//! failing interface is reported and never stops its siblings. The index
//! pages and stylesheet are written last.

use crate::catalog::InterfaceCatalog;
use crate::output::OutputWriter;
use crate::render::PageRenderer;
use crate::site::write_site;
use crate::workspace::{InterfaceSource, discover};
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use rayon::prelude::*;
use std::path::PathBuf;

pub const DEFAULT_OUTPUT_DIR: &str = "api";
/// Subdirectory of the output directory that holds the generated site.
pub const HTML_DIR: &str = "html";

#[derive(Clone, Debug)]
pub struct GenerateOptions {
    pub output_dir: PathBuf,
    /// Install prefixes to scan, in overlay order.
    pub prefixes: Vec<PathBuf>,
    /// Packages to document; empty means all.
    pub packages: Vec<String>,
    /// Fixed generation time; the current time when `None`.
    pub generated_at: Option<DateTime<Utc>>,
}

impl GenerateOptions {
    pub fn new(output_dir: impl Into<PathBuf>, prefixes: Vec<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            prefixes,
            packages: Vec::new(),
            generated_at: None,
        }
    }

    /// Root of the generated site: `<output_dir>/html`.
    pub fn html_root(&self) -> PathBuf {
        self.output_dir.join(HTML_DIR)
    }
}

#[derive(Debug)]
pub struct InterfaceFailure {
    /// `package/kind/Name` of the interface that failed.
    pub interface: String,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct GenerateReport {
    pub pages: Vec<PathBuf>,
    pub site_files: Vec<PathBuf>,
    pub failures: Vec<InterfaceFailure>,
    /// Duplicate registrations ignored while building the catalog.
    pub conflicts: usize,
}

impl GenerateReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn generate(options: &GenerateOptions) -> Result<GenerateReport> {
    if options.prefixes.is_empty() {
        bail!("no install prefixes to scan; pass --prefix or set AMENT_PREFIX_PATH");
    }

    let sources = discover(&options.prefixes, &options.packages)?;
    let (catalog, accepted) = build_catalog(&sources);
    log::info!(
        "cataloged {} interface(s) ({} duplicate(s) ignored)",
        catalog.len(),
        catalog.conflicts()
    );

    let renderer = match options.generated_at {
        Some(at) => PageRenderer::at(at)?,
        None => PageRenderer::new()?,
    };
    let writer = OutputWriter::new(options.html_root());

    let outcomes: Vec<(&InterfaceSource, Result<PathBuf>)> = accepted
        .par_iter()
        .map(|source| (*source, render_one(source, &catalog, &renderer, &writer)))
        .collect();

    let mut report = GenerateReport {
        conflicts: catalog.conflicts(),
        ..GenerateReport::default()
    };
    // Index pages only list interfaces whose page was written.
    let mut published = InterfaceCatalog::default();
    for (source, outcome) in outcomes {
        match outcome {
            Ok(path) => {
                published.register(source.location.clone());
                report.pages.push(path);
            }
            Err(error) => {
                log::error!("{}: {error:#}", source.location);
                report.failures.push(InterfaceFailure {
                    interface: source.location.to_string(),
                    error,
                });
            }
        }
    }

    report.site_files = write_site(&published, &renderer, &writer)?;

    log::info!(
        "wrote {} page(s) under {}; {} failure(s)",
        report.pages.len(),
        writer.root().display(),
        report.failures.len()
    );
    Ok(report)
}

/// Phase 1: register every source. Returns the frozen catalog and the
/// sources whose registration was accepted, in discovery order.
pub fn build_catalog(sources: &[InterfaceSource]) -> (InterfaceCatalog, Vec<&InterfaceSource>) {
    let mut catalog = InterfaceCatalog::default();
    let accepted: Vec<&InterfaceSource> = sources
        .iter()
        .filter(|source| catalog.register(source.location.clone()))
        .collect();
    (catalog, accepted)
}

/// Phase 2 for a single interface: load, render and write its page.
pub fn render_one(
    source: &InterfaceSource,
    catalog: &InterfaceCatalog,
    renderer: &PageRenderer,
    writer: &OutputWriter,
) -> Result<PathBuf> {
    let definition = source.load()?;
    let page = renderer.render_page(&definition, catalog)?;
    let path = writer.write_page(&page)?;
    log::debug!("wrote {}", path.display());
    Ok(path)
}

//! Per-interface page assembly and rendering.
//!
//! `PageRenderer` turns one parsed definition into a page: it resolves field
//! links against the catalog, checks that the resolved records still line up
//! with the parsed ones, builds the template context and runs the bundled
//! interface template. It holds no per-page state, so one renderer serves
//! every worker of a run.

use crate::annotate::annotate_raw_text;
use crate::catalog::{InterfaceCatalog, OutputLocation, relative_path};
use crate::interface::{Constant, Field, InterfaceDefinition};
use crate::links::LinkResolver;
use crate::templates::{self, INDEX_FILE, INTERFACE_TEMPLATE, STYLESHEET_FILE};
use anyhow::Context as _;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use tera::{Context, Tera};
use thiserror::Error;

/// Format of the generation time stamped into every page.
pub const TIMESTAMP_FORMAT: &str = "%a, %d %b %Y %H:%M:%S UTC";

#[derive(Debug, Error)]
pub enum PageError {
    #[error("{interface}: {expected} section(s) parsed but {found} resolved")]
    SectionMismatch {
        interface: String,
        expected: usize,
        found: usize,
    },
    #[error("{interface}: section {section:?} has {expected} field(s) but {found} were resolved")]
    FieldMismatch {
        interface: String,
        section: String,
        expected: usize,
        found: usize,
    },
    #[error(
        "{interface}: resolved field {index} of section {section:?} is '{found}', expected '{expected}'"
    )]
    FieldOrder {
        interface: String,
        section: String,
        index: usize,
        expected: String,
        found: String,
    },
    #[error("{interface}: template rendering failed")]
    Template {
        interface: String,
        #[source]
        source: tera::Error,
    },
}

#[derive(Clone, Debug, Serialize)]
pub struct SectionContext {
    pub label: String,
    pub constants: Vec<Constant>,
    pub fields: Vec<Field>,
}

/// Values handed to the interface template.
///
/// The flat `constant_*`, `field_*` and `relative_paths` columns are derived
/// from `sections`, so their lengths always agree.
#[derive(Clone, Debug, Serialize)]
pub struct PageContext {
    pub interface_name: String,
    pub interface_package: String,
    #[serde(rename = "type")]
    pub kind_label: String,
    pub ext: String,
    pub raw_text: String,
    pub constant_names: Vec<String>,
    pub constant_types: Vec<String>,
    pub field_types: Vec<String>,
    pub field_names: Vec<String>,
    pub field_default_values: Vec<String>,
    pub relative_paths: Vec<String>,
    pub sections: Vec<SectionContext>,
    pub stylesheet: String,
    pub site_index: String,
    pub package_index: String,
    pub timestamp: String,
}

impl PageContext {
    /// Number of field rows the page will show.
    pub fn field_rows(&self) -> usize {
        self.sections.iter().map(|section| section.fields.len()).sum()
    }
}

#[derive(Clone, Debug)]
pub struct RenderedPage {
    pub location: OutputLocation,
    pub bytes: Vec<u8>,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug)]
pub struct PageRenderer {
    tera: Tera,
    generated_at: DateTime<Utc>,
}

impl PageRenderer {
    /// Renderer stamping the current wall-clock time.
    pub fn new() -> anyhow::Result<Self> {
        Self::at(Utc::now())
    }

    /// Renderer stamping a fixed generation time.
    pub fn at(generated_at: DateTime<Utc>) -> anyhow::Result<Self> {
        let tera = templates::load().context("loading bundled templates")?;
        Ok(Self { tera, generated_at })
    }

    pub fn timestamp(&self) -> String {
        self.generated_at.format(TIMESTAMP_FORMAT).to_string()
    }

    /// Resolve, assemble and render the page for `definition`.
    pub fn render_page(
        &self,
        definition: &InterfaceDefinition,
        catalog: &InterfaceCatalog,
    ) -> Result<RenderedPage, PageError> {
        let location = definition.location();
        let resolver = LinkResolver::new(catalog, &location);
        let resolved = definition
            .sections
            .iter()
            .map(|section| resolver.resolve_section(section))
            .collect();
        let context = self.assemble(definition, resolved)?;
        let html = self.render_serialized(INTERFACE_TEMPLATE, &context).map_err(|source| {
            PageError::Template {
                interface: definition.qualified_name(),
                source,
            }
        })?;
        Ok(RenderedPage {
            location,
            bytes: html.into_bytes(),
            generated_at: self.generated_at,
        })
    }

    /// Build the template context from a definition and its resolved fields,
    /// one list per section.
    ///
    /// Fails when the resolved records do not line up with the parsed ones:
    /// a different number of sections or fields, or a field name out of
    /// place. No context, and therefore no page, is produced in that case.
    pub fn assemble(
        &self,
        definition: &InterfaceDefinition,
        resolved: Vec<Vec<Field>>,
    ) -> Result<PageContext, PageError> {
        let interface = definition.qualified_name();
        if resolved.len() != definition.sections.len() {
            return Err(PageError::SectionMismatch {
                interface,
                expected: definition.sections.len(),
                found: resolved.len(),
            });
        }

        let mut sections = Vec::with_capacity(resolved.len());
        for (section, fields) in definition.sections.iter().zip(resolved) {
            if fields.len() != section.fields.len() {
                return Err(PageError::FieldMismatch {
                    interface,
                    section: section.label.clone(),
                    expected: section.fields.len(),
                    found: fields.len(),
                });
            }
            if let Some((index, (parsed, found))) = section
                .fields
                .iter()
                .zip(&fields)
                .enumerate()
                .find(|(_, (parsed, found))| parsed.name != found.name)
            {
                return Err(PageError::FieldOrder {
                    interface,
                    section: section.label.clone(),
                    index,
                    expected: parsed.name.clone(),
                    found: found.name.clone(),
                });
            }
            sections.push(SectionContext {
                label: section.label.clone(),
                constants: section.constants.clone(),
                fields,
            });
        }

        let fields = || sections.iter().flat_map(|s| s.fields.iter());
        let location = definition.location();
        let page_dir = location.dir();

        Ok(PageContext {
            interface_name: definition.name.clone(),
            interface_package: definition.package.clone(),
            kind_label: definition.kind.label().to_string(),
            ext: definition.kind.extension().to_string(),
            raw_text: annotate_raw_text(&definition.raw_text),
            constant_names: definition.constants().map(|c| c.name.clone()).collect(),
            constant_types: definition.constants().map(|c| c.type_name.clone()).collect(),
            field_types: fields().map(|f| f.type_name.clone()).collect(),
            field_names: fields().map(|f| f.name.clone()).collect(),
            field_default_values: fields().map(|f| f.default_value.clone()).collect(),
            relative_paths: fields().map(|f| f.link.clone()).collect(),
            stylesheet: relative_path(&page_dir, Path::new(STYLESHEET_FILE)),
            site_index: relative_path(&page_dir, Path::new(INDEX_FILE)),
            package_index: relative_path(
                &page_dir,
                &Path::new(&definition.package).join(INDEX_FILE),
            ),
            timestamp: self.timestamp(),
            sections,
        })
    }

    pub(crate) fn render_serialized<T: Serialize>(
        &self,
        template: &str,
        value: &T,
    ) -> tera::Result<String> {
        let context = Context::from_serialize(value)?;
        self.tera.render(template, &context)
    }
}

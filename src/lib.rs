//! Static HTML documentation for ROS 2 interface definitions.
//!
//! A run catalogs every message, service and action found in the install
//! prefixes, then renders one page per interface showing its raw definition
//! (comments highlighted, all text escaped) and a compact definition whose
//! field types link to the pages of the interfaces they name.

pub mod annotate;
pub mod catalog;
pub mod generate;
pub mod interface;
pub mod links;
pub mod output;
pub mod render;
pub mod site;
pub mod templates;
pub mod workspace;

pub use annotate::{AnnotatedLine, annotate_raw_text, split_comment};
pub use catalog::{InterfaceCatalog, InterfaceId, OutputLocation, relative_path};
pub use generate::{
    DEFAULT_OUTPUT_DIR, GenerateOptions, GenerateReport, HTML_DIR, InterfaceFailure, generate,
};
pub use interface::{Constant, Field, InterfaceDefinition, InterfaceKind, Section};
pub use links::{LinkResolver, PRIMITIVE_TYPES, TypeRef, base_type};
pub use output::OutputWriter;
pub use render::{PageContext, PageError, PageRenderer, RenderedPage, TIMESTAMP_FORMAT};
pub use workspace::{InterfaceSource, discover, prefixes_from_env};

/// Split a comma and/or whitespace separated list, dropping empty items.
pub fn split_list(value: &str) -> Vec<String> {
    value
        .replace(',', " ")
        .split_whitespace()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

//! Embedded page templates.
//!
//! Templates are compiled into the binary and registered under `.html`
//! names, so Tera autoescapes every interpolated value. Only the
//! pre-annotated raw block is marked `safe` in the interface template.

use tera::Tera;

pub const INTERFACE_TEMPLATE: &str = "interface.html";
pub const PACKAGE_INDEX_TEMPLATE: &str = "package_index.html";
pub const SITE_INDEX_TEMPLATE: &str = "index.html";

/// File name of the stylesheet at the output root.
pub const STYLESHEET_FILE: &str = "styles.css";
/// File name of the site and per-package index pages.
pub const INDEX_FILE: &str = "index.html";

pub const STYLESHEET: &str = include_str!("../templates/styles.css");

pub(crate) fn load() -> tera::Result<Tera> {
    let mut tera = Tera::default();
    tera.add_raw_templates(vec![
        (
            INTERFACE_TEMPLATE,
            include_str!("../templates/interface.html"),
        ),
        (
            PACKAGE_INDEX_TEMPLATE,
            include_str!("../templates/package_index.html"),
        ),
        (SITE_INDEX_TEMPLATE, include_str!("../templates/index.html")),
    ])?;
    Ok(tera)
}

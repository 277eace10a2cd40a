//! Field type references and their resolution to hyperlinks.

use crate::catalog::{InterfaceCatalog, OutputLocation};
use crate::interface::{Field, Section};

/// Built-in field types. These never link, whatever the catalog holds.
pub const PRIMITIVE_TYPES: &[&str] = &[
    "bool", "byte", "char", "float32", "float64", "int8", "uint8", "int16", "uint16", "int32",
    "uint32", "int64", "uint64", "string", "wstring",
];

/// Strip container and bound decorations from a declared field type.
///
/// `geometry_msgs/Point[<=3]` -> `geometry_msgs/Point`,
/// `string<=10` -> `string`, `sequence<int32, 5>` -> `int32`.
pub fn base_type(declared: &str) -> &str {
    let mut base = declared.trim();
    if let Some(inner) = base.strip_prefix("sequence<") {
        let inner = inner.strip_suffix('>').unwrap_or(inner);
        base = inner.split(',').next().unwrap_or(inner).trim();
    }
    if let Some(idx) = base.find('[') {
        base = &base[..idx];
    }
    if let Some(idx) = base.find("<=") {
        base = &base[..idx];
    }
    base.trim()
}

/// A declared type reduced to an optional package and a type name.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeRef<'a> {
    pub package: Option<&'a str>,
    pub name: &'a str,
}

impl<'a> TypeRef<'a> {
    /// Accepts `Name`, `pkg/Name`, `pkg/msg/Name` and `pkg::msg::Name`, with
    /// any decorations [`base_type`] understands.
    pub fn parse(declared: &'a str) -> Self {
        let base = base_type(declared);
        let segments: Vec<&str> = if base.contains("::") {
            base.split("::").collect()
        } else {
            base.split('/').collect()
        };
        match segments.as_slice() {
            [first, .., last] if !first.is_empty() => TypeRef {
                package: Some(*first),
                name: *last,
            },
            _ => TypeRef {
                package: None,
                name: segments.last().copied().unwrap_or(base),
            },
        }
    }

    /// Only unqualified built-in names are primitive.
    pub fn is_primitive(&self) -> bool {
        self.package.is_none() && PRIMITIVE_TYPES.contains(&self.name)
    }
}

/// Resolves field types for one page against the frozen catalog.
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    catalog: &'a InterfaceCatalog,
    page: &'a OutputLocation,
}

impl<'a> LinkResolver<'a> {
    pub fn new(catalog: &'a InterfaceCatalog, page: &'a OutputLocation) -> Self {
        Self { catalog, page }
    }

    /// Relative href to the page documenting `declared`, if any.
    pub fn link_for(&self, declared: &str) -> Option<String> {
        self.catalog
            .resolve(self.page.package(), declared)
            .map(|target| target.href_from(self.page))
    }

    /// Copy of `field` with `link` set; unresolved types get an empty link.
    pub fn resolve_field(&self, field: &Field) -> Field {
        Field {
            link: self.link_for(&field.type_name).unwrap_or_default(),
            ..field.clone()
        }
    }

    pub fn resolve_section(&self, section: &Section) -> Vec<Field> {
        section
            .fields
            .iter()
            .map(|field| self.resolve_field(field))
            .collect()
    }
}

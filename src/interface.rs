//! Interface definitions as parsed from `.msg`, `.srv` and `.action` files.
//!
//! A definition keeps the authored text verbatim (for the raw block on the
//! page) next to its decomposition into labelled sections of constants and
//! fields. Services and actions are split on `---` separator lines; messages
//! have a single unlabelled section.

use crate::annotate::split_comment;
use crate::catalog::OutputLocation;
use anyhow::{Context, Result, bail};
use serde::Serialize;
use std::fmt;
use std::fs;
use std::path::Path;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InterfaceKind {
    Message,
    Service,
    Action,
}

impl InterfaceKind {
    /// Scan order used by discovery and index pages.
    pub const ALL: [InterfaceKind; 3] = [
        InterfaceKind::Message,
        InterfaceKind::Service,
        InterfaceKind::Action,
    ];

    /// Output (and share/) subdirectory for this kind.
    pub fn dir_name(&self) -> &'static str {
        match self {
            InterfaceKind::Message => "msg",
            InterfaceKind::Service => "srv",
            InterfaceKind::Action => "action",
        }
    }

    /// Source file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        self.dir_name()
    }

    pub fn label(&self) -> &'static str {
        match self {
            InterfaceKind::Message => "Message",
            InterfaceKind::Service => "Service",
            InterfaceKind::Action => "Action",
        }
    }

    pub fn plural_label(&self) -> &'static str {
        match self {
            InterfaceKind::Message => "Messages",
            InterfaceKind::Service => "Services",
            InterfaceKind::Action => "Actions",
        }
    }

    /// Labels of the `---`-separated sections, in file order.
    pub fn section_labels(&self) -> &'static [&'static str] {
        match self {
            InterfaceKind::Message => &[""],
            InterfaceKind::Service => &["Request", "Response"],
            InterfaceKind::Action => &["Goal", "Result", "Feedback"],
        }
    }

    pub fn from_dir_name(value: &str) -> Option<Self> {
        InterfaceKind::ALL
            .into_iter()
            .find(|kind| kind.dir_name() == value)
    }
}

impl fmt::Display for InterfaceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Constant {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub value: String,
}

/// One data member of an interface.
///
/// `link` is empty until the field has been passed through a
/// [`LinkResolver`](crate::links::LinkResolver); it stays empty for primitive
/// and unresolved types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Field {
    #[serde(rename = "type")]
    pub type_name: String,
    pub name: String,
    pub default_value: String,
    pub link: String,
}

impl Field {
    pub fn new(type_name: &str, name: &str, default_value: &str) -> Self {
        Self {
            type_name: type_name.to_string(),
            name: name.to_string(),
            default_value: default_value.to_string(),
            link: String::new(),
        }
    }

    pub fn is_linked(&self) -> bool {
        !self.link.is_empty()
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Section {
    pub label: String,
    pub constants: Vec<Constant>,
    pub fields: Vec<Field>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InterfaceDefinition {
    pub package: String,
    pub name: String,
    pub kind: InterfaceKind,
    pub raw_text: String,
    pub sections: Vec<Section>,
}

impl InterfaceDefinition {
    /// Read and decompose the interface file at `path`.
    pub fn load(package: &str, name: &str, kind: InterfaceKind, path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading interface file {}", path.display()))?;
        Self::parse(package, name, kind, raw.trim_end())
            .with_context(|| format!("parsing {}", path.display()))
    }

    pub fn parse(package: &str, name: &str, kind: InterfaceKind, raw_text: &str) -> Result<Self> {
        let labels = kind.section_labels();
        let mut sections: Vec<Section> = vec![Section::default()];

        for (idx, line) in raw_text.lines().enumerate() {
            let (code, _) = split_comment(line);
            let code = code.trim();
            if code.is_empty() {
                continue;
            }
            if code == "---" {
                if sections.len() == labels.len() {
                    bail!(
                        "line {}: {} definitions have at most {} section(s)",
                        idx + 1,
                        kind.label(),
                        labels.len()
                    );
                }
                sections.push(Section::default());
                continue;
            }

            let Some((type_name, rest)) = code.split_once(char::is_whitespace) else {
                log::warn!(
                    "{package}/{name}: line {} declares type '{code}' without a name; skipped",
                    idx + 1
                );
                continue;
            };
            let rest = rest.trim();
            let current = sections
                .last_mut()
                .context("section list is never empty")?;

            // `NAME=VALUE` (spaces around `=` allowed) is a constant; anything
            // after a plain name is the field's default value.
            let name_end = rest
                .find(|c: char| c.is_whitespace() || c == '=')
                .unwrap_or(rest.len());
            let (item_name, after) = rest.split_at(name_end);
            let after = after.trim_start();
            if let Some(value) = after.strip_prefix('=') {
                current.constants.push(Constant {
                    type_name: type_name.to_string(),
                    name: item_name.to_string(),
                    value: value.trim().to_string(),
                });
            } else {
                current
                    .fields
                    .push(Field::new(type_name, item_name, after.trim_end()));
            }
        }

        sections.resize_with(labels.len(), Section::default);
        for (section, label) in sections.iter_mut().zip(labels) {
            section.label = label.to_string();
        }

        Ok(Self {
            package: package.to_string(),
            name: name.to_string(),
            kind,
            raw_text: raw_text.to_string(),
            sections,
        })
    }

    /// `package/kind/Name`, the identifier used in logs and failure reports.
    pub fn qualified_name(&self) -> String {
        self.location().to_string()
    }

    pub fn location(&self) -> OutputLocation {
        OutputLocation::new(&self.package, self.kind, &self.name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.sections.iter().flat_map(|section| section.fields.iter())
    }

    pub fn constants(&self) -> impl Iterator<Item = &Constant> {
        self.sections
            .iter()
            .flat_map(|section| section.constants.iter())
    }
}

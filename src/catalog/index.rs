//! Workspace-wide index of interfaces and their output pages.
//!
//! The catalog is filled completely before any page is rendered so forward
//! and cross-package references resolve regardless of discovery order. After
//! that it is only read, and is shared by reference across render workers.
//! Lookups for unknown types return `None`; they are never errors.
//!
//! Pages are keyed by their full location, so `demo/msg/Foo` and
//! `demo/srv/Foo` are both documented. Type lookups are keyed by package and
//! name only; when kinds share a name the message answers, since field types
//! always name messages.

use crate::catalog::OutputLocation;
use crate::interface::InterfaceKind;
use crate::links::TypeRef;
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};

/// Package used for an unqualified `Header` the owner package does not define.
const HEADER_FALLBACK_PACKAGE: &str = "std_msgs";

/// Lookup key for type references: package plus type name.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct InterfaceId {
    pub package: String,
    pub name: String,
}

impl InterfaceId {
    pub fn new(package: &str, name: &str) -> Self {
        Self {
            package: package.to_string(),
            name: name.to_string(),
        }
    }
}

#[derive(Debug, Default)]
pub struct InterfaceCatalog {
    pages: BTreeSet<OutputLocation>,
    by_id: BTreeMap<InterfaceId, OutputLocation>,
    conflicts: usize,
}

impl InterfaceCatalog {
    /// Register one interface. Returns `false` when the same location was
    /// already registered; the first registration is kept and the conflict
    /// is logged.
    pub fn register(&mut self, location: OutputLocation) -> bool {
        if self.pages.contains(&location) {
            log::warn!("duplicate interface {location}: keeping the first registration");
            self.conflicts += 1;
            return false;
        }

        let id = InterfaceId::new(location.package(), location.name());
        match self.by_id.entry(id) {
            Entry::Vacant(slot) => {
                slot.insert(location.clone());
            }
            Entry::Occupied(mut slot) => {
                if location.kind() == InterfaceKind::Message
                    && slot.get().kind() != InterfaceKind::Message
                {
                    slot.insert(location.clone());
                }
            }
        }
        self.pages.insert(location);
        true
    }

    /// Look up the page documenting `declared` as seen from `owner_package`.
    ///
    /// Decorations are stripped first; primitive types never resolve.
    pub fn resolve(&self, owner_package: &str, declared: &str) -> Option<&OutputLocation> {
        let type_ref = TypeRef::parse(declared);
        if type_ref.is_primitive() || type_ref.name.is_empty() {
            return None;
        }
        match type_ref.package {
            Some(package) => self.get(package, type_ref.name),
            None => self.get(owner_package, type_ref.name).or_else(|| {
                (type_ref.name == "Header")
                    .then(|| self.get(HEADER_FALLBACK_PACKAGE, type_ref.name))
                    .flatten()
            }),
        }
    }

    pub fn get(&self, package: &str, name: &str) -> Option<&OutputLocation> {
        self.by_id.get(&InterfaceId::new(package, name))
    }

    /// Number of pages the catalog documents.
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Number of registrations rejected as duplicates.
    pub fn conflicts(&self) -> usize {
        self.conflicts
    }

    /// Locations grouped by package, packages in sorted order.
    pub fn packages(&self) -> BTreeMap<&str, Vec<&OutputLocation>> {
        let mut packages: BTreeMap<&str, Vec<&OutputLocation>> = BTreeMap::new();
        for location in &self.pages {
            packages.entry(location.package()).or_default().push(location);
        }
        packages
    }
}

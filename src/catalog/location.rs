//! Output locations and the relative-path arithmetic between them.

use crate::interface::InterfaceKind;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Where an interface's page lives, relative to the output root:
/// `<package>/<kind-dir>/<Name>.html`.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OutputLocation {
    package: String,
    kind: InterfaceKind,
    name: String,
}

impl OutputLocation {
    pub fn new(package: &str, kind: InterfaceKind, name: &str) -> Self {
        Self {
            package: package.to_string(),
            kind,
            name: name.to_string(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn kind(&self) -> InterfaceKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Directory holding the page, relative to the output root.
    pub fn dir(&self) -> PathBuf {
        Path::new(&self.package).join(self.kind.dir_name())
    }

    pub fn file_name(&self) -> String {
        format!("{}.html", self.name)
    }

    /// Page path relative to the output root.
    pub fn relative_file(&self) -> PathBuf {
        self.dir().join(self.file_name())
    }

    /// Hyperlink from the page at `from` to this page.
    pub fn href_from(&self, from: &OutputLocation) -> String {
        relative_path(&from.dir(), &self.relative_file())
    }
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.package, self.kind, self.name)
    }
}

/// Relative URL path from directory `from_dir` to `target`.
///
/// Both paths are interpreted lexically against the same root; `.` and `..`
/// components are normalized first and the filesystem is never consulted.
/// Separators are always `/` so the result can be used as an href.
pub fn relative_path(from_dir: &Path, target: &Path) -> String {
    let from = normalize(from_dir);
    let to = normalize(target);

    let common = from
        .iter()
        .zip(to.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::new();
    parts.extend(std::iter::repeat_n("..", from.len() - common));
    parts.extend(to[common..].iter().map(String::as_str));

    if parts.is_empty() {
        ".".to_string()
    } else {
        parts.join("/")
    }
}

fn normalize(path: &Path) -> Vec<String> {
    let mut parts: Vec<String> = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy().into_owned()),
            Component::ParentDir => {
                parts.pop();
            }
            Component::CurDir | Component::RootDir | Component::Prefix(_) => {}
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_directory_is_a_bare_file_name() {
        let from = OutputLocation::new("std_msgs", InterfaceKind::Message, "Header");
        let to = OutputLocation::new("std_msgs", InterfaceKind::Message, "ColorRGBA");
        assert_eq!(to.href_from(&from), "ColorRGBA.html");
    }

    #[test]
    fn other_kind_in_same_package() {
        let from = OutputLocation::new("demo", InterfaceKind::Service, "Add");
        let to = OutputLocation::new("demo", InterfaceKind::Message, "Pair");
        assert_eq!(to.href_from(&from), "../msg/Pair.html");
    }

    #[test]
    fn other_package() {
        let from = OutputLocation::new("demo", InterfaceKind::Action, "Move");
        let to = OutputLocation::new("action_msgs", InterfaceKind::Message, "GoalStatus");
        assert_eq!(to.href_from(&from), "../../action_msgs/msg/GoalStatus.html");
    }

    #[test]
    fn normalizes_dot_components() {
        assert_eq!(
            relative_path(Path::new("a/./b/../c"), Path::new("a/c/d/x.html")),
            "d/x.html"
        );
        assert_eq!(relative_path(Path::new("a/b"), Path::new("a/b")), ".");
        assert_eq!(relative_path(Path::new(""), Path::new("styles.css")), "styles.css");
    }

    #[test]
    fn joining_the_href_reaches_the_target() {
        let from = OutputLocation::new("nav_msgs", InterfaceKind::Message, "Odometry");
        let to = OutputLocation::new("geometry_msgs", InterfaceKind::Message, "Pose");
        let joined = from.dir().join(to.href_from(&from));
        assert_eq!(normalize(&joined), normalize(&to.relative_file()));
    }
}

//! Project-relative asset paths
//!
//! Asset paths always use `/` separators and never carry leading, trailing or
//! doubled separators, so plain string comparisons between them are stable.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A normalized, project-relative asset path (e.g. `Assets/Menus/Tools.asset`)
///
/// The empty path denotes the project root itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AssetPath(String);

impl AssetPath {
    /// Normalize a raw path string
    pub fn new(raw: impl AsRef<str>) -> Self {
        let raw = raw.as_ref().replace('\\', "/");
        let normalized = raw
            .split('/')
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    /// The project root
    pub fn root() -> Self {
        Self(String::new())
    }

    /// Build an asset path from a relative filesystem path
    ///
    /// Returns None if the path escapes the project (`..`) or is absolute.
    pub fn from_relative(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(Self(segments.join("/")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Containing folder; the root has no parent
    pub fn parent(&self) -> Option<AssetPath> {
        if self.is_root() {
            return None;
        }
        match self.0.rsplit_once('/') {
            Some((parent, _)) => Some(Self(parent.to_string())),
            None => Some(Self::root()),
        }
    }

    /// Last path segment
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }

    /// File name without its final extension (`Foo.cs.txt` -> `Foo.cs`)
    pub fn stem(&self) -> &str {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => name,
            Some(dot) => &name[..dot],
        }
    }

    /// Final extension without the dot, if any
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(dot) => Some(&name[dot + 1..]),
        }
    }

    pub fn join(&self, name: impl AsRef<str>) -> AssetPath {
        if self.is_root() {
            Self::new(name)
        } else {
            Self::new(format!("{}/{}", self.0, name.as_ref()))
        }
    }

    /// ASCII case-insensitive suffix test
    pub fn ends_with_ignore_case(&self, suffix: &str) -> bool {
        let path = self.0.as_bytes();
        let suffix = suffix.as_bytes();
        path.len() >= suffix.len() && path[path.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
    }

    /// Segment-aware containment: true if `self` equals `root` or lies below it
    pub fn is_within(&self, root: &AssetPath) -> bool {
        if root.is_root() || self.0 == root.0 {
            return true;
        }
        self.0
            .strip_prefix(root.as_str())
            .is_some_and(|rest| rest.starts_with('/'))
    }

    /// Raw string-prefix test (`Foo/Templates` also matches `Foo/TemplatesExtra`)
    pub fn starts_with_str(&self, root: &AssetPath) -> bool {
        self.0.starts_with(root.as_str())
    }

    /// Resolve against a filesystem base directory
    pub fn to_fs_path(&self, base: &Path) -> PathBuf {
        let mut path = base.to_path_buf();
        for segment in self.0.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for AssetPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for AssetPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<AssetPath> for String {
    fn from(path: AssetPath) -> Self {
        path.0
    }
}

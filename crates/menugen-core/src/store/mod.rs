//! Asset store abstraction
//!
//! This module provides:
//! - The `AssetStore` trait: the query surface of the host that owns assets
//! - Asset value types (AssetPath, AssetId, AssetKind, NamePattern)
//! - `FsAssetStore`, a filesystem-backed store with an explicit refresh step

pub mod fs;
pub mod path;

use crate::error::StoreError;
use crate::menu::MenuConfig;
use std::fmt;

pub use fs::FsAssetStore;
pub use path::AssetPath;

/// Opaque handle returned by asset searches
///
/// Resolve it to a path with [`AssetStore::path_of`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetId(String);

impl AssetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Declared type of an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    MenuConfig,
    Text,
    Folder,
    Other,
}

impl AssetKind {
    pub fn is_menu_config(&self) -> bool {
        matches!(self, AssetKind::MenuConfig)
    }

    pub fn is_text(&self) -> bool {
        matches!(self, AssetKind::Text)
    }
}

impl fmt::Display for AssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AssetKind::MenuConfig => "menu config",
            AssetKind::Text => "text",
            AssetKind::Folder => "folder",
            AssetKind::Other => "other",
        };
        f.write_str(name)
    }
}

/// Filter applied to asset names during a search
///
/// Asset names are file names without their final extension, so the text
/// asset `Foo.cs.txt` is named `Foo.cs`. Matching ignores ASCII case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamePattern {
    Any,
    Exact(String),
    /// `*.cs` matches by suffix, `Script*` by prefix, anything else exactly
    Glob(String),
}

impl NamePattern {
    pub fn matches(&self, name: &str) -> bool {
        match self {
            NamePattern::Any => true,
            NamePattern::Exact(expected) => name.eq_ignore_ascii_case(expected),
            NamePattern::Glob(pattern) => {
                if let Some(suffix) = pattern.strip_prefix('*') {
                    ends_with_ignore_case(name, suffix)
                } else if let Some(prefix) = pattern.strip_suffix('*') {
                    starts_with_ignore_case(name, prefix)
                } else {
                    name.eq_ignore_ascii_case(pattern)
                }
            }
        }
    }
}

fn ends_with_ignore_case(name: &str, suffix: &str) -> bool {
    let (name, suffix) = (name.as_bytes(), suffix.as_bytes());
    name.len() >= suffix.len() && name[name.len() - suffix.len()..].eq_ignore_ascii_case(suffix)
}

fn starts_with_ignore_case(name: &str, prefix: &str) -> bool {
    let (name, prefix) = (name.as_bytes(), prefix.as_bytes());
    name.len() >= prefix.len() && name[..prefix.len()].eq_ignore_ascii_case(prefix)
}

/// Query and mutation surface of the host that owns the assets
///
/// All calls are synchronous. Searches reflect the store's index, which only
/// picks up files written through `write_text` after `refresh` is called.
pub trait AssetStore {
    /// Find assets of `kind` whose name matches `pattern`
    ///
    /// When `folders` is non-empty, only assets located anywhere below one of
    /// those folders are returned.
    fn find_assets(&self, kind: AssetKind, pattern: &NamePattern, folders: &[AssetPath]) -> Vec<AssetId>;

    /// Resolve a search handle to its path
    fn path_of(&self, id: &AssetId) -> Option<AssetPath>;

    /// Declared type of the asset at `path`, or None if it is unknown
    fn kind_of(&self, path: &AssetPath) -> Option<AssetKind>;

    /// Load a menu configuration object
    fn load_menu_config(&self, path: &AssetPath) -> Result<MenuConfig, StoreError>;

    /// Load the contents of a text asset
    fn load_text(&self, path: &AssetPath) -> Result<String, StoreError>;

    fn is_folder(&self, path: &AssetPath) -> bool;

    /// Create the single folder `name` inside an existing `parent`
    fn create_folder(&mut self, parent: &AssetPath, name: &str) -> Result<AssetPath, StoreError>;

    /// Overwrite (or create) a text file in full
    fn write_text(&mut self, path: &AssetPath, contents: &str) -> Result<(), StoreError>;

    /// Re-scan storage so newly written files become visible to searches
    fn refresh(&mut self) -> Result<(), StoreError>;
}

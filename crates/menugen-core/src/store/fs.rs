//! Filesystem-backed asset store
//!
//! Files are classified by extension:
//! - `*.asset` - menu configuration (YAML body)
//! - `*.txt`   - text asset
//! - directories are folders, everything else is `Other`
//!
//! Searches run against an index built by `refresh`. Writes go straight to
//! disk and stay invisible to searches until the next refresh.

use super::{AssetId, AssetKind, AssetPath, AssetStore, NamePattern};
use crate::error::StoreError;
use crate::menu::MenuConfig;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Extension of menu configuration files
pub const MENU_CONFIG_EXTENSION: &str = "asset";

/// Extension of text assets
pub const TEXT_EXTENSION: &str = "txt";

#[derive(Debug, Clone)]
struct IndexedAsset {
    path: AssetPath,
    kind: AssetKind,
}

/// Asset store rooted at a project directory
#[derive(Debug)]
pub struct FsAssetStore {
    root: PathBuf,
    /// Assets in walk order (sorted by file name within each folder)
    index: Vec<IndexedAsset>,
    by_path: HashMap<AssetPath, usize>,
}

impl FsAssetStore {
    /// Open a project directory and build the initial index
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let mut store = Self {
            root: root.into(),
            index: Vec::new(),
            by_path: HashMap::new(),
        };
        store.refresh()?;
        Ok(store)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Absolute filesystem path of an asset
    pub fn absolute(&self, path: &AssetPath) -> PathBuf {
        path.to_fs_path(&self.root)
    }

    /// Asset path of an absolute filesystem path inside the project
    pub fn relative(&self, absolute: &Path) -> Option<AssetPath> {
        let relative = absolute.strip_prefix(&self.root).ok()?;
        AssetPath::from_relative(relative)
    }

    fn classify(entry: &DirEntry) -> AssetKind {
        if entry.file_type().is_dir() {
            return AssetKind::Folder;
        }
        let extension = entry
            .path()
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());
        match extension.as_deref() {
            Some(MENU_CONFIG_EXTENSION) => AssetKind::MenuConfig,
            Some(TEXT_EXTENSION) => AssetKind::Text,
            _ => AssetKind::Other,
        }
    }

    fn scan(&self) -> Result<Vec<IndexedAsset>, StoreError> {
        let mut assets = Vec::new();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden(entry));

        for entry in walker {
            let entry = entry.map_err(|e| StoreError::Io {
                path: e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| self.root.clone()),
                source: e.into(),
            })?;

            let Some(path) = self.relative(entry.path()) else {
                continue;
            };
            assets.push(IndexedAsset {
                kind: Self::classify(&entry),
                path,
            });
        }

        Ok(assets)
    }

    fn read(&self, path: &AssetPath) -> Result<String, StoreError> {
        let absolute = self.absolute(path);
        std::fs::read_to_string(&absolute).map_err(|source| StoreError::Io {
            path: absolute,
            source,
        })
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.'))
}

impl AssetStore for FsAssetStore {
    fn find_assets(&self, kind: AssetKind, pattern: &NamePattern, folders: &[AssetPath]) -> Vec<AssetId> {
        self.index
            .iter()
            .filter(|asset| asset.kind == kind)
            .filter(|asset| pattern.matches(asset.path.stem()))
            .filter(|asset| {
                folders.is_empty()
                    || folders
                        .iter()
                        .any(|folder| asset.path != *folder && asset.path.is_within(folder))
            })
            .map(|asset| AssetId::new(asset.path.as_str()))
            .collect()
    }

    fn path_of(&self, id: &AssetId) -> Option<AssetPath> {
        let path = AssetPath::new(id.as_str());
        self.by_path.contains_key(&path).then_some(path)
    }

    fn kind_of(&self, path: &AssetPath) -> Option<AssetKind> {
        self.by_path.get(path).map(|&i| self.index[i].kind)
    }

    fn load_menu_config(&self, path: &AssetPath) -> Result<MenuConfig, StoreError> {
        if !path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(MENU_CONFIG_EXTENSION))
        {
            return Err(StoreError::WrongKind {
                path: path.clone(),
                expected: AssetKind::MenuConfig,
            });
        }

        let content = self.read(path)?;
        // A file caught mid-write is typically still empty
        if content.trim().is_empty() {
            return Err(StoreError::Empty { path: path.clone() });
        }

        let mut config: MenuConfig =
            serde_yaml::from_str(&content).map_err(|source| StoreError::Parse {
                path: path.clone(),
                source,
            })?;
        config.location = path.clone();
        Ok(config)
    }

    fn load_text(&self, path: &AssetPath) -> Result<String, StoreError> {
        if !self.absolute(path).is_file() {
            return Err(StoreError::NotFound { path: path.clone() });
        }
        self.read(path)
    }

    fn is_folder(&self, path: &AssetPath) -> bool {
        self.absolute(path).is_dir()
    }

    fn create_folder(&mut self, parent: &AssetPath, name: &str) -> Result<AssetPath, StoreError> {
        if !self.is_folder(parent) {
            return Err(StoreError::MissingParent {
                parent: parent.clone(),
            });
        }

        let folder = parent.join(name);
        let absolute = self.absolute(&folder);
        std::fs::create_dir(&absolute).map_err(|source| StoreError::Io {
            path: absolute,
            source,
        })?;
        Ok(folder)
    }

    fn write_text(&mut self, path: &AssetPath, contents: &str) -> Result<(), StoreError> {
        let absolute = self.absolute(path);
        std::fs::write(&absolute, contents).map_err(|source| StoreError::Io {
            path: absolute,
            source,
        })
    }

    fn refresh(&mut self) -> Result<(), StoreError> {
        let index = self.scan()?;
        self.by_path = index
            .iter()
            .enumerate()
            .map(|(i, asset)| (asset.path.clone(), i))
            .collect();
        self.index = index;
        tracing::debug!(assets = self.index.len(), root = %self.root.display(), "asset index refreshed");
        Ok(())
    }
}

//! Pass-scoped cache and template root resolution

use crate::config::GeneratorConfig;
use crate::menu::config::template_root_of;
use crate::store::{AssetKind, AssetPath, AssetStore, NamePattern};

/// State shared by the classifier and generator for a single pass
///
/// Built when a batch arrives and dropped when it has been handled, so roots
/// resolved for one batch never leak into the next.
#[derive(Debug)]
pub struct PassContext<'a> {
    config: &'a GeneratorConfig,
    /// Menu config paths, looked up once per pass
    config_paths: Option<Vec<AssetPath>>,
    /// Resolved template roots; empty until the first successful resolution
    roots: Vec<AssetPath>,
}

impl<'a> PassContext<'a> {
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config,
            config_paths: None,
            roots: Vec::new(),
        }
    }

    pub fn config(&self) -> &'a GeneratorConfig {
        self.config
    }

    /// Paths of every menu configuration known to the store, in search order
    pub fn config_paths<S: AssetStore>(&mut self, store: &S) -> &[AssetPath] {
        self.config_paths.get_or_insert_with(|| {
            store
                .find_assets(AssetKind::MenuConfig, &NamePattern::Any, &[])
                .iter()
                .filter_map(|id| store.path_of(id))
                .collect()
        })
    }

    /// Deduplicated template roots, or None while no menu config exists
    pub fn resolve_roots<S: AssetStore>(&mut self, store: &S) -> Option<&[AssetPath]> {
        if self.roots.is_empty() {
            let config = self.config;
            let mut roots: Vec<AssetPath> = Vec::new();
            for path in self.config_paths(store) {
                let root = template_root_of(path, &config.templates_folder);
                if !roots.contains(&root) {
                    roots.push(root);
                }
            }

            if roots.is_empty() {
                tracing::debug!("no menu configs found; template roots not ready");
                return None;
            }
            self.roots = roots;
        }

        Some(&self.roots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsAssetStore;
    use std::fs;

    #[test]
    fn test_not_ready_without_configs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets")).unwrap();
        let store = FsAssetStore::open(dir.path()).unwrap();
        let config = GeneratorConfig::default();
        let mut ctx = PassContext::new(&config);

        assert!(ctx.resolve_roots(&store).is_none());
    }

    #[test]
    fn test_roots_deduplicated_in_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets/A")).unwrap();
        fs::create_dir_all(dir.path().join("Assets/B")).unwrap();
        fs::write(dir.path().join("Assets/A/One.asset"), "{}").unwrap();
        fs::write(dir.path().join("Assets/A/Two.asset"), "{}").unwrap();
        fs::write(dir.path().join("Assets/B/Three.asset"), "{}").unwrap();
        let store = FsAssetStore::open(dir.path()).unwrap();
        let config = GeneratorConfig::default();
        let mut ctx = PassContext::new(&config);

        let roots: Vec<String> = ctx
            .resolve_roots(&store)
            .unwrap()
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(roots, vec!["Assets/A/Templates", "Assets/B/Templates"]);
        assert_eq!(ctx.config_paths(&store).len(), 3);
    }

    #[test]
    fn test_roots_cached_for_the_pass() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets/A")).unwrap();
        fs::write(dir.path().join("Assets/A/One.asset"), "{}").unwrap();
        let mut store = FsAssetStore::open(dir.path()).unwrap();
        let config = GeneratorConfig::default();
        let mut ctx = PassContext::new(&config);
        assert_eq!(ctx.resolve_roots(&store).unwrap().len(), 1);

        fs::create_dir_all(dir.path().join("Assets/B")).unwrap();
        fs::write(dir.path().join("Assets/B/Two.asset"), "{}").unwrap();
        store.refresh().unwrap();

        assert_eq!(ctx.resolve_roots(&store).unwrap().len(), 1);
        let mut next_pass = PassContext::new(&config);
        assert_eq!(next_pass.resolve_roots(&store).unwrap().len(), 2);
    }
}

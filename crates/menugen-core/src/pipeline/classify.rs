//! Decides whether a changed asset should trigger regeneration

use super::roots::PassContext;
use crate::store::{AssetPath, AssetStore};

/// True if a change to `path` requires the menu modules to be regenerated
///
/// - Menu configs count only when they load; a half-written file does not.
/// - Text assets count when they carry the template suffix and sit inside a
///   resolved template root.
pub fn is_relevant<S: AssetStore>(ctx: &mut PassContext<'_>, store: &S, path: &AssetPath) -> bool {
    let Some(kind) = store.kind_of(path) else {
        tracing::debug!(%path, "not indexed; ignoring");
        return false;
    };

    if kind.is_menu_config() {
        return match store.load_menu_config(path) {
            Ok(_) => true,
            Err(e) => {
                tracing::debug!(%path, "menu config not loadable yet: {e}");
                false
            }
        };
    }

    if kind.is_text() {
        return is_relevant_template(ctx, store, path);
    }

    false
}

fn is_relevant_template<S: AssetStore>(ctx: &mut PassContext<'_>, store: &S, path: &AssetPath) -> bool {
    let config = ctx.config();
    if !path.ends_with_ignore_case(&config.template_suffix()) {
        return false;
    }

    let Some(folder) = path.parent() else {
        return false;
    };
    let Some(roots) = ctx.resolve_roots(store) else {
        return false;
    };

    let relevant = roots
        .iter()
        .any(|root| config.containment.contains(root, &folder));
    tracing::debug!(%path, relevant, "classified template change");
    relevant
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Containment, GeneratorConfig};
    use crate::store::FsAssetStore;
    use std::fs;

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        fs::create_dir_all(root.join("Assets/Menus/Templates/Nested")).unwrap();
        fs::create_dir_all(root.join("Assets/Menus/TemplatesExtra")).unwrap();
        fs::create_dir_all(root.join("Assets/Other")).unwrap();
        fs::write(root.join("Assets/Menus/Tools.asset"), "submenu_label: Tools\n").unwrap();
        fs::write(root.join("Assets/Menus/Templates/Foo.cs.txt"), "").unwrap();
        fs::write(root.join("Assets/Menus/Templates/Nested/Deep.CS.TXT"), "").unwrap();
        fs::write(root.join("Assets/Menus/Templates/Readme.txt"), "").unwrap();
        fs::write(root.join("Assets/Menus/TemplatesExtra/Bar.cs.txt"), "").unwrap();
        fs::write(root.join("Assets/Other/Foo.cs.txt"), "").unwrap();
        fs::write(root.join("Assets/Other/Broken.asset"), "").unwrap();
        fs::write(root.join("Assets/Other/Physics.asset"), "gravity: -9.81\nlayers: 32\n").unwrap();
        fs::write(root.join("Assets/Other/Script.cs"), "").unwrap();
        dir
    }

    fn check(config: &GeneratorConfig, store: &FsAssetStore, path: &str) -> bool {
        let mut ctx = PassContext::new(config);
        is_relevant(&mut ctx, store, &AssetPath::new(path))
    }

    #[test]
    fn test_loadable_menu_config_is_relevant() {
        let dir = project();
        let store = FsAssetStore::open(dir.path()).unwrap();
        let config = GeneratorConfig::default();

        assert!(check(&config, &store, "Assets/Menus/Tools.asset"));
        assert!(!check(&config, &store, "Assets/Other/Broken.asset"));
    }

    #[test]
    fn test_foreign_asset_record_is_irrelevant() {
        let dir = project();
        let store = FsAssetStore::open(dir.path()).unwrap();

        assert!(!check(&GeneratorConfig::default(), &store, "Assets/Other/Physics.asset"));
    }

    #[test]
    fn test_templates_inside_roots() {
        let dir = project();
        let store = FsAssetStore::open(dir.path()).unwrap();
        let config = GeneratorConfig::default();

        assert!(check(&config, &store, "Assets/Menus/Templates/Foo.cs.txt"));
        assert!(check(&config, &store, "Assets/Menus/Templates/Nested/Deep.CS.TXT"));
    }

    #[test]
    fn test_irrelevant_text_assets() {
        let dir = project();
        let store = FsAssetStore::open(dir.path()).unwrap();
        let config = GeneratorConfig::default();

        assert!(!check(&config, &store, "Assets/Menus/Templates/Readme.txt"));
        assert!(!check(&config, &store, "Assets/Other/Foo.cs.txt"));
        assert!(!check(&config, &store, "Assets/Other/Script.cs"));
        assert!(!check(&config, &store, "Assets/Missing.cs.txt"));
    }

    #[test]
    fn test_sibling_folder_depends_on_containment() {
        let dir = project();
        let store = FsAssetStore::open(dir.path()).unwrap();
        let sibling = "Assets/Menus/TemplatesExtra/Bar.cs.txt";

        assert!(!check(&GeneratorConfig::default(), &store, sibling));

        let legacy = GeneratorConfig {
            containment: Containment::Prefix,
            ..GeneratorConfig::default()
        };
        assert!(check(&legacy, &store, sibling));
    }

    #[test]
    fn test_templates_ignored_without_configs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets/Templates")).unwrap();
        fs::write(dir.path().join("Assets/Templates/Foo.cs.txt"), "").unwrap();
        let store = FsAssetStore::open(dir.path()).unwrap();

        assert!(!check(&GeneratorConfig::default(), &store, "Assets/Templates/Foo.cs.txt"));
    }
}

//! Creates missing template folders and seeds them with the example template

use crate::config::GeneratorConfig;
use crate::error::StoreError;
use crate::store::{AssetKind, AssetPath, AssetStore, NamePattern};

/// What `ensure_template_folder` did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bootstrap {
    /// The folder was already there
    Existing,
    /// Created, but no example template was found to copy
    Created,
    /// Created and seeded with a copy of the example at the given path
    Seeded(AssetPath),
}

/// Make sure `root` exists; seed a freshly created folder with the example template
///
/// When an example is copied the store is refreshed, so the new file shows up
/// in searches made later in the same pass.
pub fn ensure_template_folder<S: AssetStore>(
    store: &mut S,
    root: &AssetPath,
    config: &GeneratorConfig,
) -> Result<Bootstrap, StoreError> {
    if store.is_folder(root) {
        return Ok(Bootstrap::Existing);
    }

    ensure_folder(store, root)?;
    tracing::info!(%root, "created template folder");

    let examples = store.find_assets(
        AssetKind::Text,
        &NamePattern::Exact(config.example_asset_name()),
        &[],
    );
    let Some(example) = examples.iter().find_map(|id| store.path_of(id)) else {
        tracing::debug!(name = %config.example_asset_name(), "no example template; leaving folder empty");
        return Ok(Bootstrap::Created);
    };

    let text = store.load_text(&example)?;
    let seeded = root.join(config.example_file_name());
    store.write_text(&seeded, &text)?;
    store.refresh()?;
    tracing::info!(from = %example, to = %seeded, "seeded example template");

    Ok(Bootstrap::Seeded(seeded))
}

/// Create `path` and any missing ancestors, one leaf at a time
fn ensure_folder<S: AssetStore>(store: &mut S, path: &AssetPath) -> Result<(), StoreError> {
    if path.is_root() || store.is_folder(path) {
        return Ok(());
    }

    let parent = path.parent().unwrap_or_default();
    ensure_folder(store, &parent)?;
    store.create_folder(&parent, path.file_name())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::FsAssetStore;
    use std::fs;

    #[test]
    fn test_existing_folder_untouched() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets/Menus/Templates")).unwrap();
        let mut store = FsAssetStore::open(dir.path()).unwrap();

        let outcome = ensure_template_folder(
            &mut store,
            &"Assets/Menus/Templates".into(),
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome, Bootstrap::Existing);
        assert_eq!(fs::read_dir(dir.path().join("Assets/Menus/Templates")).unwrap().count(), 0);
    }

    #[test]
    fn test_created_empty_without_example() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Assets/Menus")).unwrap();
        let mut store = FsAssetStore::open(dir.path()).unwrap();

        let outcome = ensure_template_folder(
            &mut store,
            &"Assets/Menus/Templates".into(),
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome, Bootstrap::Created);
        assert!(dir.path().join("Assets/Menus/Templates").is_dir());
    }

    #[test]
    fn test_seeds_example_and_refreshes() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("Packages/Menu")).unwrap();
        fs::create_dir_all(dir.path().join("Assets/Menus")).unwrap();
        fs::write(
            dir.path().join("Packages/Menu/ScriptTemplateExample.cs.txt"),
            "public class #SCRIPTNAME# {}",
        )
        .unwrap();
        let mut store = FsAssetStore::open(dir.path()).unwrap();

        let outcome = ensure_template_folder(
            &mut store,
            &"Assets/Menus/Templates".into(),
            &GeneratorConfig::default(),
        )
        .unwrap();

        let seeded = AssetPath::new("Assets/Menus/Templates/ScriptTemplateExample.cs.txt");
        assert_eq!(outcome, Bootstrap::Seeded(seeded.clone()));
        assert_eq!(store.load_text(&seeded).unwrap(), "public class #SCRIPTNAME# {}");
        assert_eq!(store.kind_of(&seeded), Some(AssetKind::Text));
    }

    #[test]
    fn test_creates_missing_ancestors() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FsAssetStore::open(dir.path()).unwrap();

        ensure_template_folder(
            &mut store,
            &"Assets/Deep/Menus/Templates".into(),
            &GeneratorConfig::default(),
        )
        .unwrap();
        assert!(dir.path().join("Assets/Deep/Menus/Templates").is_dir());
    }
}

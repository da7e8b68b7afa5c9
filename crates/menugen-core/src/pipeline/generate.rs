//! Regenerates the menu module of every known configuration

use super::bootstrap::{ensure_template_folder, Bootstrap};
use super::ids::IdCounter;
use super::roots::PassContext;
use crate::config::GeneratorConfig;
use crate::error::{PipelineError, WriteFailure};
use crate::menu::{MenuConfig, MenuEntry, MenuModule};
use crate::store::{AssetKind, AssetPath, AssetStore, NamePattern};

/// Summary of one regeneration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    /// Generated module paths, in config order
    pub written: Vec<AssetPath>,
    /// Menu configs that could not be loaded
    pub skipped: Vec<AssetPath>,
    /// Template folders created during the pass
    pub bootstrapped: Vec<AssetPath>,
    /// Identifiers handed out (containers and entries)
    pub ids_consumed: u64,
}

/// Regenerate every configuration's module, then refresh the store once
///
/// A config that fails to load is skipped. A failed write does not stop the
/// remaining configs; all failures are reported together after the refresh.
pub fn generate_all<S: AssetStore>(
    store: &mut S,
    ctx: &mut PassContext<'_>,
    ids: &mut IdCounter,
) -> Result<GenerationReport, PipelineError> {
    let config = ctx.config();
    let first_id = ids.peek();
    let mut report = GenerationReport::default();
    let mut failures = Vec::new();

    let config_paths = ctx.config_paths(&*store).to_vec();
    for path in config_paths {
        let menu = match store.load_menu_config(&path) {
            Ok(menu) => menu,
            Err(e) => {
                tracing::warn!(%path, "skipping menu config: {e}");
                report.skipped.push(path);
                continue;
            }
        };

        match generate_one(store, config, &menu, ids) {
            Ok((output, bootstrap)) => {
                if bootstrap != Bootstrap::Existing {
                    report.bootstrapped.push(menu.template_root(&config.templates_folder));
                }
                report.written.push(output);
            }
            Err(failure) => {
                tracing::error!(path = %failure.path, "failed to generate menu module: {}", failure.source);
                failures.push(failure);
            }
        }
    }

    let refreshed = store.refresh();
    report.ids_consumed = ids.peek() - first_id;

    if !failures.is_empty() {
        return Err(PipelineError::WriteFailed {
            failures,
            refresh: refreshed.err(),
        });
    }
    refreshed?;
    Ok(report)
}

fn generate_one<S: AssetStore>(
    store: &mut S,
    config: &GeneratorConfig,
    menu: &MenuConfig,
    ids: &mut IdCounter,
) -> Result<(AssetPath, Bootstrap), WriteFailure> {
    let root = menu.template_root(&config.templates_folder);
    let bootstrap = ensure_template_folder(store, &root, config).map_err(|source| WriteFailure {
        path: root.clone(),
        source,
    })?;

    let templates = scan_templates(&*store, config, &root);
    let module = build_module(config, menu, &templates, ids);

    let output = menu.output_path(&config.language_extension);
    store
        .write_text(&output, &module.render(config))
        .map_err(|source| WriteFailure {
            path: output.clone(),
            source,
        })?;

    tracing::info!(
        path = %output,
        templates = module.entries.len(),
        "wrote menu module"
    );
    Ok((output, bootstrap))
}

/// Template files anywhere below `root`, in search order unless sorting is enabled
pub fn scan_templates<S: AssetStore>(store: &S, config: &GeneratorConfig, root: &AssetPath) -> Vec<AssetPath> {
    let suffix = config.template_suffix();
    let mut templates: Vec<AssetPath> = store
        .find_assets(
            AssetKind::Text,
            &NamePattern::Glob(config.template_name_glob()),
            std::slice::from_ref(root),
        )
        .iter()
        .filter_map(|id| store.path_of(id))
        .filter(|path| path.ends_with_ignore_case(&suffix))
        .collect();

    if config.sort_templates {
        templates.sort_by(|a, b| template_base_name(a, &suffix).cmp(template_base_name(b, &suffix)));
    }
    templates
}

/// Assemble a module: the container takes the next id, then one id per template
pub fn build_module(
    config: &GeneratorConfig,
    menu: &MenuConfig,
    templates: &[AssetPath],
    ids: &mut IdCounter,
) -> MenuModule {
    let suffix = config.template_suffix();
    let container_id = ids.next_id();

    let entries = templates
        .iter()
        .map(|template| {
            let base_name = template_base_name(template, &suffix);
            MenuEntry {
                id: ids.next_id(),
                label: format!("{}/{}", menu.submenu_label, base_name),
                template_path: template.clone(),
                target_name: format!("{}{}", menu.new_file_prefix, base_name),
            }
        })
        .collect();

    MenuModule {
        container_id,
        entries,
    }
}

/// File name without the template suffix (`Foo.cs.txt` -> `Foo`)
pub fn template_base_name<'p>(path: &'p AssetPath, suffix: &str) -> &'p str {
    let name = path.file_name();
    if path.ends_with_ignore_case(suffix) && name.len() > suffix.len() {
        &name[..name.len() - suffix.len()]
    } else {
        path.stem()
    }
}

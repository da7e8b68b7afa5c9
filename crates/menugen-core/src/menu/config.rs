//! Menu configuration records

use crate::store::AssetPath;
use serde::{Deserialize, Serialize};

/// A user-authored menu configuration
///
/// Persisted as YAML. `location` is not part of the file; the store fills it
/// in with the path the record was loaded from. Unknown keys are rejected so
/// that other `.asset` records never load as a menu configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MenuConfig {
    #[serde(skip)]
    pub location: AssetPath,

    /// Submenu under which every template command is listed
    #[serde(default = "default_submenu_label")]
    pub submenu_label: String,

    /// Prepended to a template's base name to form the new file's name
    #[serde(default = "default_new_file_prefix")]
    pub new_file_prefix: String,
}

fn default_submenu_label() -> String {
    "My Game".to_string()
}

fn default_new_file_prefix() -> String {
    "New".to_string()
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            location: AssetPath::default(),
            submenu_label: default_submenu_label(),
            new_file_prefix: default_new_file_prefix(),
        }
    }
}

impl MenuConfig {
    /// Folder holding the configuration file
    pub fn folder(&self) -> AssetPath {
        self.location.parent().unwrap_or_default()
    }

    /// `<config-folder>/<templates_folder>`
    pub fn template_root(&self, templates_folder: &str) -> AssetPath {
        template_root_of(&self.location, templates_folder)
    }

    /// `<config-folder>/<config-stem>.<extension>`
    pub fn output_path(&self, extension: &str) -> AssetPath {
        self.folder()
            .join(format!("{}.{}", self.location.stem(), extension))
    }
}

/// Template root derived from a configuration's own path
pub fn template_root_of(config_path: &AssetPath, templates_folder: &str) -> AssetPath {
    config_path
        .parent()
        .unwrap_or_default()
        .join(templates_folder)
}

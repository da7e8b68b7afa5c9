//! Generator settings loaded from `menugen.yaml`

use crate::store::AssetPath;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File looked up at the project root
pub const CONFIG_FILE_NAME: &str = "menugen.yaml";

/// How a template's folder is tested against a template root
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Containment {
    /// Folder equals the root or lies below it
    #[default]
    Segment,
    /// Raw string prefix; `Foo/Templates` also claims `Foo/TemplatesExtra`
    Prefix,
}

impl Containment {
    pub fn contains(&self, root: &AssetPath, folder: &AssetPath) -> bool {
        match self {
            Containment::Segment => folder.is_within(root),
            Containment::Prefix => folder.starts_with_str(root),
        }
    }
}

/// Settings shared by every regeneration pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// Folder name, next to each menu config, that holds its templates
    pub templates_folder: String,

    /// Source language extension (templates end in `.<ext>.txt`)
    pub language_extension: String,

    /// Asset name stem of the example template copied into new folders
    pub example_template: String,

    /// Menu path every submenu hangs from
    pub menu_root: String,

    pub menu_priority: i32,

    /// Namespace wrapping generated modules
    pub namespace: String,

    pub containment: Containment,

    /// Order templates by base name instead of search order
    pub sort_templates: bool,

    /// Quiet period before a changed file is reported by the watcher
    pub debounce_ms: u64,

    /// Default tracing filter
    pub log_level: String,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            templates_folder: "Templates".to_string(),
            language_extension: "cs".to_string(),
            example_template: "ScriptTemplateExample".to_string(),
            menu_root: "Assets/Create".to_string(),
            menu_priority: 80,
            namespace: "UnityScriptTemplate_Generated".to_string(),
            containment: Containment::Segment,
            sort_templates: false,
            debounce_ms: 300,
            log_level: "info".to_string(),
        }
    }
}

impl GeneratorConfig {
    /// Load `menugen.yaml` from the project root, falling back to defaults
    pub fn load(project_root: &Path) -> Result<Self> {
        let path = project_root.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content).context("Invalid generator configuration")
    }

    /// Two-part suffix marking a template file, e.g. `.cs.txt`
    pub fn template_suffix(&self) -> String {
        format!(".{}.txt", self.language_extension)
    }

    /// Asset-name glob matching templates, e.g. `*.cs`
    pub fn template_name_glob(&self) -> String {
        format!("*.{}", self.language_extension)
    }

    /// Asset name of the example template, e.g. `ScriptTemplateExample.cs`
    pub fn example_asset_name(&self) -> String {
        format!("{}.{}", self.example_template, self.language_extension)
    }

    /// File name the example is copied to, e.g. `ScriptTemplateExample.cs.txt`
    pub fn example_file_name(&self) -> String {
        format!("{}{}", self.example_template, self.template_suffix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GeneratorConfig::default();
        assert_eq!(config.template_suffix(), ".cs.txt");
        assert_eq!(config.template_name_glob(), "*.cs");
        assert_eq!(config.example_asset_name(), "ScriptTemplateExample.cs");
        assert_eq!(config.example_file_name(), "ScriptTemplateExample.cs.txt");
        assert_eq!(config.containment, Containment::Segment);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config = GeneratorConfig::from_yaml(
            "language_extension: js\ncontainment: prefix\nsort_templates: true\n",
        )
        .unwrap();
        assert_eq!(config.template_suffix(), ".js.txt");
        assert_eq!(config.containment, Containment::Prefix);
        assert!(config.sort_templates);
        assert_eq!(config.templates_folder, "Templates");
        assert_eq!(config.menu_priority, 80);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(GeneratorConfig::from_yaml("  \n").unwrap(), GeneratorConfig::default());
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(GeneratorConfig::from_yaml("menu_priority: [not a number").is_err());
        assert!(GeneratorConfig::from_yaml("containment: sideways").is_err());
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = GeneratorConfig::load(dir.path()).unwrap();
        assert_eq!(config, GeneratorConfig::default());
    }

    #[test]
    fn test_load_reads_project_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "menu_priority: 5\n").unwrap();
        let config = GeneratorConfig::load(dir.path()).unwrap();
        assert_eq!(config.menu_priority, 5);
    }

    #[test]
    fn test_containment_modes() {
        let root = AssetPath::new("Foo/Templates");
        let sibling = AssetPath::new("Foo/TemplatesExtra");
        assert!(!Containment::Segment.contains(&root, &sibling));
        assert!(Containment::Prefix.contains(&root, &sibling));
        assert!(Containment::Segment.contains(&root, &AssetPath::new("Foo/Templates/A")));
    }
}

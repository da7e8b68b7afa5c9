//! Generated registration module model and its C# rendering

use crate::config::GeneratorConfig;
use crate::store::AssetPath;
use std::fmt;

/// One "create from template" command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    /// Unique within the pass; names the generated entry point
    pub id: u64,
    /// `<submenu>/<baseName>`
    pub label: String,
    pub template_path: AssetPath,
    /// `<prefix><baseName>`, without the language extension
    pub target_name: String,
}

/// Everything one generated module registers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuModule {
    /// Names the static container class
    pub container_id: u64,
    pub entries: Vec<MenuEntry>,
}

impl MenuModule {
    /// Render the module as C# source
    pub fn render(&self, config: &GeneratorConfig) -> String {
        ModuleSource {
            module: self,
            config,
        }
        .to_string()
    }
}

struct ModuleSource<'a> {
    module: &'a MenuModule,
    config: &'a GeneratorConfig,
}

impl fmt::Display for ModuleSource<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let config = self.config;

        writeln!(f, "using UnityEditor;")?;
        writeln!(f)?;
        writeln!(f, "namespace {}", config.namespace)?;
        writeln!(f, "{{")?;
        writeln!(
            f,
            "\tpublic static partial class ScriptCreateMenu_{}",
            self.module.container_id
        )?;
        writeln!(f, "\t{{")?;

        writeln!(f, "\t\tpublic static void CreateScript(string templatePath, string scriptName)")?;
        writeln!(f, "\t\t{{")?;
        writeln!(f, "\t\t\tProjectWindowUtil.CreateScriptAssetFromTemplateFile(")?;
        writeln!(f, "\t\t\t\ttemplatePath,")?;
        writeln!(
            f,
            "\t\t\t\tscriptName + \"{}\");",
            escape(&format!(".{}", config.language_extension))
        )?;
        writeln!(f, "\t\t}}")?;

        for entry in &self.module.entries {
            let menu_path = format!("{}/{}", config.menu_root.trim_end_matches('/'), entry.label);

            writeln!(f)?;
            writeln!(
                f,
                "\t\t[MenuItem(\"{}\", priority = {})]",
                escape(&menu_path),
                config.menu_priority
            )?;
            writeln!(f, "\t\tpublic static void Create_{}()", entry.id)?;
            writeln!(f, "\t\t{{")?;
            writeln!(f, "\t\t\tCreateScript(")?;
            writeln!(f, "\t\t\t\t\"{}\",", escape(entry.template_path.as_str()))?;
            writeln!(f, "\t\t\t\t\"{}\");", escape(&entry.target_name))?;
            writeln!(f, "\t\t}}")?;
        }

        writeln!(f, "\t}}")?;
        writeln!(f, "}}")
    }
}

/// Escape text for a C# regular string literal
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_module() -> MenuModule {
        MenuModule {
            container_id: 10,
            entries: vec![
                MenuEntry {
                    id: 11,
                    label: "Tools/A".to_string(),
                    template_path: AssetPath::new("Assets/Menus/Templates/A.cs.txt"),
                    target_name: "NewA".to_string(),
                },
                MenuEntry {
                    id: 12,
                    label: "Tools/B".to_string(),
                    template_path: AssetPath::new("Assets/Menus/Templates/B.cs.txt"),
                    target_name: "NewB".to_string(),
                },
            ],
        }
    }

    #[test]
    fn test_render_contains_container_and_entries() {
        let source = sample_module().render(&GeneratorConfig::default());

        assert!(source.starts_with("using UnityEditor;\n"));
        assert!(source.contains("namespace UnityScriptTemplate_Generated"));
        assert!(source.contains("public static partial class ScriptCreateMenu_10"));
        assert!(source.contains("[MenuItem(\"Assets/Create/Tools/A\", priority = 80)]"));
        assert!(source.contains("public static void Create_11()"));
        assert!(source.contains("\"Assets/Menus/Templates/B.cs.txt\","));
        assert!(source.contains("\"NewB\");"));
        assert!(source.contains("scriptName + \".cs\");"));
    }

    #[test]
    fn test_render_without_entries_keeps_shared_routine() {
        let module = MenuModule {
            container_id: 3,
            entries: Vec::new(),
        };
        let source = module.render(&GeneratorConfig::default());

        assert!(source.contains("ScriptCreateMenu_3"));
        assert!(source.contains("public static void CreateScript("));
        assert!(!source.contains("[MenuItem("));
    }

    #[test]
    fn test_braces_balance() {
        let source = sample_module().render(&GeneratorConfig::default());
        let open = source.matches('{').count();
        let close = source.matches('}').count();
        assert_eq!(open, close);
    }

    #[test]
    fn test_literals_are_escaped() {
        let module = MenuModule {
            container_id: 1,
            entries: vec![MenuEntry {
                id: 2,
                label: "My \"Game\"/A".to_string(),
                template_path: AssetPath::new("Assets/A.cs.txt"),
                target_name: "New\\A".to_string(),
            }],
        };
        let source = module.render(&GeneratorConfig::default());

        assert!(source.contains("Assets/Create/My \\\"Game\\\"/A"));
        assert!(source.contains("\"New\\\\A\");"));
    }
}

//! Plugins
//!
//! Two kinds of plugins contribute commands to the tree:
//!
//! - **Embedded plugins** are command bundles compiled into the CLI. They describe their
//!   commands in the plugin framework's own shape ([`PluginApp`] / [`PluginCommand`]) and
//!   are reshaped into [`CommandDescriptor`]s by a [`PluginFramework`].
//! - **Installed plugins** are executables found under the plugins directory
//!   (`<plugins>/<name>/bin/<name>`). Each one becomes a top-level command that forwards
//!   its arguments to the executable.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Context;
use tracing::{debug, warn};

use crate::{
    constants::OTHER_CATEGORY,
    descriptor::{Action, CommandDescriptor, FlagDescriptor},
    error::{CliError, CliResult, PluginError},
};

/// Self-describing command bundle of an embedded plugin
#[derive(Debug, Clone, Default)]
pub struct PluginApp {
    pub name: String,
    pub description: String,
    pub version: String,
    pub commands: Vec<PluginCommand>,
}

/// A plugin command as the plugin framework declares it
#[derive(Debug, Clone, Default)]
pub struct PluginCommand {
    pub name: String,
    pub aliases: Vec<String>,
    pub description: String,
    pub category: String,
    pub hidden: bool,
    pub arguments: Vec<PluginArgument>,
    pub flags: Vec<FlagDescriptor>,
    pub subcommands: Vec<PluginCommand>,
    pub action: Option<Action>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginArgument {
    pub name: String,
    pub description: String,
}

/// Reshapes a plugin's native commands into registry descriptors
pub trait PluginFramework {
    fn convert_app_commands(&self, app: &PluginApp) -> Result<Vec<CommandDescriptor>, PluginError>;
}

/// Default framework: a structural copy with integrity checks on every command
#[derive(Debug, Clone, Copy, Default)]
pub struct ComponentsFramework;

impl PluginFramework for ComponentsFramework {
    fn convert_app_commands(&self, app: &PluginApp) -> Result<Vec<CommandDescriptor>, PluginError> {
        app.commands.iter().map(convert_command).collect()
    }
}

fn convert_command(cmd: &PluginCommand) -> Result<CommandDescriptor, PluginError> {
    if cmd.name.trim().is_empty() {
        return Err(PluginError::EmptyName);
    }
    let mut seen = HashSet::new();
    for flag in &cmd.flags {
        if !seen.insert(flag.name.as_str()) {
            return Err(PluginError::DuplicateFlag {
                command: cmd.name.clone(),
                flag: flag.name.clone(),
            });
        }
    }
    if cmd.action.is_none() && cmd.subcommands.is_empty() {
        return Err(PluginError::MissingAction(cmd.name.clone()));
    }

    let subcommands = cmd
        .subcommands
        .iter()
        .map(convert_command)
        .collect::<Result<Vec<_>, _>>()?;

    let usage_text = cmd
        .arguments
        .iter()
        .map(|a| format!("\t{}\n\t\t{}", a.name, a.description))
        .collect::<Vec<_>>()
        .join("\n");
    let arg_names = cmd
        .arguments
        .iter()
        .map(|a| format!("<{}>", a.name))
        .collect::<Vec<_>>()
        .join(" ");

    Ok(CommandDescriptor {
        name: cmd.name.clone(),
        aliases: cmd.aliases.clone(),
        category: cmd.category.clone(),
        usage: cmd.description.clone(),
        usage_text,
        help_name: format!("{} [command options] {}", cmd.name, arg_names)
            .trim_end()
            .to_string(),
        hidden: cmd.hidden,
        skip_flag_parsing: false,
        flags: cmd.flags.clone(),
        subcommands,
        action: cmd.action.clone(),
        parent_path: Vec::new(),
    })
}

/// Convert an embedded plugin's commands into registry descriptors.
///
/// Top-level commands without a category are moved to the "Other" category before the
/// framework copies them. A conversion failure names the plugin and is fatal to startup.
pub fn convert_embedded_plugin(
    mut app: PluginApp,
    framework: &dyn PluginFramework,
) -> CliResult<Vec<CommandDescriptor>> {
    for cmd in &mut app.commands {
        if cmd.category.is_empty() {
            cmd.category = OTHER_CATEGORY.to_string();
        }
    }
    let converted = framework
        .convert_app_commands(&app)
        .map_err(|source| CliError::EmbeddedPlugin {
            plugin: app.name.clone(),
            source,
        })?;
    debug!(plugin = %app.name, count = converted.len(), "converted embedded plugin");
    Ok(converted)
}

/// Discover installed plugins and expose each as a top-level command.
///
/// A missing directory means no plugins are installed.
pub fn installed_plugins(dir: &Path) -> anyhow::Result<Vec<CommandDescriptor>> {
    if !dir.exists() {
        return Ok(Vec::new());
    }
    let entries =
        fs::read_dir(dir).with_context(|| format!("reading plugins directory {}", dir.display()))?;

    let mut commands = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        let executable = plugin_executable(&entry.path(), &name);
        if !executable.is_file() {
            warn!(plugin = %name, "plugin directory has no executable, skipping");
            continue;
        }
        commands.push(plugin_command(name, executable));
    }
    commands.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(commands)
}

fn plugin_executable(plugin_dir: &Path, name: &str) -> PathBuf {
    let file = if cfg!(windows) {
        format!("{name}.exe")
    } else {
        name.to_string()
    };
    plugin_dir.join("bin").join(file)
}

fn plugin_command(name: String, executable: PathBuf) -> CommandDescriptor {
    let plugin_name = name.clone();
    CommandDescriptor::new(&name)
        .usage("Plugin command")
        .skip_flag_parsing()
        .action(move |inv| {
            debug!(plugin = %plugin_name, args = ?inv.args, "running installed plugin");
            let status = Command::new(&executable)
                .args(&inv.args)
                .status()
                .with_context(|| format!("running plugin {}", executable.display()))?;
            if status.success() {
                Ok(())
            } else {
                Err(CliError::PluginExit {
                    name: plugin_name.clone(),
                    code: status.code().unwrap_or(1),
                }
                .into())
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn leaf(name: &str, category: &str) -> PluginCommand {
        PluginCommand {
            name: name.to_string(),
            category: category.to_string(),
            action: Some(Action::new(|_| Ok(()))),
            ..Default::default()
        }
    }

    struct Rejecting;

    impl PluginFramework for Rejecting {
        fn convert_app_commands(&self, _: &PluginApp) -> Result<Vec<CommandDescriptor>, PluginError> {
            Err(PluginError::EmptyName)
        }
    }

    #[test]
    fn test_empty_category_is_normalized_before_conversion() {
        let app = PluginApp {
            name: "security".into(),
            commands: vec![leaf("audit", "Security"), leaf("xr", "")],
            ..Default::default()
        };

        let converted = convert_embedded_plugin(app, &ComponentsFramework).unwrap();
        assert_eq!(converted[0].category, "Security");
        assert_eq!(converted[1].category, "Other");
    }

    #[test]
    fn test_conversion_error_names_the_plugin() {
        let app = PluginApp {
            name: "security".into(),
            commands: vec![leaf("audit", "")],
            ..Default::default()
        };

        let err = convert_embedded_plugin(app, &Rejecting).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed adding 'security' embedded plugin commands. Last error: a command of the plugin has an empty name"
        );
    }

    #[test]
    fn test_framework_rejects_duplicate_flags() {
        let mut cmd = leaf("scan", "");
        cmd.flags = vec![
            FlagDescriptor::string("watches", ""),
            FlagDescriptor::string("watches", ""),
        ];
        let app = PluginApp {
            name: "security".into(),
            commands: vec![cmd],
            ..Default::default()
        };

        let err = ComponentsFramework.convert_app_commands(&app).unwrap_err();
        assert_eq!(
            err,
            PluginError::DuplicateFlag {
                command: "scan".into(),
                flag: "watches".into()
            }
        );
    }

    #[test]
    fn test_framework_rejects_leaf_without_action() {
        let app = PluginApp {
            name: "security".into(),
            commands: vec![PluginCommand {
                name: "curation-audit".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let err = ComponentsFramework.convert_app_commands(&app).unwrap_err();
        assert_eq!(err, PluginError::MissingAction("curation-audit".into()));
    }

    #[test]
    fn test_arguments_feed_help_text() {
        let mut cmd = leaf("scan", "");
        cmd.arguments = vec![PluginArgument {
            name: "source pattern".into(),
            description: "Files to scan".into(),
        }];
        let app = PluginApp {
            name: "security".into(),
            commands: vec![cmd],
            ..Default::default()
        };

        let converted = ComponentsFramework.convert_app_commands(&app).unwrap();
        assert_eq!(converted[0].help_name, "scan [command options] <source pattern>");
        assert!(converted[0].usage_text.contains("Files to scan"));
    }

    #[test]
    fn test_installed_plugins_missing_dir() {
        let dir = TempDir::new().unwrap();
        let plugins = installed_plugins(&dir.path().join("plugins")).unwrap();
        assert!(plugins.is_empty());
    }

    #[test]
    fn test_installed_plugins_discovery() {
        let dir = TempDir::new().unwrap();
        let bin = dir.path().join("hello-frog").join("bin");
        fs::create_dir_all(&bin).unwrap();
        fs::write(plugin_executable(&dir.path().join("hello-frog"), "hello-frog"), "").unwrap();
        // no executable: skipped
        fs::create_dir_all(dir.path().join("broken").join("bin")).unwrap();

        let plugins = installed_plugins(dir.path()).unwrap();
        assert_eq!(plugins.len(), 1);
        assert_eq!(plugins[0].name, "hello-frog");
        assert!(plugins[0].skip_flag_parsing);
        assert!(plugins[0].action.is_some());
    }
}

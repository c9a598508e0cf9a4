//! `jf plugin`: plugin management
//!
//! Installing and publishing go through the platform; removing an installed plugin is a
//! local operation on the plugins directory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use tracing::info;

use crate::{
    constants::{CMD_PLUGIN, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, FlagDescriptor},
    service::{forward, Service},
};

use super::{with_server_flags, CommandContext};

pub fn namespace(ctx: &CommandContext) -> CommandDescriptor {
    let plugins_dir = ctx.plugins_dir.clone();

    CommandDescriptor::new(CMD_PLUGIN)
        .usage("Plugins handling commands.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(vec![
            CommandDescriptor::new("install")
                .aliases(["i"])
                .usage("Install or upgrade a plugin from the plugins registry.")
                .help_name(&format!("{CMD_PLUGIN} install <plugin name>[@<version>]"))
                .flags(with_server_flags(vec![FlagDescriptor::string(
                    "repo",
                    "Repository the plugin is downloaded from.",
                )]))
                .with_action(forward(&ctx.client, Service::Artifactory)),
            CommandDescriptor::new("uninstall")
                .aliases(["ui"])
                .usage("Uninstall a plugin.")
                .help_name(&format!("{CMD_PLUGIN} uninstall <plugin name>"))
                .action(move |inv| {
                    let [name] = inv.args.as_slice() else {
                        bail!("expected exactly one plugin name, got {}", inv.args.len());
                    };
                    uninstall(&plugins_dir, name)
                }),
            CommandDescriptor::new("publish")
                .aliases(["p"])
                .usage("Publish a plugin to the plugins registry.")
                .help_name(&format!("{CMD_PLUGIN} publish <plugin name> <plugin version>"))
                .flags(with_server_flags(vec![FlagDescriptor::string(
                    "arch",
                    "Comma-separated architectures to build and publish.",
                )]))
                .with_action(forward(&ctx.client, Service::Artifactory)),
        ])
}

/// Delete `<plugins_dir>/<name>`
pub fn uninstall(plugins_dir: &Path, name: &str) -> anyhow::Result<()> {
    if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
        bail!("invalid plugin name '{name}'");
    }
    let dir: PathBuf = plugins_dir.join(name);
    if !dir.is_dir() {
        bail!("plugin '{name}' is not installed");
    }
    fs::remove_dir_all(&dir).with_context(|| format!("removing {}", dir.display()))?;
    info!(plugin = %name, "plugin uninstalled");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_uninstall_removes_plugin_directory() {
        let dir = TempDir::new().unwrap();
        let plugin = dir.path().join("hello-frog").join("bin");
        fs::create_dir_all(&plugin).unwrap();

        uninstall(dir.path(), "hello-frog").unwrap();
        assert!(!dir.path().join("hello-frog").exists());
    }

    #[test]
    fn test_uninstall_unknown_plugin_fails() {
        let dir = TempDir::new().unwrap();
        let err = uninstall(dir.path(), "missing").unwrap_err();
        assert_eq!(err.to_string(), "plugin 'missing' is not installed");
    }

    #[test]
    fn test_uninstall_rejects_paths() {
        let dir = TempDir::new().unwrap();
        assert!(uninstall(dir.path(), "../etc").is_err());
        assert!(uninstall(dir.path(), "..").is_err());
    }
}

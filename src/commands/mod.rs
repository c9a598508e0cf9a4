//! Built-in command namespaces
//!
//! Every namespace here is a catalog of descriptors. Commands backed by a platform
//! service forward to the injected [`ServiceClient`]; the few commands that are purely
//! local (completion scripts, environment listing, plugin removal, the command catalog)
//! run here.

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::warn;

use crate::{
    descriptor::{CommandDescriptor, FlagDescriptor},
    error::CliResult,
    plugin::installed_plugins,
    registry::{NamespaceProvider, Registry, RegistryBuilder},
    service::ServiceClient,
};

pub mod artifactory;
pub mod build_tools;
pub mod completion;
pub mod config;
pub mod distribution;
pub mod general;
pub mod mission_control;
pub mod pipelines;
pub mod plugin;
pub mod security;

/// What the built-in commands need from the outside world
#[derive(Clone)]
pub struct CommandContext {
    pub client: Arc<dyn ServiceClient>,
    pub plugins_dir: PathBuf,
}

/// Top-level namespace descriptors, in declaration order
pub fn builtin_namespaces(ctx: &CommandContext) -> Vec<CommandDescriptor> {
    let mut namespaces = vec![
        artifactory::namespace(ctx),
        mission_control::namespace(ctx),
        distribution::namespace(ctx),
        pipelines::namespace(ctx),
        completion::namespace(),
        plugin::namespace(ctx),
        config::namespace(ctx),
    ];
    namespaces.extend(general::commands(ctx));
    namespaces
}

/// Assemble the complete command registry of the CLI
pub fn registry(ctx: &CommandContext) -> CliResult<Registry> {
    let namespaces = builtin_namespaces(ctx);
    let security_app = security::app(ctx);
    let build_tools = build_tools::BuildToolsProvider::new(ctx.client.clone());

    let mut reserved: HashSet<String> = namespaces
        .iter()
        .flat_map(|c| c.names().map(str::to_string).collect::<Vec<_>>())
        .collect();
    reserved.extend(
        security_app
            .commands
            .iter()
            .flat_map(|c| std::iter::once(c.name.clone()).chain(c.aliases.iter().cloned())),
    );
    reserved.extend(build_tools.reserved_names());

    RegistryBuilder::new()
        .namespaces(namespaces)
        .embedded_plugin(security_app)
        .provider(Box::new(InstalledPlugins {
            dir: ctx.plugins_dir.clone(),
            reserved,
        }))
        .provider(Box::new(build_tools))
        .build()
}

/// Installed plugins, minus any whose name is taken by a built-in command name or alias
struct InstalledPlugins {
    dir: PathBuf,
    reserved: HashSet<String>,
}

impl NamespaceProvider for InstalledPlugins {
    fn name(&self) -> &str {
        "installed plugins"
    }

    fn commands(&self) -> anyhow::Result<Vec<CommandDescriptor>> {
        let mut plugins = installed_plugins(&self.dir)?;
        plugins.retain(|p| {
            let free = !self.reserved.contains(&p.name);
            if !free {
                warn!(plugin = %p.name, "installed plugin shadows a built-in command, ignoring it");
            }
            free
        });
        Ok(plugins)
    }
}

/// Connection flags shared by every service-backed command
pub fn server_flags() -> Vec<FlagDescriptor> {
    vec![
        FlagDescriptor::string("url", "JFrog Platform URL."),
        FlagDescriptor::string("user", "JFrog username."),
        FlagDescriptor::string("password", "JFrog password."),
        FlagDescriptor::string("access-token", "JFrog access token."),
        FlagDescriptor::string("server-id", "Server ID configured using the config command."),
    ]
}

/// `extra` followed by the connection flags
pub fn with_server_flags(mut extra: Vec<FlagDescriptor>) -> Vec<FlagDescriptor> {
    extra.extend(server_flags());
    extra
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::Recorder;
    use crate::validate::validate_registry;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> CommandContext {
        CommandContext {
            client: Arc::new(Recorder::default()),
            plugins_dir: dir.path().join("plugins"),
        }
    }

    #[test]
    fn test_builtin_registry_is_consistent() {
        let dir = TempDir::new().unwrap();
        let registry = registry(&context(&dir)).unwrap();

        validate_registry(&registry).unwrap();
        for name in ["rt", "config", "audit", "xr", "npm", "build-tools", "login"] {
            assert!(registry.find(name).is_some(), "missing {name}");
        }
        assert!(registry.commands().iter().all(|c| !c.category.is_empty()));
        assert_eq!(registry.find("xr").unwrap().category, "Other");
    }

    #[test]
    fn test_installed_plugin_cannot_shadow_builtin() {
        let dir = TempDir::new().unwrap();
        for name in ["rt", "hello-frog"] {
            let bin = dir.path().join("plugins").join(name).join("bin");
            std::fs::create_dir_all(&bin).unwrap();
            let exe = if cfg!(windows) {
                format!("{name}.exe")
            } else {
                name.to_string()
            };
            std::fs::write(bin.join(exe), "").unwrap();
        }

        let registry = registry(&context(&dir)).unwrap();
        assert!(registry.find("hello-frog").unwrap().skip_flag_parsing);
        assert_eq!(
            registry.commands().iter().filter(|c| c.name == "rt").count(),
            1
        );
    }

    #[test]
    fn test_installed_plugin_cannot_take_embedded_alias() {
        let dir = TempDir::new().unwrap();
        for name in ["aud", "artifactory"] {
            let bin = dir.path().join("plugins").join(name).join("bin");
            std::fs::create_dir_all(&bin).unwrap();
            let exe = if cfg!(windows) {
                format!("{name}.exe")
            } else {
                name.to_string()
            };
            std::fs::write(bin.join(exe), "").unwrap();
        }

        let registry = registry(&context(&dir)).unwrap();
        validate_registry(&registry).unwrap();
        let claimants: Vec<&str> = registry
            .commands()
            .iter()
            .filter(|c| c.matches("aud"))
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(claimants, vec!["audit"]);
        assert_eq!(registry.find("artifactory").unwrap().name, "rt");
    }
}

//! Command registry assembly
//!
//! The registry is the full, immutable command tree of the CLI. It is assembled once at
//! startup from explicitly injected collaborators and never mutated afterwards:
//!
//! 1. Built-in namespace descriptors, in declaration order
//! 2. Commands converted from embedded plugins
//! 3. Each [`NamespaceProvider`]'s commands, in provider order
//! 4. Every provider's help-only commands
//!
//! Empty categories are normalized to [`OTHER_CATEGORY`] and the result is sorted by
//! name with a stable, case-sensitive ordinal compare.

use tracing::debug;

use crate::{
    constants::OTHER_CATEGORY,
    descriptor::CommandDescriptor,
    error::{CliError, CliResult},
    plugin::{convert_embedded_plugin, ComponentsFramework, PluginApp, PluginFramework},
};

/// A collaborator contributing top-level commands to the registry
pub trait NamespaceProvider {
    /// Name used when reporting a failure of this provider
    fn name(&self) -> &str;

    fn commands(&self) -> anyhow::Result<Vec<CommandDescriptor>>;

    /// Synthetic secondary commands appended after every provider's regular commands
    fn help_commands(&self) -> Vec<CommandDescriptor> {
        Vec::new()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Registry {
    commands: Vec<CommandDescriptor>,
}

impl Registry {
    /// Build a registry straight from a command list, normalizing and sorting it
    pub fn from_commands(commands: Vec<CommandDescriptor>) -> Self {
        let mut commands: Vec<CommandDescriptor> =
            commands.into_iter().map(normalize_category).collect();
        for cmd in &mut commands {
            assign_parent_paths(cmd, &[]);
        }
        commands.sort_by(|a, b| a.name.cmp(&b.name));
        Registry { commands }
    }

    pub fn commands(&self) -> &[CommandDescriptor] {
        &self.commands
    }

    /// Top-level command invocable by `token`
    pub fn find(&self, token: &str) -> Option<&CommandDescriptor> {
        self.commands.iter().find(|c| c.matches(token))
    }

    /// Follow a path of tokens (names or aliases) down the tree
    pub fn resolve<S: AsRef<str>>(&self, path: &[S]) -> Option<&CommandDescriptor> {
        let (first, rest) = path.split_first()?;
        let mut current = self.find(first.as_ref())?;
        for token in rest {
            current = current.find_subcommand(token.as_ref())?;
        }
        Some(current)
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }
}

pub struct RegistryBuilder {
    namespaces: Vec<CommandDescriptor>,
    plugins: Vec<PluginApp>,
    providers: Vec<Box<dyn NamespaceProvider>>,
    framework: Box<dyn PluginFramework>,
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistryBuilder {
    pub fn new() -> Self {
        RegistryBuilder {
            namespaces: Vec::new(),
            plugins: Vec::new(),
            providers: Vec::new(),
            framework: Box::new(ComponentsFramework),
        }
    }

    /// Plugin framework used to reshape embedded plugin commands
    pub fn framework(mut self, framework: Box<dyn PluginFramework>) -> Self {
        self.framework = framework;
        self
    }

    pub fn namespace(mut self, descriptor: CommandDescriptor) -> Self {
        self.namespaces.push(descriptor);
        self
    }

    pub fn namespaces(mut self, descriptors: Vec<CommandDescriptor>) -> Self {
        self.namespaces.extend(descriptors);
        self
    }

    pub fn embedded_plugin(mut self, app: PluginApp) -> Self {
        self.plugins.push(app);
        self
    }

    pub fn provider(mut self, provider: Box<dyn NamespaceProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    pub fn build(self) -> CliResult<Registry> {
        let mut all = self.namespaces;

        for app in self.plugins {
            let converted = convert_embedded_plugin(app, self.framework.as_ref())?;
            all.extend(converted);
        }

        for provider in &self.providers {
            let commands = provider.commands().map_err(|source| CliError::Provider {
                provider: provider.name().to_string(),
                source,
            })?;
            debug!(provider = provider.name(), count = commands.len(), "collected commands");
            all.extend(commands);
        }
        for provider in &self.providers {
            all.extend(provider.help_commands());
        }

        Ok(Registry::from_commands(all))
    }
}

fn normalize_category(mut cmd: CommandDescriptor) -> CommandDescriptor {
    if cmd.category.is_empty() {
        cmd.category = OTHER_CATEGORY.to_string();
    }
    cmd
}

fn assign_parent_paths(cmd: &mut CommandDescriptor, parent: &[String]) {
    cmd.parent_path = parent.to_vec();
    let mut path = parent.to_vec();
    path.push(cmd.name.clone());
    for sub in &mut cmd.subcommands {
        assign_parent_paths(sub, &path);
    }
}

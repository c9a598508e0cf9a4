//! Package manager integrations
//!
//! Each tool is a top-level command passing its arguments straight through to the
//! Artifactory integration. The `build-tools` namespace only exists for help: it lists
//! the same tools under one heading.

use std::sync::Arc;

use crate::{
    constants::{BUILD_TOOLS_CATEGORY, CMD_BUILD_TOOLS},
    descriptor::CommandDescriptor,
    registry::NamespaceProvider,
    service::{forward, Service, ServiceClient},
};

const TOOLS: &[(&str, &str)] = &[
    ("mvn", "Run Maven build."),
    ("gradle", "Run Gradle build."),
    ("npm", "Run npm command."),
    ("pip", "Run pip command."),
    ("go", "Run go command."),
    ("docker", "Run docker command."),
];

pub struct BuildToolsProvider {
    client: Arc<dyn ServiceClient>,
}

impl BuildToolsProvider {
    pub fn new(client: Arc<dyn ServiceClient>) -> Self {
        BuildToolsProvider { client }
    }

    /// Top-level names this provider occupies
    pub fn reserved_names(&self) -> impl Iterator<Item = String> {
        TOOLS
            .iter()
            .map(|(name, _)| name.to_string())
            .chain(std::iter::once(CMD_BUILD_TOOLS.to_string()))
    }

    fn tool(&self, name: &str, usage: &str) -> CommandDescriptor {
        CommandDescriptor::new(name)
            .usage(usage)
            .category(BUILD_TOOLS_CATEGORY)
            .help_name(&format!("{name} <{name} arguments> [command options]"))
            .skip_flag_parsing()
            .with_action(forward(&self.client, Service::Artifactory))
    }
}

impl NamespaceProvider for BuildToolsProvider {
    fn name(&self) -> &str {
        CMD_BUILD_TOOLS
    }

    fn commands(&self) -> anyhow::Result<Vec<CommandDescriptor>> {
        Ok(TOOLS.iter().map(|(name, usage)| self.tool(name, usage)).collect())
    }

    fn help_commands(&self) -> Vec<CommandDescriptor> {
        let tools = TOOLS
            .iter()
            .map(|(name, usage)| self.tool(name, usage))
            .collect();
        vec![CommandDescriptor::new(CMD_BUILD_TOOLS)
            .usage("Package manager integrations.")
            .category(BUILD_TOOLS_CATEGORY)
            .hidden()
            .subcommands(tools)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::Recorder;

    #[test]
    fn test_help_namespace_mirrors_tools() {
        let provider = BuildToolsProvider::new(Arc::new(Recorder::default()));
        let tools = provider.commands().unwrap();
        let help = provider.help_commands();

        assert_eq!(tools.len(), TOOLS.len());
        assert!(tools.iter().all(|t| t.skip_flag_parsing));
        assert_eq!(help.len(), 1);
        let names: Vec<&str> = help[0].subcommands.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["mvn", "gradle", "npm", "pip", "go", "docker"]);
        assert_eq!(provider.reserved_names().count(), TOOLS.len() + 1);
    }
}

//! Embedded security plugin
//!
//! Declared in the plugin framework's own shape and converted at startup like any other
//! embedded plugin.

use crate::{
    constants::SECURITY_CATEGORY,
    descriptor::FlagDescriptor,
    plugin::{PluginApp, PluginArgument, PluginCommand},
    service::{forward, Service},
};

use super::{server_flags, CommandContext};

pub fn app(ctx: &CommandContext) -> PluginApp {
    let leaf = |name: &str, aliases: &[&str], description: &str| PluginCommand {
        name: name.to_string(),
        aliases: aliases.iter().map(|a| a.to_string()).collect(),
        description: description.to_string(),
        flags: server_flags(),
        action: Some(forward(&ctx.client, Service::Xray)),
        ..Default::default()
    };
    let scan_flags = || {
        let mut flags = vec![
            FlagDescriptor::string("watches", "Comma-separated Xray watches."),
            FlagDescriptor::string("project", "Project key."),
            FlagDescriptor::string("format", "Output format: table, json or sarif.").with_default("table"),
            FlagDescriptor::bool("fail", "Exit with an error on policy violations.").with_default("true"),
        ];
        flags.extend(server_flags());
        flags
    };

    PluginApp {
        name: "security".to_string(),
        description: "Security scanning commands.".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        commands: vec![
            PluginCommand {
                category: SECURITY_CATEGORY.to_string(),
                flags: scan_flags(),
                ..leaf("audit", &["aud"], "Audit the dependencies of the local project.")
            },
            PluginCommand {
                category: SECURITY_CATEGORY.to_string(),
                flags: scan_flags(),
                arguments: vec![PluginArgument {
                    name: "source pattern".to_string(),
                    description: "Files to scan.".to_string(),
                }],
                ..leaf("scan", &["s"], "Scan files on the local file system with Xray.")
            },
            PluginCommand {
                category: SECURITY_CATEGORY.to_string(),
                ..leaf(
                    "curation-audit",
                    &["ca"],
                    "Audit the project dependencies against curation policies.",
                )
            },
            PluginCommand {
                name: "xr".to_string(),
                description: "Xray commands.".to_string(),
                subcommands: vec![
                    leaf("curl", &["cl"], "Execute a curl command against Xray."),
                    leaf("offline-update", &["ou"], "Download the Xray offline database."),
                ],
                ..Default::default()
            },
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plugin::{convert_embedded_plugin, ComponentsFramework};
    use crate::service::testing::Recorder;
    use std::sync::Arc;

    #[test]
    fn test_security_app_converts() {
        let ctx = CommandContext {
            client: Arc::new(Recorder::default()),
            plugins_dir: "plugins".into(),
        };
        let commands = convert_embedded_plugin(app(&ctx), &ComponentsFramework).unwrap();

        assert_eq!(commands.len(), 4);
        let scan = commands.iter().find(|c| c.name == "scan").unwrap();
        assert_eq!(scan.help_name, "scan [command options] <source pattern>");
        let xr = commands.iter().find(|c| c.name == "xr").unwrap();
        assert_eq!(xr.category, "Other");
        assert_eq!(xr.subcommands.len(), 2);
    }
}

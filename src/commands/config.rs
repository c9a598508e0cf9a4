//! `jf config`: server configuration commands

use crate::{
    constants::{CMD_CONFIG, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, FlagDescriptor},
    service::{forward, Service},
};

use super::{with_server_flags, CommandContext};

pub fn namespace(ctx: &CommandContext) -> CommandDescriptor {
    let command = |name: &str, aliases: &[&str], usage: &str, args: &str| {
        CommandDescriptor::new(name)
            .aliases(aliases.iter().copied())
            .usage(usage)
            .help_name(&format!("{CMD_CONFIG} {name} [command options] {args}").trim_end().to_string())
            .with_action(forward(&ctx.client, Service::Platform))
    };
    let server_settings = || {
        with_server_flags(vec![
            FlagDescriptor::bool("interactive", "Prompt for missing values.").with_default("true"),
            FlagDescriptor::bool("enc-password", "Encrypt the password or token.").with_default("true"),
            FlagDescriptor::bool("basic-auth-only", "Never exchange credentials for a token."),
            FlagDescriptor::string("artifactory-url", "Artifactory URL."),
            FlagDescriptor::string("distribution-url", "Distribution URL."),
            FlagDescriptor::string("xray-url", "Xray URL."),
            FlagDescriptor::string("pipelines-url", "Pipelines URL."),
            FlagDescriptor::bool("overwrite", "Overwrite an existing server ID."),
        ])
    };

    CommandDescriptor::new(CMD_CONFIG)
        .aliases(["c"])
        .usage("Server configurations commands.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(vec![
            command("add", &[], "Add a server configuration.", "<server id>").flags(server_settings()),
            command("edit", &[], "Edit a server configuration.", "<server id>").flags(server_settings()),
            command(
                "show",
                &["s"],
                "Show the stored configuration, or a single server.",
                "[server id]",
            ),
            command(
                "remove",
                &["rm"],
                "Remove a server configuration, or all of them.",
                "[server id]",
            )
            .flags(vec![FlagDescriptor::bool("quiet", "Skip the delete confirmation.")]),
            command(
                "import",
                &["im"],
                "Import a server configuration from a config token.",
                "<config token>",
            ),
            command(
                "export",
                &["ex"],
                "Export a server configuration as a config token.",
                "[server id]",
            ),
            command("use", &[], "Set the default server.", "<server id>"),
        ])
}

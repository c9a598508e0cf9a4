//! Top-level commands that are not namespaces

use std::io::{self, Write};

use crate::{
    config::is_ci,
    constants::*,
    descriptor::{CommandDescriptor, FlagDescriptor},
    help::command_catalog,
    registry::Registry,
    service::{forward, Service},
};

use super::{with_server_flags, CommandContext};

/// Environment variables the CLI reads, with their description
const ENV_VARS: &[(&str, &str)] = &[
    (ENV_HOME_DIR, "Home directory of the CLI configuration. Default: ~/.jfrog"),
    (ENV_LOG_LEVEL, "Log level: ERROR, WARN, INFO or DEBUG. Default: INFO"),
    (ENV_PLUGINS_DIR, "Directory installed plugins are loaded from. Default: <home>/plugins"),
    (ENV_BUILD_NAME, "Build name used by the build-info commands."),
    (ENV_BUILD_NUMBER, "Build number used by the build-info commands."),
    (ENV_BUILD_URL, "Build URL recorded in the build info."),
    (ENV_EXCLUDE, "Semicolon-separated patterns of variables left out of the build info."),
    (ENV_CI, "Set to true to disable interactive output."),
];

pub fn commands(ctx: &CommandContext) -> Vec<CommandDescriptor> {
    vec![
        CommandDescriptor::new(CMD_PROJECT)
            .usage("Project commands.")
            .hidden()
            .subcommands(vec![CommandDescriptor::new("init")
                .usage("Generate a project configuration for the current directory.")
                .flags(vec![
                    FlagDescriptor::string("path", "Path to the project root."),
                    FlagDescriptor::string("server-id", "Server ID configured using the config command."),
                ])
                .with_action(forward(&ctx.client, Service::Platform))]),
        CommandDescriptor::new("login")
            .usage("Log in to the JFrog Platform through the web browser.")
            .with_action(forward(&ctx.client, Service::Access)),
        CommandDescriptor::new("access-token-create")
            .aliases(["atc"])
            .usage("Create an access token.")
            .help_name("access-token-create [command options] [username]")
            .flags(with_server_flags(vec![
                FlagDescriptor::string("groups", "Comma-separated groups for the token."),
                FlagDescriptor::string("scope", "Scope of the token."),
                FlagDescriptor::bool("grant-admin", "Grant admin privileges."),
                FlagDescriptor::string("expiry", "Token expiry in seconds."),
                FlagDescriptor::bool("refreshable", "Make the token refreshable."),
                FlagDescriptor::string("audience", "Space-separated service IDs that accept the token."),
                FlagDescriptor::string("description", "Free text description of the token."),
            ]))
            .with_action(forward(&ctx.client, Service::Access)),
        CommandDescriptor::new("setup")
            .usage("Set up the CLI with a platform token.")
            .hidden()
            .flags(vec![FlagDescriptor::string("format", "Output format of the setup summary.")])
            .with_action(forward(&ctx.client, Service::Platform)),
        CommandDescriptor::new("intro")
            .hidden()
            .action(|_| {
                if !is_ci() {
                    intro(&mut io::stdout())?;
                }
                Ok(())
            }),
        CommandDescriptor::new(CMD_OPTIONS)
            .usage("Show all supported environment variables.")
            .action(|_| {
                options(&mut io::stdout())?;
                Ok(())
            }),
        CommandDescriptor::new(CMD_COMMANDS_CATALOG)
            .hidden()
            .action(|inv| {
                catalog(inv.registry(), &mut io::stdout())?;
                Ok(())
            }),
    ]
}

fn intro(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Thank you for installing version {} of {APP_NAME}!", env!("CARGO_PKG_VERSION"))?;
    writeln!(out, "Run '{APP_NAME} --help' to see what it can do.")?;
    writeln!(out, "{APP_USAGE}")
}

/// Environment variable table printed by `jf options`
pub fn options(out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Environment Variables:")?;
    for (name, description) in ENV_VARS {
        writeln!(out, "\n   {name}\n      {description}")?;
    }
    Ok(())
}

/// The visible command tree by category, as pretty JSON
pub fn catalog(registry: &Registry, out: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&command_catalog(registry))?;
    writeln!(out, "{json}")?;
    Ok(())
}

//! `jf mc`: Mission Control commands

use crate::{
    constants::{CMD_MISSION_CONTROL, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, FlagDescriptor},
    service::{forward, Service},
};

use super::{with_server_flags, CommandContext};

pub fn namespace(ctx: &CommandContext) -> CommandDescriptor {
    let command = |name: &str, alias: &str, usage: &str, args: &str, extra: Vec<FlagDescriptor>| {
        CommandDescriptor::new(name)
            .aliases([alias])
            .usage(usage)
            .help_name(&format!("{CMD_MISSION_CONTROL} {alias} [command options] {args}"))
            .flags(with_server_flags(extra))
            .with_action(forward(&ctx.client, Service::MissionControl))
    };

    CommandDescriptor::new(CMD_MISSION_CONTROL)
        .usage("Mission Control commands.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(vec![
            command(
                "jpd-add",
                "ja",
                "Add a JFrog Platform Deployment.",
                "<config>",
                Vec::new(),
            ),
            command(
                "jpd-delete",
                "jd",
                "Delete a JFrog Platform Deployment.",
                "<jpd id>",
                Vec::new(),
            ),
            command(
                "license-acquire",
                "la",
                "Acquire a license from the specified bucket.",
                "<bucket id> <license name>",
                Vec::new(),
            ),
            command(
                "license-deploy",
                "ld",
                "Deploy licenses from the bucket to the JPD.",
                "<bucket id> <jpd id>",
                vec![FlagDescriptor::string("license-count", "Number of licenses to deploy.").with_default("1")],
            ),
            command(
                "license-release",
                "lr",
                "Release licenses from the JPD back to the bucket.",
                "<bucket id> <jpd id>",
                Vec::new(),
            ),
        ])
}

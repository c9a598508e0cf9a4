//! `jf pl`: Pipelines commands

use crate::{
    constants::{CMD_PIPELINES, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, FlagDescriptor},
    service::{forward, Service},
};

use super::{with_server_flags, CommandContext};

pub fn namespace(ctx: &CommandContext) -> CommandDescriptor {
    let command = |name: &str, alias: &str, usage: &str, args: &str, extra: Vec<FlagDescriptor>| {
        CommandDescriptor::new(name)
            .aliases([alias])
            .usage(usage)
            .help_name(&format!("{CMD_PIPELINES} {alias} [command options] {args}").trim_end().to_string())
            .flags(with_server_flags(extra))
            .with_action(forward(&ctx.client, Service::Pipelines))
    };

    CommandDescriptor::new(CMD_PIPELINES)
        .usage("JFrog Pipelines commands.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(vec![
            command(
                "status",
                "s",
                "Fetch the latest pipeline run status.",
                "",
                vec![
                    FlagDescriptor::string("branch", "Branch name to filter on."),
                    FlagDescriptor::string("pipeline-name", "Pipeline name to filter on."),
                    FlagDescriptor::bool("monitor", "Keep polling until the run ends."),
                    FlagDescriptor::bool("single-branch", "The pipeline source is a single-branch source."),
                ],
            ),
            command(
                "trigger",
                "t",
                "Trigger a manual pipeline run.",
                "<pipeline name> <branch name>",
                vec![
                    FlagDescriptor::bool("monitor", "Keep polling until the run ends."),
                    FlagDescriptor::bool("single-branch", "The pipeline source is a single-branch source."),
                ],
            ),
            command("version", "v", "Show the Pipelines version.", "", Vec::new()),
            command(
                "sync",
                "sy",
                "Sync a pipeline resource.",
                "<repository name> <branch name>",
                Vec::new(),
            ),
            command(
                "sync-status",
                "ss",
                "Fetch the pipeline resource sync status.",
                "<branch name> <repository name>",
                Vec::new(),
            ),
        ])
}

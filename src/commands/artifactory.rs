//! `jf rt`: Artifactory commands

use crate::{
    constants::{CMD_ARTIFACTORY, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, FlagDescriptor},
    service::{forward, forward_with_spec, Service},
};

use super::{with_server_flags, CommandContext};

pub fn namespace(ctx: &CommandContext) -> CommandDescriptor {
    CommandDescriptor::new(CMD_ARTIFACTORY)
        .aliases(["artifactory"])
        .usage("Artifactory commands.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(commands(ctx))
}

fn commands(ctx: &CommandContext) -> Vec<CommandDescriptor> {
    let transfer = |name: &str, alias: &str, usage: &str, extra: Vec<FlagDescriptor>| {
        let mut flags = spec_flags();
        flags.extend(extra);
        CommandDescriptor::new(name)
            .aliases([alias])
            .usage(usage)
            .help_name(&format!("{CMD_ARTIFACTORY} {alias} [command options] <source pattern> <target pattern>"))
            .usage_text("\tsource pattern\n\t\tFiles to act on.\n\ttarget pattern\n\t\tWhere the files go.")
            .flags(with_server_flags(flags))
            .with_action(forward_with_spec(&ctx.client, Service::Artifactory))
    };
    let simple = |name: &str, alias: &str, usage: &str, extra: Vec<FlagDescriptor>| {
        CommandDescriptor::new(name)
            .aliases([alias])
            .usage(usage)
            .flags(with_server_flags(extra))
            .with_action(forward(&ctx.client, Service::Artifactory))
    };

    vec![
        transfer(
            "upload",
            "u",
            "Upload files.",
            vec![
                FlagDescriptor::string("target-props", "Properties to attach to the uploaded artifacts."),
                FlagDescriptor::bool("explode", "Extract uploaded archives."),
                FlagDescriptor::bool("symlinks", "Preserve symbolic links."),
                FlagDescriptor::bool("include-dirs", "Upload empty source directories."),
                FlagDescriptor::bool("dry-run", "Show what would be uploaded."),
                FlagDescriptor::string("threads", "Number of working threads.").with_default("3"),
            ],
        ),
        transfer(
            "download",
            "dl",
            "Download files.",
            vec![
                FlagDescriptor::bool("explode", "Extract downloaded archives."),
                FlagDescriptor::bool("validate-symlinks", "Validate downloaded symbolic links."),
                FlagDescriptor::string("bundle", "Download the files of a release bundle."),
                FlagDescriptor::string("gpg-key", "Public GPG key to verify the release bundle."),
                FlagDescriptor::bool("dry-run", "Show what would be downloaded."),
                FlagDescriptor::string("threads", "Number of working threads.").with_default("3"),
            ],
        ),
        transfer(
            "move",
            "mv",
            "Move files between repositories.",
            vec![FlagDescriptor::bool("dry-run", "Show what would be moved.")],
        ),
        transfer(
            "copy",
            "cp",
            "Copy files between repositories.",
            vec![FlagDescriptor::bool("dry-run", "Show what would be copied.")],
        ),
        transfer(
            "delete",
            "del",
            "Delete files.",
            vec![FlagDescriptor::bool("dry-run", "Show what would be deleted.")],
        ),
        transfer(
            "search",
            "s",
            "Search files.",
            vec![FlagDescriptor::bool("count", "Only print the number of results.")],
        ),
        transfer(
            "set-props",
            "sp",
            "Set properties on existing files.",
            Vec::new(),
        ),
        transfer(
            "delete-props",
            "delp",
            "Delete properties from existing files.",
            Vec::new(),
        ),
        simple("ping", "p", "Send applicative health check request.", Vec::new()),
        simple(
            "build-publish",
            "bp",
            "Publish build info.",
            vec![
                FlagDescriptor::string("build-url", "Build URL shown in the build info."),
                FlagDescriptor::string("env-exclude", "Environment variables to leave out of the build info."),
                FlagDescriptor::string("project", "Project key."),
                FlagDescriptor::bool("dry-run", "Print the build info instead of publishing it."),
            ],
        ),
        simple(
            "build-add-dependencies",
            "bad",
            "Add dependencies from the file system to the build info.",
            vec![FlagDescriptor::bool("recursive", "Search sub-directories.").with_default("true")],
        ),
        simple(
            "build-add-git",
            "bag",
            "Collect VCS details from the git repository.",
            Vec::new(),
        ),
        simple(
            "build-collect-env",
            "bce",
            "Collect environment variables into the build info.",
            Vec::new(),
        ),
        simple(
            "build-discard",
            "bdi",
            "Discard old builds.",
            vec![
                FlagDescriptor::string("max-builds", "Number of builds to keep."),
                FlagDescriptor::string("max-days", "Keep builds newer than this many days."),
            ],
        ),
        simple(
            "build-promote",
            "bpr",
            "Promote a build.",
            vec![
                FlagDescriptor::string("status", "Promotion status."),
                FlagDescriptor::bool("copy", "Copy artifacts instead of moving them."),
            ],
        ),
        simple(
            "build-scan",
            "bs",
            "Scan a published build with Xray.",
            vec![FlagDescriptor::bool("fail", "Fail on policy violations.").with_default("true")],
        ),
        simple(
            "curl",
            "cl",
            "Execute a curl command against Artifactory.",
            Vec::new(),
        )
        .skip_flag_parsing(),
        simple(
            "repo-create",
            "rc",
            "Create a repository from a template.",
            vec![FlagDescriptor::string("vars", "Template variables.")],
        ),
        simple(
            "repo-delete",
            "rdel",
            "Delete repositories.",
            vec![FlagDescriptor::bool("quiet", "Skip the delete confirmation.")],
        ),
    ]
}

/// Flags of every command selecting files through a file spec
fn spec_flags() -> Vec<FlagDescriptor> {
    vec![
        FlagDescriptor::string("spec", "Path to a file spec."),
        FlagDescriptor::string("spec-vars", "Spec variables as key1=val1;key2=val2."),
        FlagDescriptor::bool("recursive", "Include sub-directories.").with_default("true"),
        FlagDescriptor::bool("flat", "Flatten the source directory structure."),
        FlagDescriptor::bool("regexp", "Treat the pattern as a regular expression."),
        FlagDescriptor::string("exclusions", "Exclusion patterns separated by ';'."),
        FlagDescriptor::string("props", "Only act on files with these properties."),
        FlagDescriptor::string("exclude-props", "Skip files with these properties."),
        FlagDescriptor::string("build", "Only act on files of this build."),
        FlagDescriptor::string("exclude-artifacts", "Skip the artifacts of the build."),
        FlagDescriptor::string("include-deps", "Include the dependencies of the build."),
        FlagDescriptor::string("sort-by", "Fields to sort by, separated by ';'."),
        FlagDescriptor::string("sort-order", "asc or desc."),
        FlagDescriptor::string("offset", "Number of results to skip."),
        FlagDescriptor::string("limit", "Maximum number of results."),
        FlagDescriptor::string("project", "Project key."),
        FlagDescriptor::string("transitive", "Search transitive dependencies of virtual repositories."),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::Recorder;
    use std::collections::HashSet;
    use std::sync::Arc;

    #[test]
    fn test_no_duplicate_flags_per_command() {
        let ctx = CommandContext {
            client: Arc::new(Recorder::default()),
            plugins_dir: "plugins".into(),
        };
        for cmd in namespace(&ctx).subcommands {
            let mut seen = HashSet::new();
            for flag in &cmd.flags {
                assert!(seen.insert(flag.name.clone()), "{} repeats --{}", cmd.name, flag.name);
            }
        }
    }
}

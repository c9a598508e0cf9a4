//! `jf ds`: release bundle commands

use crate::{
    constants::{CMD_DISTRIBUTION, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, FlagDescriptor},
    service::{forward, Service},
};

use super::{with_server_flags, CommandContext};

pub fn namespace(ctx: &CommandContext) -> CommandDescriptor {
    let bundle = |name: &str, alias: &str, usage: &str, extra: Vec<FlagDescriptor>| {
        CommandDescriptor::new(name)
            .aliases([alias])
            .usage(usage)
            .help_name(&format!(
                "{CMD_DISTRIBUTION} {alias} [command options] <release bundle name> <release bundle version>"
            ))
            .flags(with_server_flags(extra))
            .with_action(forward(&ctx.client, Service::Distribution))
    };
    let content_flags = |dry_run: &str| {
        vec![
            FlagDescriptor::string("spec", "Path to a file spec describing the bundle content."),
            FlagDescriptor::string("spec-vars", "Spec variables as key1=val1;key2=val2."),
            FlagDescriptor::bool("sign", "Sign the release bundle."),
            FlagDescriptor::string("desc", "Description of the release bundle."),
            FlagDescriptor::string("release-notes-path", "Path to the release notes file."),
            FlagDescriptor::bool("dry-run", dry_run),
        ]
    };
    let target_flags = || {
        vec![
            FlagDescriptor::string("dist-rules", "Path to distribution rules."),
            FlagDescriptor::string("site", "Wildcard filter for site name.").with_default("*"),
            FlagDescriptor::string("city", "Wildcard filter for site city name.").with_default("*"),
            FlagDescriptor::string("country-codes", "Semicolon-separated list of country codes.").with_default("*"),
            FlagDescriptor::bool("sync", "Wait for the operation to complete."),
        ]
    };

    let mut distribute = target_flags();
    distribute.push(FlagDescriptor::bool("dry-run", "Show what would be distributed."));
    let mut delete = target_flags();
    delete.extend([
        FlagDescriptor::bool("delete-from-dist", "Also delete from the distribution service."),
        FlagDescriptor::bool("quiet", "Skip the delete confirmation."),
        FlagDescriptor::bool("dry-run", "Show what would be deleted."),
    ]);

    CommandDescriptor::new(CMD_DISTRIBUTION)
        .usage("Distribution commands.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(vec![
            bundle(
                "release-bundle-create",
                "rbc",
                "Create a release bundle.",
                content_flags("Show what would be created."),
            ),
            bundle(
                "release-bundle-update",
                "rbu",
                "Update an existing unsigned release bundle.",
                content_flags("Show what would be updated."),
            ),
            bundle(
                "release-bundle-sign",
                "rbs",
                "Sign a release bundle.",
                vec![FlagDescriptor::string("passphrase", "GPG passphrase of the signing key.")],
            ),
            bundle(
                "release-bundle-distribute",
                "rbd",
                "Distribute a release bundle.",
                distribute,
            ),
            bundle(
                "release-bundle-delete",
                "rbdel",
                "Delete a release bundle.",
                delete,
            ),
        ])
}

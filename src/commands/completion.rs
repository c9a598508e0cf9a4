//! `jf completion`: shell completion scripts generated from the live command tree

use std::io;

use clap_complete::{
    generate,
    shells::{Bash, Fish, Zsh},
    Generator,
};

use crate::{
    constants::{APP_NAME, CMD_COMPLETION, COMMAND_NAMESPACES_CATEGORY},
    descriptor::{CommandDescriptor, Invocation},
};

pub fn namespace() -> CommandDescriptor {
    CommandDescriptor::new(CMD_COMPLETION)
        .usage("Generate autocomplete scripts.")
        .category(COMMAND_NAMESPACES_CATEGORY)
        .subcommands(vec![
            shell("bash", Bash),
            shell("zsh", Zsh),
            shell("fish", Fish),
        ])
}

fn shell<G>(name: &str, generator: G) -> CommandDescriptor
where
    G: Generator + Copy + Send + Sync + 'static,
{
    CommandDescriptor::new(name)
        .usage(&format!("Generate {name} completion script."))
        .help_name(&format!("{CMD_COMPLETION} {name}"))
        .action(move |inv| {
            script(generator, inv, &mut io::stdout());
            Ok(())
        })
}

/// Write the completion script for the whole tree the invocation came from
pub fn script<G: Generator>(generator: G, inv: &Invocation<'_>, out: &mut dyn io::Write) {
    let mut cmd = inv.root_command().clone();
    generate(generator, &mut cmd, APP_NAME, out);
}

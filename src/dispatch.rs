//! Command-line dispatch
//!
//! The registry is translated into a `clap::Command` tree once; each run parses the
//! arguments against it, walks down to the invoked descriptor by canonical name and calls
//! its action. A top-level token that matches no command is accepted as an external
//! subcommand so that it can be answered with typo suggestions instead of a bare usage
//! error.

use std::ffi::OsString;
use std::io::Write;

use anyhow::anyhow;
use clap::{error::ErrorKind, parser::ValueSource, Arg, ArgMatches};
use tracing::debug;

use crate::{
    constants::{APP_NAME, APP_USAGE},
    descriptor::{CommandDescriptor, FlagDescriptor, FlagKind, FlagValue, Invocation},
    error::CliError,
    help::render_app_help,
    registry::Registry,
    suggest::{not_found_message, search_similar_commands, similarity_message},
};

/// Id of the positional arguments of leaf commands
const ARGS_ID: &str = "__args";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command ran, or help/version was shown
    Success,
    /// The typed command does not exist
    CommandNotFound,
    /// Argument parsing failed with the given exit code
    Usage(i32),
}

impl Outcome {
    pub fn exit_code(self) -> i32 {
        match self {
            Outcome::Success => 0,
            Outcome::CommandNotFound => 1,
            Outcome::Usage(code) => code,
        }
    }
}

pub struct Dispatcher {
    registry: Registry,
    root: clap::Command,
}

impl Dispatcher {
    pub fn new(registry: Registry, version: &str) -> Self {
        let root = build_command(&registry, version);
        Dispatcher { registry, root }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn command(&self) -> &clap::Command {
        &self.root
    }

    /// Parse `args` (program name first) and run the selected command.
    ///
    /// Help, version and not-found messages are written to `out`; parse errors go to
    /// stderr. Errors returned by the command's action are propagated.
    pub fn run<I, T>(&self, args: I, out: &mut dyn Write) -> anyhow::Result<Outcome>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = match self.root.clone().try_get_matches_from(args) {
            Ok(m) => m,
            Err(e) => return report_parse_error(e, out),
        };

        let Some((name, sub_matches)) = matches.subcommand() else {
            write!(out, "{}", self.root.clone().render_help())?;
            return Ok(Outcome::Success);
        };
        let Some(top) = self.registry.find(name) else {
            return self.command_not_found(name, out);
        };

        let mut descriptor = top;
        let mut m = sub_matches;
        let mut path = vec![top.name.clone()];
        while let Some((child, child_matches)) = m.subcommand() {
            descriptor = descriptor
                .find_subcommand(child)
                .ok_or_else(|| anyhow!("'{child}' is not a subcommand of '{}'", path.join(" ")))?;
            m = child_matches;
            path.push(descriptor.name.clone());
        }

        let action = descriptor
            .action
            .as_ref()
            .ok_or_else(|| CliError::NoAction(path.join(" ")))?;

        let mut invocation =
            Invocation::new(path, &self.registry, &self.root).with_args(positional_args(descriptor, m));
        if !descriptor.skip_flag_parsing {
            for flag in &descriptor.flags {
                read_flag(flag, m, &mut invocation);
            }
        }

        debug!(command = %invocation.command_line(), args = ?invocation.args, "dispatching");
        action.call(&invocation)?;
        Ok(Outcome::Success)
    }

    fn command_not_found(&self, typed: &str, out: &mut dyn Write) -> anyhow::Result<Outcome> {
        writeln!(out, "{}", not_found_message(APP_NAME, typed))?;
        let suggestions = search_similar_commands(self.registry.commands(), typed);
        debug!(typed, ?suggestions, "command not found");
        if let Some(text) = similarity_message(APP_NAME, &suggestions) {
            writeln!(out, "{text}")?;
        }
        Ok(Outcome::CommandNotFound)
    }
}

fn report_parse_error(e: clap::Error, out: &mut dyn Write) -> anyhow::Result<Outcome> {
    match e.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            write!(out, "{}", e.render())?;
            Ok(Outcome::Success)
        }
        _ => {
            e.print()?;
            Ok(Outcome::Usage(e.exit_code()))
        }
    }
}

/// Translate the registry into the clap command tree
pub fn build_command(registry: &Registry, version: &str) -> clap::Command {
    let help = render_app_help(APP_NAME, APP_USAGE, version, registry);
    registry.commands().iter().fold(
        clap::Command::new(APP_NAME)
            .bin_name(APP_NAME)
            .version(version.to_string())
            .about(APP_USAGE)
            .override_help(help)
            .allow_external_subcommands(true),
        |root, cmd| root.subcommand(to_clap(cmd)),
    )
}

fn takes_positionals(cmd: &CommandDescriptor) -> bool {
    cmd.skip_flag_parsing || cmd.subcommands.is_empty()
}

fn to_clap(cmd: &CommandDescriptor) -> clap::Command {
    let mut command = clap::Command::new(cmd.name.clone())
        .visible_aliases(cmd.aliases.clone())
        .about(cmd.usage.clone())
        .hide(cmd.hidden);
    if !cmd.help_name.is_empty() {
        command = command.override_usage(format!("{APP_NAME} {}", cmd.help_name));
    }
    if !cmd.usage_text.is_empty() {
        command = command.after_help(format!("Arguments:\n{}", cmd.usage_text));
    }

    if cmd.skip_flag_parsing {
        return command.disable_help_flag(true).arg(
            Arg::new(ARGS_ID)
                .value_name("ARGS")
                .num_args(0..)
                .trailing_var_arg(true)
                .allow_hyphen_values(true),
        );
    }

    command = cmd.flags.iter().fold(command, |c, f| c.arg(to_arg(f)));
    if takes_positionals(cmd) {
        command = command.arg(Arg::new(ARGS_ID).value_name("ARGS").num_args(0..));
    } else {
        command = cmd
            .subcommands
            .iter()
            .fold(command, |c, sub| c.subcommand(to_clap(sub)));
        if cmd.action.is_none() {
            command = command.subcommand_required(true).arg_required_else_help(true);
        }
    }
    command
}

fn to_arg(flag: &FlagDescriptor) -> Arg {
    let mut arg = Arg::new(flag.name.clone())
        .long(flag.name.clone())
        .help(flag.usage.clone())
        .hide(flag.hidden);
    if let Some(short) = flag.short {
        arg = arg.short(short);
    }
    match &flag.kind {
        FlagKind::Bool { default } => arg
            .num_args(0..=1)
            .require_equals(true)
            .value_parser(clap::value_parser!(bool))
            .default_missing_value("true")
            .default_value(if *default { "true" } else { "false" }),
        FlagKind::String { default } => {
            arg = arg.num_args(1).value_name("VALUE");
            match default {
                Some(d) => arg.default_value(d.clone()),
                None => arg,
            }
        }
    }
}

fn positional_args(cmd: &CommandDescriptor, m: &ArgMatches) -> Vec<String> {
    if !takes_positionals(cmd) {
        return Vec::new();
    }
    m.get_many::<String>(ARGS_ID)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn read_flag(flag: &FlagDescriptor, m: &ArgMatches, invocation: &mut Invocation<'_>) {
    let explicit = m.value_source(&flag.name) == Some(ValueSource::CommandLine);
    let value = match flag.kind {
        FlagKind::Bool { .. } => m.get_one::<bool>(&flag.name).map(|v| FlagValue::Bool(*v)),
        FlagKind::String { .. } => m
            .get_one::<String>(&flag.name)
            .map(|v| FlagValue::String(v.clone())),
    };
    if let Some(value) = value {
        invocation.set_flag(&flag.name, value, explicit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Seen = Arc<Mutex<Vec<(String, Vec<String>, Vec<(String, String)>)>>>;

    fn recording(seen: &Seen) -> impl Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync {
        let seen = Arc::clone(seen);
        move |inv| {
            let flags = inv
                .explicit_flags()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            seen.lock()
                .unwrap()
                .push((inv.command_line(), inv.args.clone(), flags));
            Ok(())
        }
    }

    fn dispatcher(seen: &Seen) -> Dispatcher {
        let registry = Registry::from_commands(vec![
            CommandDescriptor::new("rt").subcommands(vec![
                CommandDescriptor::new("upload")
                    .aliases(["u"])
                    .flags(vec![
                        FlagDescriptor::bool("flat", "Flatten."),
                        FlagDescriptor::string("threads", "Threads.").with_default("3"),
                    ])
                    .action(recording(seen)),
                CommandDescriptor::new("build-publish")
                    .aliases(["bp"])
                    .action(recording(seen)),
            ]),
            CommandDescriptor::new("config").aliases(["c"]),
            CommandDescriptor::new("hello-frog")
                .skip_flag_parsing()
                .action(recording(seen)),
            CommandDescriptor::new("broken"),
        ]);
        Dispatcher::new(registry, "1.0.0")
    }

    #[test]
    fn test_runs_leaf_through_aliases() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        let outcome = d
            .run(["jf", "rt", "u", "a/*.zip", "repo/", "--flat"], &mut out)
            .unwrap();
        assert_eq!(outcome, Outcome::Success);

        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "rt upload");
        assert_eq!(seen[0].1, vec!["a/*.zip", "repo/"]);
        // the defaulted threads flag is not explicit
        assert_eq!(seen[0].2, vec![("flat".to_string(), "true".to_string())]);
    }

    #[test]
    fn test_bool_flag_with_explicit_value() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        d.run(["jf", "rt", "upload", "--flat=false", "--threads", "8", "x"], &mut out)
            .unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(
            seen[0].2,
            vec![
                ("flat".to_string(), "false".to_string()),
                ("threads".to_string(), "8".to_string())
            ]
        );
    }

    #[test]
    fn test_unknown_command_suggests() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        let outcome = d.run(["jf", "bp"], &mut out).unwrap();
        assert_eq!(outcome, Outcome::CommandNotFound);
        assert_eq!(outcome.exit_code(), 1);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text,
            "'jf bp' is not a jf command. See --help\nThe most similar command is:\n\tjf rt bp\n"
        );
    }

    #[test]
    fn test_unknown_command_without_suggestion() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        let outcome = d.run(["jf", "zzzzzz"], &mut out).unwrap();
        assert_eq!(outcome, Outcome::CommandNotFound);
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "'jf zzzzzz' is not a jf command. See --help\n");
    }

    #[test]
    fn test_skip_flag_parsing_forwards_everything() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        d.run(["jf", "hello-frog", "greet", "--loud", "-x"], &mut out)
            .unwrap();
        let seen = seen.lock().unwrap();
        assert_eq!(seen[0].0, "hello-frog");
        assert_eq!(seen[0].1, vec!["greet", "--loud", "-x"]);
    }

    #[test]
    fn test_leaf_without_action_is_an_error() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        let err = d.run(["jf", "broken"], &mut out).unwrap_err();
        assert_eq!(err.to_string(), "command 'broken' has nothing to run");
    }

    #[test]
    fn test_help_and_no_arguments_print_app_help() {
        let seen = Seen::default();
        let d = dispatcher(&seen);

        let mut out = Vec::new();
        assert_eq!(d.run(["jf", "--help"], &mut out).unwrap(), Outcome::Success);
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("COMMANDS:"));

        let mut out = Vec::new();
        assert_eq!(d.run(["jf"], &mut out).unwrap(), Outcome::Success);
        assert!(String::from_utf8(out).unwrap().contains("GLOBAL OPTIONS:"));
    }

    #[test]
    fn test_version() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        assert_eq!(d.run(["jf", "--version"], &mut out).unwrap(), Outcome::Success);
        assert!(String::from_utf8(out).unwrap().contains("1.0.0"));
    }

    #[test]
    fn test_namespace_requires_subcommand() {
        let seen = Seen::default();
        let d = dispatcher(&seen);
        let mut out = Vec::new();

        let outcome = d.run(["jf", "rt"], &mut out).unwrap();
        assert_eq!(outcome, Outcome::Usage(2));
    }
}

//! Command descriptors
//!
//! A [`CommandDescriptor`] is the declarative record every namespace hands to the
//! registry: identity (name, aliases, category), help text, flags, an optional
//! [`Action`] and nested subcommands. The core only ever looks at the identity fields;
//! flags, help text and actions are passed through to the dispatcher untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

use crate::registry::Registry;

/// Signature every command action is invoked with
pub type ActionFn = dyn Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync;

/// Opaque, shareable reference to the code a command runs
#[derive(Clone)]
pub struct Action(Arc<ActionFn>);

impl Action {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        Action(Arc::new(f))
    }

    pub fn call(&self, invocation: &Invocation<'_>) -> anyhow::Result<()> {
        (self.0)(invocation)
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Action(..)")
    }
}

/// Value kind of a command-line flag
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagKind {
    /// `--name` or `--name=true|false`
    Bool { default: bool },
    /// `--name=value`
    String { default: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagDescriptor {
    pub name: String,
    pub short: Option<char>,
    pub usage: String,
    pub kind: FlagKind,
    pub hidden: bool,
}

impl FlagDescriptor {
    pub fn bool(name: &str, usage: &str) -> Self {
        FlagDescriptor {
            name: name.to_string(),
            short: None,
            usage: usage.to_string(),
            kind: FlagKind::Bool { default: false },
            hidden: false,
        }
    }

    pub fn string(name: &str, usage: &str) -> Self {
        FlagDescriptor {
            name: name.to_string(),
            short: None,
            usage: usage.to_string(),
            kind: FlagKind::String { default: None },
            hidden: false,
        }
    }

    pub fn with_default(mut self, value: &str) -> Self {
        self.kind = match self.kind {
            FlagKind::Bool { .. } => FlagKind::Bool {
                default: value == "true",
            },
            FlagKind::String { .. } => FlagKind::String {
                default: Some(value.to_string()),
            },
        };
        self
    }

    pub fn short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// Declarative record describing one invocable command
#[derive(Debug, Clone, Default)]
pub struct CommandDescriptor {
    /// Primary invocation token, unique among siblings
    pub name: String,
    /// Alternate invocation tokens, unique among all siblings' aliases
    pub aliases: Vec<String>,
    /// Display grouping in the application help
    pub category: String,
    /// One-line description
    pub usage: String,
    /// Arguments section of the command help
    pub usage_text: String,
    /// Full usage line shown in the command help
    pub help_name: String,
    /// Left out of help listings, still invocable
    pub hidden: bool,
    /// Hand every argument, flags included, to the action untouched
    pub skip_flag_parsing: bool,
    pub flags: Vec<FlagDescriptor>,
    pub subcommands: Vec<CommandDescriptor>,
    pub action: Option<Action>,
    /// Names of the enclosing commands, root first. Filled in by the registry.
    pub parent_path: Vec<String>,
}

impl CommandDescriptor {
    pub fn new(name: &str) -> Self {
        CommandDescriptor {
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases = aliases.into_iter().map(Into::into).collect();
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }

    pub fn usage(mut self, usage: &str) -> Self {
        self.usage = usage.to_string();
        self
    }

    pub fn usage_text(mut self, text: &str) -> Self {
        self.usage_text = text.to_string();
        self
    }

    pub fn help_name(mut self, help_name: &str) -> Self {
        self.help_name = help_name.to_string();
        self
    }

    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    pub fn skip_flag_parsing(mut self) -> Self {
        self.skip_flag_parsing = true;
        self
    }

    pub fn flags(mut self, flags: Vec<FlagDescriptor>) -> Self {
        self.flags = flags;
        self
    }

    pub fn subcommands(mut self, subcommands: Vec<CommandDescriptor>) -> Self {
        self.subcommands = subcommands;
        self
    }

    pub fn action<F>(mut self, f: F) -> Self
    where
        F: Fn(&Invocation<'_>) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.action = Some(Action::new(f));
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    /// Every token this command can be invoked by: the name, then the aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    pub fn matches(&self, token: &str) -> bool {
        self.names().any(|n| n == token)
    }

    /// Space-joined path of the command from the root
    pub fn full_name(&self) -> String {
        if self.parent_path.is_empty() {
            return self.name.clone();
        }
        let mut parts = self.parent_path.clone();
        parts.push(self.name.clone());
        parts.join(" ")
    }

    pub fn find_subcommand(&self, token: &str) -> Option<&CommandDescriptor> {
        self.subcommands.iter().find(|s| s.matches(token))
    }
}

/// Value of a flag resolved from the command line or its default
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    String(String),
}

impl fmt::Display for FlagValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlagValue::Bool(b) => write!(f, "{b}"),
            FlagValue::String(s) => f.write_str(s),
        }
    }
}

/// Everything an action gets to see about the command line that reached it
pub struct Invocation<'a> {
    /// Canonical names from the top-level command down to the invoked one
    pub path: Vec<String>,
    pub args: Vec<String>,
    flags: BTreeMap<String, FlagValue>,
    explicit: BTreeSet<String>,
    registry: &'a Registry,
    root: &'a clap::Command,
}

impl<'a> Invocation<'a> {
    pub fn new(path: Vec<String>, registry: &'a Registry, root: &'a clap::Command) -> Self {
        Invocation {
            path,
            args: Vec::new(),
            flags: BTreeMap::new(),
            explicit: BTreeSet::new(),
            registry,
            root,
        }
    }

    pub fn with_args(mut self, args: Vec<String>) -> Self {
        self.args = args;
        self
    }

    /// Record a flag value; `explicit` marks it as given on the command line
    pub fn set_flag(&mut self, name: &str, value: FlagValue, explicit: bool) {
        self.flags.insert(name.to_string(), value);
        if explicit {
            self.explicit.insert(name.to_string());
        }
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.flags.get(name) {
            Some(FlagValue::String(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn value(&self, name: &str) -> Option<&FlagValue> {
        self.flags.get(name)
    }

    pub fn bool(&self, name: &str) -> bool {
        matches!(self.flags.get(name), Some(FlagValue::Bool(true)))
    }

    /// Whether the flag was given on the command line rather than defaulted
    pub fn is_set(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn explicit_flags(&self) -> impl Iterator<Item = (&str, &FlagValue)> {
        self.explicit
            .iter()
            .filter_map(|name| self.flags.get(name).map(|v| (name.as_str(), v)))
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn root_command(&self) -> &'a clap::Command {
        self.root
    }

    pub fn command_line(&self) -> String {
        self.path.join(" ")
    }
}

//! Typed failures raised by the command-tree core

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Duplicate Alias '{alias}' Found on {namespace} {subcommand} command.")]
    DuplicateAlias {
        alias: String,
        namespace: String,
        subcommand: String,
    },

    #[error("Duplicate command name '{name}' found under {namespace}.")]
    DuplicateName { name: String, namespace: String },

    #[error("failed adding '{plugin}' embedded plugin commands. Last error: {source}")]
    EmbeddedPlugin {
        plugin: String,
        #[source]
        source: PluginError,
    },

    #[error("failed collecting commands from '{provider}': {source}")]
    Provider {
        provider: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("command '{0}' has nothing to run")]
    NoAction(String),

    #[error("invalid file spec: {0}")]
    InvalidSpec(String),

    #[error("plugin '{name}' exited with status {code}")]
    PluginExit { name: String, code: i32 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Failures reported by a plugin framework while reshaping plugin commands
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PluginError {
    #[error("a command of the plugin has an empty name")]
    EmptyName,

    #[error("flag '{flag}' is declared more than once on command '{command}'")]
    DuplicateFlag { command: String, flag: String },

    #[error("command '{0}' has neither an action nor subcommands")]
    MissingAction(String),
}

pub type CliResult<T> = Result<T, CliError>;

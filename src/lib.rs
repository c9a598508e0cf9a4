//! # jf CLI Library
//!
//! Command-tree core of the `jf` command-line front end.
//!
//! Namespaces describe their commands as [`descriptor::CommandDescriptor`]s. The
//! [`registry`] collects them (built-in namespaces, converted embedded plugins and
//! pluggable providers) into one sorted tree, [`validate`] checks it for conflicting
//! aliases, and the [`dispatch`] layer turns it into a `clap` command, runs the selected
//! action, and answers unknown commands with the closest matches from [`suggest`].

pub mod commands;
pub mod config;
pub mod constants;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod help;
pub mod logging;
pub mod plugin;
pub mod registry;
pub mod service;
pub mod spec;
pub mod suggest;
pub mod validate;

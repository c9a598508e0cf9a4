//! Help text assembly
//!
//! The application help lists visible commands grouped by category. The command catalog
//! is the same listing as structured data (three levels deep) for documentation tooling.

use std::collections::BTreeMap;
use std::fmt::Write;

use serde::Serialize;

use crate::{descriptor::CommandDescriptor, registry::Registry};

/// Application-level help: name, usage, version, categorized commands, global options
pub fn render_app_help(app: &str, usage: &str, version: &str, registry: &Registry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "NAME:\n   {app} - {usage}\n");
    let _ = writeln!(
        out,
        "USAGE:\n   {app} [global options] command [command options] [arguments...]\n"
    );
    if !version.is_empty() {
        let _ = writeln!(out, "VERSION:\n   {version}\n");
    }

    let categories = visible_by_category(registry);
    if !categories.is_empty() {
        let width = categories
            .values()
            .flatten()
            .map(|c| display_names(c).len())
            .max()
            .unwrap_or(0);
        out.push_str("COMMANDS:");
        for (category, commands) in &categories {
            let _ = write!(out, "\n\n   {category}:");
            for cmd in commands {
                let _ = write!(out, "\n     {:<width$}  {}", display_names(cmd), cmd.usage);
            }
        }
        out.push_str("\n\n");
    }

    out.push_str("GLOBAL OPTIONS:\n   --help, -h     show help\n   --version, -V  print the version\n");
    out
}

fn display_names(cmd: &CommandDescriptor) -> String {
    cmd.names().collect::<Vec<_>>().join(", ")
}

fn visible_by_category(registry: &Registry) -> BTreeMap<&str, Vec<&CommandDescriptor>> {
    let mut categories: BTreeMap<&str, Vec<&CommandDescriptor>> = BTreeMap::new();
    for cmd in registry.commands().iter().filter(|c| !c.hidden) {
        categories.entry(cmd.category.as_str()).or_default().push(cmd);
    }
    categories
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCommand {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub short_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub args: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub usage: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subcommands: Vec<CatalogCommand>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<CatalogFlag>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogFlag {
    pub name: String,
    pub usage: String,
}

impl CatalogCommand {
    fn from_descriptor(cmd: &CommandDescriptor) -> Self {
        CatalogCommand {
            name: cmd.name.clone(),
            short_name: cmd.aliases.first().cloned().unwrap_or_default(),
            description: cmd.usage.clone(),
            args: cmd.usage_text.clone(),
            usage: cmd.help_name.clone(),
            subcommands: Vec::new(),
            flags: cmd
                .flags
                .iter()
                .filter(|f| !f.hidden)
                .map(|f| CatalogFlag {
                    name: f.name.clone(),
                    usage: f.usage.clone(),
                })
                .collect(),
        }
    }
}

/// Visible commands by category, down to the third level
pub fn command_catalog(registry: &Registry) -> BTreeMap<String, Vec<CatalogCommand>> {
    let mut catalog: BTreeMap<String, Vec<CatalogCommand>> = BTreeMap::new();
    for cmd in registry.commands().iter().filter(|c| !c.hidden) {
        let mut top = CatalogCommand::from_descriptor(cmd);
        for sub in cmd.subcommands.iter().filter(|s| !s.hidden) {
            let mut second = CatalogCommand::from_descriptor(sub);
            second.subcommands = sub
                .subcommands
                .iter()
                .filter(|s| !s.hidden)
                .map(CatalogCommand::from_descriptor)
                .collect();
            top.subcommands.push(second);
        }
        catalog.entry(cmd.category.clone()).or_default().push(top);
    }
    catalog
}

//! Registry integrity checks run before any command executes

use std::collections::{HashMap, HashSet};

use crate::{
    constants::APP_NAME,
    descriptor::CommandDescriptor,
    error::{CliError, CliResult},
    registry::Registry,
};

/// Fail on the first alias declared twice among the direct subcommands of one
/// top-level command. The same alias may appear under different top-level commands.
pub fn validate_aliases(registry: &Registry) -> CliResult<()> {
    for command in registry.commands() {
        let mut seen = HashSet::new();
        for subcommand in &command.subcommands {
            for alias in &subcommand.aliases {
                if !seen.insert(alias.as_str()) {
                    return Err(CliError::DuplicateAlias {
                        alias: alias.clone(),
                        namespace: command.name.clone(),
                        subcommand: subcommand.name.clone(),
                    });
                }
            }
        }
    }
    Ok(())
}

/// Fail on two sibling commands answering to the same token, at any depth. Every
/// sibling's name and aliases are checked against the names and aliases of the others.
pub fn validate_names(registry: &Registry) -> CliResult<()> {
    check_siblings(registry.commands(), APP_NAME)
}

fn check_siblings(siblings: &[CommandDescriptor], namespace: &str) -> CliResult<()> {
    let mut owners: HashMap<&str, usize> = HashMap::new();
    for (index, command) in siblings.iter().enumerate() {
        for token in command.names() {
            match owners.insert(token, index) {
                Some(owner) if owner != index => {
                    return Err(CliError::DuplicateName {
                        name: token.to_string(),
                        namespace: namespace.to_string(),
                    });
                }
                _ => {}
            }
        }
    }
    for command in siblings {
        check_siblings(&command.subcommands, &command.full_name())?;
    }
    Ok(())
}

/// All startup checks, in order
pub fn validate_registry(registry: &Registry) -> CliResult<()> {
    validate_aliases(registry)?;
    validate_names(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn namespace(name: &str, subs: Vec<CommandDescriptor>) -> CommandDescriptor {
        CommandDescriptor::new(name).subcommands(subs)
    }

    #[test]
    fn test_distinct_aliases_pass() {
        let registry = Registry::from_commands(vec![namespace(
            "rt",
            vec![
                CommandDescriptor::new("upload").aliases(["u"]),
                CommandDescriptor::new("download").aliases(["dl"]),
            ],
        )]);
        assert!(validate_aliases(&registry).is_ok());
    }

    #[test]
    fn test_duplicate_sibling_alias_fails() {
        let registry = Registry::from_commands(vec![namespace(
            "rt",
            vec![
                CommandDescriptor::new("ping").aliases(["p"]),
                CommandDescriptor::new("property").aliases(["p"]),
            ],
        )]);

        let err = validate_aliases(&registry).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate Alias 'p' Found on rt property command."
        );
    }

    #[test]
    fn test_same_alias_under_different_namespaces_is_allowed() {
        let registry = Registry::from_commands(vec![
            namespace("rt", vec![CommandDescriptor::new("ping").aliases(["p"])]),
            namespace("pl", vec![CommandDescriptor::new("status").aliases(["s"])]),
            namespace("config", vec![CommandDescriptor::new("show").aliases(["s"])]),
        ]);
        assert!(validate_aliases(&registry).is_ok());
    }

    #[test]
    fn test_duplicate_sibling_name_fails() {
        let registry = Registry::from_commands(vec![namespace(
            "config",
            vec![CommandDescriptor::new("add"), CommandDescriptor::new("add")],
        )]);

        assert!(validate_aliases(&registry).is_ok());
        match validate_registry(&registry).unwrap_err() {
            CliError::DuplicateName { name, namespace } => {
                assert_eq!(name, "add");
                assert_eq!(namespace, "config");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_duplicate_top_level_name_fails() {
        let registry = Registry::from_commands(vec![
            CommandDescriptor::new("npm"),
            CommandDescriptor::new("npm"),
        ]);
        let err = validate_names(&registry).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate command name 'npm' found under jf.");
    }

    #[test]
    fn test_top_level_name_clashing_with_alias_fails() {
        let registry = Registry::from_commands(vec![
            CommandDescriptor::new("aud"),
            CommandDescriptor::new("audit").aliases(["aud"]),
        ]);

        assert!(validate_aliases(&registry).is_ok());
        let err = validate_registry(&registry).unwrap_err();
        assert_eq!(err.to_string(), "Duplicate command name 'aud' found under jf.");
    }

    #[test]
    fn test_subcommand_name_clashing_with_sibling_alias_fails() {
        let registry = Registry::from_commands(vec![namespace(
            "rt",
            vec![
                CommandDescriptor::new("search").aliases(["s"]),
                CommandDescriptor::new("s"),
            ],
        )]);

        assert!(validate_aliases(&registry).is_ok());
        match validate_names(&registry).unwrap_err() {
            CliError::DuplicateName { name, namespace } => {
                assert_eq!(name, "s");
                assert_eq!(namespace, "rt");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_name_equal_to_own_alias_is_allowed() {
        let registry = Registry::from_commands(vec![
            CommandDescriptor::new("go").aliases(["go"]),
            namespace("pl", vec![CommandDescriptor::new("status").aliases(["s"])]),
            namespace("rt", vec![CommandDescriptor::new("search").aliases(["s"])]),
        ]);
        assert!(validate_names(&registry).is_ok());
    }

    #[test]
    fn test_third_level_clash_names_full_path() {
        let registry = Registry::from_commands(vec![namespace(
            "build-tools",
            vec![namespace(
                "npm",
                vec![
                    CommandDescriptor::new("install").aliases(["i"]),
                    CommandDescriptor::new("i"),
                ],
            )],
        )]);
        let err = validate_names(&registry).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Duplicate command name 'i' found under build-tools npm."
        );
    }
}

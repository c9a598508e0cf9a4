//! Typo suggestions for unrecognized commands

use strsim::levenshtein;

use crate::descriptor::CommandDescriptor;

/// Largest edit distance still considered similar
const MAX_DISTANCE: usize = 2;

/// Find the commands most similar to `typed`.
///
/// An exact match on a second-level command name or alias wins outright and is returned
/// alone, e.g. `jf bp` suggests `rt bp`. Otherwise every top-level name or alias within
/// [`MAX_DISTANCE`] is a candidate: a strictly closer match replaces what was collected,
/// an equally close one is added. Alias matches are reported with the alias in place of
/// the canonical name.
pub fn search_similar_commands(commands: &[CommandDescriptor], typed: &str) -> Vec<String> {
    let mut min_distance = MAX_DISTANCE;
    let mut best = Vec::new();

    for cmd in commands {
        for sub in &cmd.subcommands {
            if let Some(exact) = sub.names().find(|n| levenshtein(n, typed) == 0) {
                return vec![format!("{} {}", cmd.name, exact)];
            }
        }

        for name in cmd.names() {
            let distance = levenshtein(name, typed);
            if distance < min_distance {
                min_distance = distance;
                best = vec![display_name(cmd, name)];
            } else if distance == min_distance {
                best.push(display_name(cmd, name));
            }
        }
    }
    best
}

fn display_name(cmd: &CommandDescriptor, matched: &str) -> String {
    cmd.full_name().replacen(&cmd.name, matched, 1)
}

/// First line printed when the typed command does not exist
pub fn not_found_message(app: &str, typed: &str) -> String {
    format!("'{app} {typed}' is not a {app} command. See --help")
}

/// Text proposing the suggestions, or `None` when there are none
pub fn similarity_message(app: &str, suggestions: &[String]) -> Option<String> {
    match suggestions {
        [] => None,
        [only] => Some(format!("The most similar command is:\n\t{app} {only}")),
        many => {
            let mut sorted = many.to_vec();
            sorted.sort();
            let separator = format!("\n\t{app} ");
            Some(format!(
                "The most similar commands are:\n\t{app} {}",
                sorted.join(&separator)
            ))
        }
    }
}

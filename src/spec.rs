//! File specs
//!
//! A file spec is a JSON document selecting the files a transfer command works on:
//!
//! ```json
//! { "files": [ { "pattern": "libs-local/*.jar", "target": "out/", "flat": "true" } ] }
//! ```
//!
//! The spec file may contain `${key}` placeholders filled from `--spec-vars`
//! (`key1=val1;key2=val2`). Any flag given explicitly on the command line overrides the
//! matching field of every file in the spec.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{
    descriptor::Invocation,
    error::{CliError, CliResult},
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileSpec {
    #[serde(default)]
    pub files: Vec<SpecFile>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecFile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub pattern: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclusions: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub props: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub target_props: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exclude_props: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sort_order: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sort_by: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub exclude_artifacts: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub include_deps: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub bundle: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub recursive: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub flat: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub explode: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub regexp: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub include_dirs: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub validate_symlinks: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub symlinks: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub transitive: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub public_gpg_key: String,
}

/// Parse `key1=val1;key2=val2` into a map. Entries without '=' are ignored.
pub fn spec_vars_to_map(raw: &str) -> HashMap<String, String> {
    raw.split(';')
        .filter_map(|pair| pair.split_once('='))
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .filter(|(k, _)| !k.is_empty())
        .collect()
}

pub fn replace_spec_vars(content: &str, vars: &HashMap<String, String>) -> String {
    vars.iter().fold(content.to_string(), |acc, (key, value)| {
        acc.replace(&format!("${{{key}}}"), value)
    })
}

impl FileSpec {
    pub fn from_file(path: &Path, vars: &HashMap<String, String>) -> CliResult<Self> {
        let raw = fs::read_to_string(path)?;
        let spec: FileSpec = serde_json::from_str(&replace_spec_vars(&raw, vars))
            .map_err(|e| CliError::InvalidSpec(format!("{}: {e}", path.display())))?;
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> CliResult<()> {
        if self.files.is_empty() {
            return Err(CliError::InvalidSpec("spec contains no files".into()));
        }
        if let Some(i) = self.files.iter().position(|f| f.pattern.is_empty()) {
            return Err(CliError::InvalidSpec(format!(
                "file #{} of the spec has no pattern",
                i + 1
            )));
        }
        Ok(())
    }
}

/// Replace every spec field whose flag was given on the command line
pub fn override_fields_if_set(file: &mut SpecFile, inv: &Invocation<'_>) -> CliResult<()> {
    override_array_if_set(&mut file.exclusions, inv, "exclusions");
    override_array_if_set(&mut file.sort_by, inv, "sort-by");
    override_int_if_set(&mut file.offset, inv, "offset")?;
    override_int_if_set(&mut file.limit, inv, "limit")?;

    let string_fields: [(&mut String, &str); 18] = [
        (&mut file.sort_order, "sort-order"),
        (&mut file.props, "props"),
        (&mut file.target_props, "target-props"),
        (&mut file.exclude_props, "exclude-props"),
        (&mut file.build, "build"),
        (&mut file.project, "project"),
        (&mut file.exclude_artifacts, "exclude-artifacts"),
        (&mut file.include_deps, "include-deps"),
        (&mut file.bundle, "bundle"),
        (&mut file.recursive, "recursive"),
        (&mut file.flat, "flat"),
        (&mut file.explode, "explode"),
        (&mut file.regexp, "regexp"),
        (&mut file.include_dirs, "include-dirs"),
        (&mut file.validate_symlinks, "validate-symlinks"),
        (&mut file.symlinks, "symlinks"),
        (&mut file.transitive, "transitive"),
        (&mut file.public_gpg_key, "gpg-key"),
    ];
    for (field, flag) in string_fields {
        override_string_if_set(field, inv, flag);
    }
    Ok(())
}

fn override_string_if_set(field: &mut String, inv: &Invocation<'_>, flag: &str) {
    if inv.is_set(flag) {
        if let Some(value) = inv.value(flag) {
            *field = value.to_string();
        }
    }
}

fn override_array_if_set(field: &mut Vec<String>, inv: &Invocation<'_>, flag: &str) {
    if inv.is_set(flag) {
        if let Some(value) = inv.value(flag) {
            *field = value.to_string().split(';').map(str::to_string).collect();
        }
    }
}

fn override_int_if_set(field: &mut Option<u64>, inv: &Invocation<'_>, flag: &str) -> CliResult<()> {
    if inv.is_set(flag) {
        if let Some(value) = inv.value(flag) {
            let raw = value.to_string();
            let parsed = raw.parse::<u64>().map_err(|_| {
                CliError::InvalidSpec(format!("--{flag} expects a number, got '{raw}'"))
            })?;
            *field = Some(parsed);
        }
    }
    Ok(())
}

/// Build the file spec of a transfer command: from `--spec` when given, otherwise from
/// the `<pattern> [target]` arguments. Command-line flags override spec fields.
pub fn file_spec_from_invocation(inv: &Invocation<'_>) -> CliResult<FileSpec> {
    let mut spec = match inv.string("spec").filter(|s| !s.is_empty()) {
        Some(path) => {
            if !inv.args.is_empty() {
                return Err(CliError::InvalidSpec(
                    "no arguments are accepted together with --spec".into(),
                ));
            }
            let vars = inv.string("spec-vars").map(spec_vars_to_map).unwrap_or_default();
            let mut spec = FileSpec::from_file(Path::new(path), &vars)?;
            for file in &mut spec.files {
                file.target = file.target.trim_start_matches('/').to_string();
            }
            spec
        }
        None => {
            let (pattern, target) = match inv.args.as_slice() {
                [pattern] => (pattern.clone(), String::new()),
                [pattern, target] => (pattern.clone(), target.clone()),
                _ => {
                    return Err(CliError::InvalidSpec(format!(
                        "wrong number of arguments ({}); expected <pattern> [target] or --spec",
                        inv.args.len()
                    )))
                }
            };
            FileSpec {
                files: vec![SpecFile {
                    pattern,
                    target,
                    ..Default::default()
                }],
            }
        }
    };

    for file in &mut spec.files {
        override_fields_if_set(file, inv)?;
    }
    Ok(spec)
}

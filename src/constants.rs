//! Names shared across the command tree, the dispatcher and the configuration layer.

/// Executable name shown in help, suggestions and completion scripts
pub const APP_NAME: &str = "jf";

pub const APP_USAGE: &str =
    "See https://docs.jfrog-applications.jfrog.io/jfrog-applications/jfrog-cli for full documentation.";

/// Category assigned to any command declared without one
pub const OTHER_CATEGORY: &str = "Other";
pub const COMMAND_NAMESPACES_CATEGORY: &str = "Command Namespaces";
pub const BUILD_TOOLS_CATEGORY: &str = "Package Managers";
pub const SECURITY_CATEGORY: &str = "Security";

pub const CMD_ARTIFACTORY: &str = "rt";
pub const CMD_MISSION_CONTROL: &str = "mc";
pub const CMD_DISTRIBUTION: &str = "ds";
pub const CMD_PIPELINES: &str = "pl";
pub const CMD_COMPLETION: &str = "completion";
pub const CMD_PLUGIN: &str = "plugin";
pub const CMD_CONFIG: &str = "config";
pub const CMD_PROJECT: &str = "project";
pub const CMD_OPTIONS: &str = "options";
pub const CMD_COMMANDS_CATALOG: &str = "commands-catalog";
pub const CMD_BUILD_TOOLS: &str = "build-tools";

// Environment variables
pub const ENV_HOME_DIR: &str = "JFROG_CLI_HOME_DIR";
pub const ENV_LOG_LEVEL: &str = "JFROG_CLI_LOG_LEVEL";
pub const ENV_CI: &str = "CI";
pub const ENV_BUILD_NAME: &str = "JFROG_CLI_BUILD_NAME";
pub const ENV_BUILD_NUMBER: &str = "JFROG_CLI_BUILD_NUMBER";
pub const ENV_BUILD_URL: &str = "JFROG_CLI_BUILD_URL";
pub const ENV_EXCLUDE: &str = "JFROG_CLI_ENV_EXCLUDE";
pub const ENV_PLUGINS_DIR: &str = "JFROG_CLI_PLUGINS_DIR";

/// Home directory under the user's home when `JFROG_CLI_HOME_DIR` is unset
pub const DEFAULT_HOME_DIR_NAME: &str = ".jfrog";
pub const SETTINGS_FILE: &str = "cli-settings.yaml";
pub const PLUGINS_DIR_NAME: &str = "plugins";

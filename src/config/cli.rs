use std::path::PathBuf;

use clap::{Args, ValueHint, builder::BoolishValueParser};

/// Command-line overrides applied on top of file and environment settings.
#[derive(Debug, Args, Default, Clone)]
pub struct ConfigOverrides {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "AACNEWS_CONFIG_FILE",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub config_file: Option<PathBuf>,

    /// API base URL, e.g. <http://localhost:5000/api/>
    #[arg(long = "site", value_name = "URL", global = true)]
    pub base_url: Option<String>,

    /// Credential store file holding the session's authorization data.
    #[arg(
        long = "store",
        value_name = "PATH",
        value_hint = ValueHint::FilePath,
        global = true
    )]
    pub store_path: Option<PathBuf>,

    /// Publish to Slack on `cross-post slack` instead of skipping it.
    #[arg(
        long = "slack-enabled",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub slack_enabled: Option<bool>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

//! Command-line surface for `aacnews-cli`.

#![deny(clippy::all, clippy::pedantic)]

use std::path::PathBuf;

use aacnews_admin::config::ConfigOverrides;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "aacnews-cli", version, about = "AACNews admin API CLI", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigOverrides,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Post category management
    Types(TypesArgs),
    /// Post management, including version history
    Posts(PostsArgs),
    /// Newsletter management, templates and delivery
    Newsletters(NewslettersArgs),
    /// Forward grouped posts to external services
    CrossPost(CrossPostArgs),
    /// Session credential handling
    Auth(AuthArgs),
}

#[derive(Parser, Debug)]
pub struct TypesArgs {
    #[command(subcommand)]
    pub action: TypesCmd,
}

#[derive(Subcommand, Debug)]
pub enum TypesCmd {
    /// List all types
    List,
    /// Get a type by id
    Get { id: String },
    /// Create a type, or update it when an id is given
    Save {
        #[arg(long)]
        id: Option<String>,
        #[arg(long)]
        name: Option<String>,
        /// JSON object used as the base payload; flags override its fields
        #[arg(long)]
        payload_file: Option<PathBuf>,
    },
    /// Delete a type
    Delete { id: String },
}

#[derive(Parser, Debug)]
pub struct PostsArgs {
    #[command(subcommand)]
    pub action: PostsCmd,
}

#[derive(Subcommand, Debug)]
pub enum PostsCmd {
    /// List posts
    List {
        /// Only posts marked for publishing
        #[arg(long, default_value_t = false)]
        published: bool,
    },
    /// Get a post by id
    Get { id: String },
    /// Create a post, or update it when an id is given
    Save(Box<PostSaveArgs>),
    /// Delete a post
    Delete { id: String },
    /// Show the version history of a post, or one version of it
    History {
        id: String,
        #[arg(long)]
        version: Option<String>,
    },
}

#[derive(Parser, Debug, Default)]
pub struct PostSaveArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub text: Option<String>,
    #[arg(long)]
    pub text_file: Option<PathBuf>,
    #[arg(long)]
    pub url: Option<String>,
    #[arg(long)]
    pub author: Option<String>,
    /// Publication date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub type_id: Option<String>,
    #[arg(long)]
    pub publish: Option<bool>,
    /// JSON object used as the base payload; flags override its fields
    #[arg(long)]
    pub payload_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct NewslettersArgs {
    #[command(subcommand)]
    pub action: NewslettersCmd,
}

#[derive(Subcommand, Debug)]
pub enum NewslettersCmd {
    /// List newsletters
    List,
    /// Get a newsletter by id
    Get { id: String },
    /// Create a newsletter, or update it when an id is given
    Save(Box<NewsletterSaveArgs>),
    /// Delete a newsletter
    Delete { id: String },
    /// Print the HTML template used for new issues
    Template,
    /// Send a rendered newsletter to the mailing list
    Send {
        #[arg(long)]
        title: String,
        #[arg(long)]
        html: Option<String>,
        #[arg(long)]
        html_file: Option<PathBuf>,
    },
}

#[derive(Parser, Debug, Default)]
pub struct NewsletterSaveArgs {
    #[arg(long)]
    pub id: Option<String>,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub spoiler: Option<String>,
    #[arg(long)]
    pub preamble: Option<String>,
    #[arg(long)]
    pub preamble_file: Option<PathBuf>,
    /// Issue date (YYYY-MM-DD)
    #[arg(long)]
    pub date: Option<String>,
    /// JSON object used as the base payload; flags override its fields
    #[arg(long)]
    pub payload_file: Option<PathBuf>,
}

#[derive(Parser, Debug)]
pub struct CrossPostArgs {
    #[command(subcommand)]
    pub action: CrossPostCmd,
}

#[derive(Subcommand, Debug)]
pub enum CrossPostCmd {
    /// Bookmark the grouped posts on Diigo
    Diigo {
        /// JSON array of column groups
        #[arg(long)]
        file: PathBuf,
    },
    /// Announce the grouped posts on Slack (skipped unless enabled)
    Slack {
        /// JSON array of column groups
        #[arg(long)]
        file: PathBuf,
    },
}

#[derive(Parser, Debug)]
pub struct AuthArgs {
    #[command(subcommand)]
    pub action: AuthCmd,
}

#[derive(Subcommand, Debug)]
pub enum AuthCmd {
    /// Save an access token into the credential store
    Store {
        /// File containing the token (takes precedence over env)
        #[arg(long)]
        token_file: Option<PathBuf>,
        /// Token from env (CLI flag intentionally disabled to avoid shell history leaks)
        #[arg(hide = true, env = "AACNEWS_TOKEN")]
        token_env: Option<String>,
    },
    /// Report whether a credential is available
    Status,
    /// Remove the stored token
    Clear,
}

//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Pageroute content URL resolver CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Routing config file path (default: routing.toml)
    #[arg(short = 'C', long, default_value = "routing.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Site document with pages and content (default: site.toml)
    #[arg(short, long, default_value = "site.toml", value_hint = clap::ValueHint::FilePath)]
    pub site: PathBuf,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Generate the absolute URL of a content item
    #[command(visible_alias = "g")]
    Generate {
        #[command(flatten)]
        args: GenerateArgs,
    },

    /// Match a URL and load the content behind it
    #[command(visible_alias = "m")]
    Match {
        /// Absolute URL or site-root path (`/news/2024/hello-world.html`)
        url: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the URL parameters of a page
    #[command(visible_alias = "p")]
    Params {
        /// Page id
        page: u64,
    },

    /// Print the route of a page, requirements inlined
    #[command(visible_alias = "r")]
    Route {
        /// Page id
        page: u64,
    },

    /// Report pages whose alias may produce the same URL
    #[command(visible_alias = "c")]
    Conflicts {
        /// Page id
        page: u64,
    },
}

/// Generate command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// Content kind (`page`, `news`, `tl_faq`, ...; `string_url` takes the URL as id)
    pub kind: String,

    /// Content id (or the raw URL for `string_url`)
    pub id: String,

    /// Route parameter (`name=value`), repeatable
    #[arg(short, long = "param", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub params: Vec<(String, String)>,

    /// Query parameter (`name=value`), repeatable
    #[arg(short, long = "query", value_name = "NAME=VALUE", value_parser = parse_pair)]
    pub query: Vec<(String, String)>,
}

/// `name=value` → `(name, value)`
fn parse_pair(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected `name=value`, got `{raw}`"))?;
    if name.is_empty() {
        return Err(format!("empty parameter name in `{raw}`"));
    }
    Ok((name.to_string(), value.to_string()))
}

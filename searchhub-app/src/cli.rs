use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Headless driver for the SearchHub result list.
#[derive(Debug, Parser)]
#[command(name = "searchhub", version, about)]
pub struct Cli {
    /// YAML configuration file; skipped when it does not exist
    #[arg(long, global = true, default_value = "searchhub.yaml", env = "SEARCHHUB_CONFIG")]
    pub config: PathBuf,

    /// Mirror log events to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render one page of a saved result set and print its markup
    Render(RenderArgs),
    /// Search through the backend, record the search, print a page of results
    Search(SearchArgs),
    /// Fetch an article through the backend and print what the modal shows
    Content {
        /// Article URL
        url: String,
    },
    /// Print the resolved configuration as JSON
    ShowConfig,
}

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// JSON file holding an array of results, or `{"results": [...]}`
    #[arg(short, long)]
    pub input: PathBuf,

    /// 1-based page to show; clamped to the last page
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Overrides `view.page_size`
    #[arg(long)]
    pub page_size: Option<usize>,
}

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search text
    pub query: String,

    /// Search type understood by the backend (`general`, `news`)
    #[arg(short = 't', long = "type", default_value = "general")]
    pub search_type: String,

    /// 1-based page to show; clamped to the last page
    #[arg(short, long, default_value_t = 1)]
    pub page: usize,

    /// Overrides `view.page_size`
    #[arg(long)]
    pub page_size: Option<usize>,
}

use anyhow::Result;
use clap::Parser;
use searchhub_common::observability::{LogConfig, init_logging};
use searchhub_config::{SearchHubConfig, SearchHubConfigLoader};

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Env wins over the YAML file.
    let cfg: SearchHubConfig = SearchHubConfigLoader::new()
        .with_optional_file(&cli.config)
        .load()?;

    let log_path = init_logging(LogConfig {
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.stderr || cli.verbose,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
        ..LogConfig::default()
    })?;
    tracing::debug!(target: "searchhub::app", log = %log_path.display(), config = %cli.config.display(), "app.start");

    match cli.command {
        Command::Render(args) => {
            let page = commands::render(&cfg, &args)?;
            println!("{}", page.container);
            if !page.pagination.is_empty() {
                println!("{}", page.pagination);
            }
            eprintln!("page {} of {}", page.current_page, page.total_pages);
        }
        Command::Search(args) => {
            let (summary, page) = commands::search(&cfg, &args).await?;
            println!("{}", page.container);
            if !page.pagination.is_empty() {
                println!("{}", page.pagination);
            }
            eprintln!(
                "{} results for {:?} ({}{}), page {} of {}",
                summary.result_count,
                summary.query,
                summary.search_type,
                if summary.from_cache { ", cached" } else { "" },
                page.current_page,
                page.total_pages
            );
        }
        Command::Content { url } => {
            let shown = commands::content(&cfg, &url).await?;
            println!("{}\n{}\n\n{}", shown.title, shown.meta, shown.body);
        }
        Command::ShowConfig => {
            println!("{}", serde_json::to_string_pretty(&cfg)?);
        }
    }

    Ok(())
}

// src/main.rs

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::ConsoleAppender,
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use notion_blog_index::config::{Command, EnvironmentCheck};
use notion_blog_index::{
    summarize_index, BlockNormalizer, BlockSource, CommandLineInput, DiagnosticReport,
    IndexCache, IndexFetcher, IndexMode, NotionHttpClient, NotionRepository,
    RecordId, SiteConfig,
};
use std::fs;
use std::sync::Arc;

/// Sets up logging configuration.
fn setup_logging(verbose: bool) -> anyhow::Result<()> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    let log_file_path = std::env::temp_dir().join("notion_blog_index.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(log4rs::append::console::Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] {t} - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(log_level)))
                .build("stderr", Box::new(stderr_appender)),
        )
        .appender(Appender::builder().build("file", Box::new(file_appender)))
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(LevelFilter::Debug),
        )?;

    log4rs::init_config(config)?;
    log::info!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// The index and block sources wired against the live API.
struct Site {
    config: SiteConfig,
    index: IndexCache,
    blocks: BlockNormalizer,
}

impl Site {
    fn from_cli(cli: &CommandLineInput) -> anyhow::Result<Self> {
        let config = SiteConfig::resolve(cli).context("Invalid configuration")?;
        Self::connect(config)
    }

    fn connect(config: SiteConfig) -> anyhow::Result<Self> {
        let client: Arc<dyn NotionRepository> = Arc::new(
            NotionHttpClient::new(&config.api_key).context("Failed to build the Notion client")?,
        );

        if config.use_cache {
            log::info!("Index cache enabled at {}", config.cache_base.display());
        } else {
            log::info!("Index cache disabled; every request goes to the Notion API");
        }

        let fetcher = Arc::new(IndexFetcher::new(client.clone(), config.collection.clone()));
        let index = IndexCache::new(fetcher, config.cache_slots(), config.use_cache);
        let blocks = BlockNormalizer::new(client);

        Ok(Self {
            config,
            index,
            blocks,
        })
    }

    async fn diagnose(&self, check: &EnvironmentCheck) -> anyhow::Result<()> {
        // Skips the cache so the report reflects the live collection.
        let refreshed = self.index.refresh(IndexMode::Normal).await;
        if let Some(persist) = refreshed.persist {
            persist.await?;
        }

        let report =
            DiagnosticReport::from_index(&self.config.collection, check.has_token, &refreshed.index);
        println!("{}", report.summary());
        Ok(())
    }

    async fn print_index(&self, mode: IndexMode, json: bool) -> anyhow::Result<()> {
        let resolved = self.index.resolve(mode).await;
        if let Some(persist) = resolved.persist {
            persist.await?;
        }
        let index = resolved.index;

        if json {
            println!("{}", serde_json::to_string_pretty(&index)?);
            return Ok(());
        }

        for (slug, post) in index.iter() {
            let date = if post.date.is_empty() {
                "undated"
            } else {
                post.date.as_str()
            };
            println!("{:<40} {:<12} {}", slug, date, post.title());
        }

        let summary = summarize_index(&index);
        println!(
            "\n{} posts ({} with previews, {} undated)",
            summary.posts, summary.with_preview, summary.undated
        );
        Ok(())
    }

    async fn print_blocks(&self, record: &RecordId) -> anyhow::Result<()> {
        let nodes = self.blocks.blocks(record).await;
        log::info!("Record {} has {} blocks", record, nodes.len());
        println!("{}", serde_json::to_string_pretty(&nodes)?);
        Ok(())
    }
}

/// Reports on the environment even when it is not usable: a missing or
/// invalid setting yields a report with no posts instead of an error.
async fn diagnose(cli: &CommandLineInput) -> anyhow::Result<()> {
    let check = EnvironmentCheck::from_env();
    match SiteConfig::resolve(cli) {
        Ok(config) => Site::connect(config)?.diagnose(&check).await,
        Err(e) => {
            log::warn!("Cannot query the collection: {}", e);
            let report = DiagnosticReport::unreachable(check.collection_id, check.has_token);
            println!("{}", report.summary());
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    match &cli.command {
        Command::Diagnose => diagnose(&cli).await?,
        Command::Index { mode, json } => {
            Site::from_cli(&cli)?
                .print_index((*mode).into(), *json)
                .await?
        }
        Command::Blocks { record_id } => {
            Site::from_cli(&cli)?
                .print_blocks(&RecordId::new(record_id.as_str()))
                .await?
        }
    }

    Ok(())
}

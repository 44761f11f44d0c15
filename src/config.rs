// src/config.rs
use crate::constants::DEFAULT_INDEX_CACHE;
use crate::error::AppError;
use crate::index::CacheSlots;
use crate::model::IndexMode;
use crate::types::{ApiKey, CollectionId};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const TOKEN_VAR: &str = "NOTION_TOKEN";
const COLLECTION_VAR: &str = "BLOG_INDEX_ID";
const USE_CACHE_VAR: &str = "USE_CACHE";
const CACHE_PATH_VAR: &str = "BLOG_INDEX_CACHE";

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// Bypass the index cache even when USE_CACHE=true
    #[arg(long, global = true, default_value_t = false)]
    pub no_cache: bool,

    /// Base path of the index cache (overrides BLOG_INDEX_CACHE)
    #[arg(long, global = true)]
    pub cache_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Check the token and collection, and list a few post titles
    Diagnose,

    /// Print the blog index
    Index {
        #[arg(long, value_enum, default_value_t = ModeArg::Normal)]
        mode: ModeArg,

        /// Print the index as JSON instead of one line per post
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Print the normalized content blocks of one post as JSON
    Blocks {
        /// Id of the post's page
        record_id: String,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeArg {
    Normal,
    Previews,
}

impl From<ModeArg> for IndexMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Normal => IndexMode::Normal,
            ModeArg::Previews => IndexMode::Previews,
        }
    }
}

/// Resolved site configuration, validated and ready to build the pipeline.
#[derive(Debug, Clone)]
pub struct SiteConfig {
    pub api_key: ApiKey,
    pub collection: CollectionId,
    pub use_cache: bool,
    pub cache_base: PathBuf,
    pub verbose: bool,
}

impl SiteConfig {
    /// Resolves the configuration from CLI input and the process environment.
    pub fn resolve(cli: &CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with(cli, |name| std::env::var(name).ok())
    }

    /// Resolves the configuration with an explicit variable lookup.
    pub fn resolve_with<F>(cli: &CommandLineInput, var: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = var(TOKEN_VAR).filter(|v| !v.is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!("{} environment variable not set", TOKEN_VAR))
        })?;
        let collection = var(COLLECTION_VAR).filter(|v| !v.is_empty()).ok_or_else(|| {
            AppError::MissingConfiguration(format!(
                "{} environment variable not set",
                COLLECTION_VAR
            ))
        })?;

        let use_cache = var(USE_CACHE_VAR).as_deref() == Some("true") && !cli.no_cache;
        let cache_base = cli
            .cache_file
            .clone()
            .or_else(|| var(CACHE_PATH_VAR).filter(|v| !v.is_empty()).map(PathBuf::from))
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INDEX_CACHE));

        Ok(SiteConfig {
            api_key: ApiKey::new(token)?,
            collection: CollectionId::parse(&collection)?,
            use_cache,
            cache_base,
            verbose: cli.verbose,
        })
    }

    pub fn cache_slots(&self) -> CacheSlots {
        CacheSlots::from_base(&self.cache_base)
    }
}

/// What the environment provides, read without validating it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentCheck {
    pub has_token: bool,
    /// The collection id, hyphenated when it parses and verbatim otherwise.
    pub collection_id: Option<String>,
}

impl EnvironmentCheck {
    pub fn from_env() -> Self {
        Self::with(|name| std::env::var(name).ok())
    }

    pub fn with<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let collection_id = var(COLLECTION_VAR)
            .filter(|v| !v.is_empty())
            .map(|raw| match CollectionId::parse(&raw) {
                Ok(id) => id.to_hyphenated(),
                Err(_) => raw,
            });

        Self {
            has_token: var(TOKEN_VAR).is_some_and(|v| !v.is_empty()),
            collection_id,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            api_key: ApiKey::new("secret_default_key_for_testing_only")
                .expect("Default API key should be valid"),
            collection: CollectionId::parse("12345678123456781234567812345678")
                .expect("Example collection id should always be valid"),
            use_cache: false,
            cache_base: PathBuf::from(DEFAULT_INDEX_CACHE),
            verbose: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn cli(args: &[&str]) -> CommandLineInput {
        CommandLineInput::parse_from(std::iter::once("notion-blog-index").chain(args.iter().copied()))
    }

    const BASE_ENV: &[(&str, &str)] = &[
        ("NOTION_TOKEN", "secret_abcdefghijklmnopqrstuvwxyz"),
        ("BLOG_INDEX_ID", "a1b2c3d4-e5f6-7890-abcd-ef1234567890"),
    ];

    #[test]
    fn caching_requires_the_literal_true() {
        let mut vars = BASE_ENV.to_vec();
        vars.push(("USE_CACHE", "1"));
        let config = SiteConfig::resolve_with(&cli(&["diagnose"]), env(&vars)).unwrap();
        assert!(!config.use_cache);

        vars.pop();
        vars.push(("USE_CACHE", "true"));
        let config = SiteConfig::resolve_with(&cli(&["diagnose"]), env(&vars)).unwrap();
        assert!(config.use_cache);

        let config = SiteConfig::resolve_with(&cli(&["--no-cache", "diagnose"]), env(&vars)).unwrap();
        assert!(!config.use_cache);
    }

    #[test]
    fn cache_path_precedence() {
        let mut vars = BASE_ENV.to_vec();
        let config = SiteConfig::resolve_with(&cli(&["diagnose"]), env(&vars)).unwrap();
        assert_eq!(config.cache_base, PathBuf::from(".blog_index_data"));

        vars.push(("BLOG_INDEX_CACHE", "/var/cache/blog"));
        let config = SiteConfig::resolve_with(&cli(&["diagnose"]), env(&vars)).unwrap();
        assert_eq!(config.cache_base, PathBuf::from("/var/cache/blog"));

        let config = SiteConfig::resolve_with(
            &cli(&["index", "--cache-file", "/tmp/idx"]),
            env(&vars),
        )
        .unwrap();
        assert_eq!(config.cache_base, PathBuf::from("/tmp/idx"));
    }

    #[test]
    fn missing_token_is_a_configuration_error() {
        let result = SiteConfig::resolve_with(
            &cli(&["diagnose"]),
            env(&[("BLOG_INDEX_ID", "a1b2c3d4e5f67890abcdef1234567890")]),
        );
        assert!(matches!(result, Err(AppError::MissingConfiguration(_))));
    }

    #[test]
    fn environment_check_reports_without_validating() {
        let check = EnvironmentCheck::with(env(&[]));
        assert_eq!(
            check,
            EnvironmentCheck {
                has_token: false,
                collection_id: None
            }
        );

        let check = EnvironmentCheck::with(env(&[
            ("NOTION_TOKEN", ""),
            ("BLOG_INDEX_ID", "a1b2c3d4e5f67890abcdef1234567890"),
        ]));
        assert!(!check.has_token);
        assert_eq!(
            check.collection_id.as_deref(),
            Some("a1b2c3d4-e5f6-7890-abcd-ef1234567890")
        );

        let check = EnvironmentCheck::with(env(&[
            ("NOTION_TOKEN", "not-a-valid-key"),
            ("BLOG_INDEX_ID", "my-blog"),
        ]));
        assert!(check.has_token);
        assert_eq!(check.collection_id.as_deref(), Some("my-blog"));
    }

    #[test]
    fn subcommands_parse() {
        assert_eq!(
            cli(&["index", "--mode", "previews", "--json"]).command,
            Command::Index {
                mode: ModeArg::Previews,
                json: true
            }
        );
        assert_eq!(
            cli(&["blocks", "abc"]).command,
            Command::Blocks {
                record_id: "abc".to_string()
            }
        );
    }
}

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aa_agents::{build_tool_registry, ArticleAssistantAgent, InternalAgent};
use aa_tools::{FetchRequest, FetchResult, Platform, TOOL_NAME};

mod config;
mod setup;

use config::Config;

/// Log level for tracing output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Most verbose
    Trace,
    /// Requests, responses and tool arguments
    Debug,
    /// Standard: high-level flow
    Info,
    /// Quiet: only warnings and errors
    Warn,
    /// Minimal: only errors
    Error,
}

impl LogLevel {
    fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

#[derive(Parser)]
#[command(name = "aa")]
#[command(author, version, about = "Article assistant: draft new articles from your past posts", long_about = None)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, value_enum, default_value = "warn")]
    pub log_level: LogLevel,

    /// Enable debug logging (shorthand for --log-level debug)
    #[arg(short, long)]
    pub debug: bool,

    /// Write logs to file (JSON-lines format)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Configuration file (default: ~/.config/article-assistant/config.toml)
    #[arg(short, long, env = "ARTICLE_ASSISTANT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch a user's recent articles from one platform
    Fetch {
        /// Platform identifier (see `aa platforms`)
        #[arg(short, long)]
        platform: String,

        /// Username or ID on the platform
        #[arg(short, long)]
        username: String,

        /// Print the raw tool output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List supported platforms
    Platforms,
    /// Print the tool definitions offered to the agent
    Tools,
    /// Show the assistant's model, tools, memory options and instructions
    Agent,
    /// Show current configuration
    Config,
    /// Write a configuration template
    Setup {
        /// Replace an existing configuration (it is backed up first)
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Resolve log level: --debug overrides --log-level
    let log_level = if cli.debug {
        LogLevel::Debug
    } else {
        cli.log_level
    };
    init_logging(log_level, cli.log_file.as_ref())?;

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => Config::config_path()?,
    };

    // Handle setup before config is read
    if let Commands::Setup { force } = &cli.command {
        return setup::run(&config_path, *force);
    }

    let config = Config::load(&config_path)?;

    match &cli.command {
        Commands::Fetch {
            platform,
            username,
            json,
        } => fetch_articles(&config, FetchRequest::new(platform, username), *json).await,
        Commands::Platforms => list_platforms(),
        Commands::Tools => list_tools(&config),
        Commands::Agent => show_agent(&config),
        Commands::Config => show_config(&config, &config_path),
        Commands::Setup { .. } => unreachable!(),
    }
}

fn init_logging(level: LogLevel, log_file: Option<&PathBuf>) -> Result<()> {
    let filter = EnvFilter::new(level.as_filter());

    if let Some(log_path) = log_file {
        // Log file specified: write JSON to file
        let file = std::fs::File::create(log_path)
            .with_context(|| format!("Failed to create log file: {:?}", log_path))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::sync::Mutex::new(file)))
            .init();
    } else {
        // Keep stdout for command output
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }

    Ok(())
}

/// Call the tool exactly as the agent would.
async fn fetch_articles(config: &Config, request: FetchRequest, json: bool) -> Result<()> {
    let agent = ArticleAssistantAgent::with_config(config.agent.clone());
    let tools = agent.tools(&build_tool_registry(&config.articles));
    let arguments = serde_json::to_value(&request)?;

    let output = match tools.execute(TOOL_NAME, arguments).await {
        Ok(output) => output,
        Err(e) => {
            tracing::error!(error = %e, "Article retrieval failed");
            eprintln!("{}", agent.fallback_message());
            return Err(e.into());
        }
    };

    if json {
        println!("{}", output.content);
        return Ok(());
    }

    let result: FetchResult =
        serde_json::from_str(&output.content).context("Tool returned malformed output")?;
    println!("{}", format_articles(&result));
    Ok(())
}

fn format_articles(result: &FetchResult) -> String {
    if result.articles.is_empty() {
        return "No articles found.".to_string();
    }

    result
        .articles
        .iter()
        .enumerate()
        .map(|(i, article)| format!("{}. {}\n   {}", i + 1, article.title, article.url))
        .collect::<Vec<_>>()
        .join("\n")
}

fn list_platforms() -> Result<()> {
    println!("Supported platforms:\n");
    for platform in Platform::ALL {
        println!("  {:<8} {}", platform.as_str(), platform.display_name());
    }
    Ok(())
}

fn list_tools(config: &Config) -> Result<()> {
    let registry = build_tool_registry(&config.articles);
    println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
    Ok(())
}

fn show_agent(config: &Config) -> Result<()> {
    let agent = ArticleAssistantAgent::with_config(config.agent.clone());
    let memory = agent.memory();

    println!("Agent: {}", agent.name());
    println!("  {}", agent.description());
    println!();
    println!("Model: {}", agent.model());
    println!("Tools: {}", agent.tool_names().join(", "));
    println!();
    println!("Memory:");
    println!("  storage:         {}", config.memory_storage().display());
    println!("  last_messages:   {}", memory.last_messages);
    println!("  semantic_recall: {}", memory.semantic_recall);
    println!("  generate_title:  {}", memory.generate_title);
    println!();
    println!("Instructions:\n");
    println!("{}", agent.system_prompt());
    Ok(())
}

fn show_config(config: &Config, path: &std::path::Path) -> Result<()> {
    let source = if path.exists() { "" } else { " (not found, showing defaults)" };
    println!("# {}{}\n", path.display(), source);
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aa_tools::Article;

    #[test]
    fn test_cli_parses_fetch() {
        let cli = Cli::try_parse_from(["aa", "fetch", "-p", "zenn", "-u", "carol", "--json"]).unwrap();
        match cli.command {
            Commands::Fetch {
                platform,
                username,
                json,
            } => {
                assert_eq!(platform, "zenn");
                assert_eq!(username, "carol");
                assert!(json);
            }
            _ => panic!("expected fetch command"),
        }
        assert_eq!(cli.log_level, LogLevel::Warn);
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["aa"]).is_err());
    }

    #[test]
    fn test_format_articles() {
        let result = FetchResult {
            articles: vec![
                Article::new("T1", "https://qiita.com/alice/items/1"),
                Article::new("T2", "https://qiita.com/alice/items/2"),
            ],
        };
        assert_eq!(
            format_articles(&result),
            "1. T1\n   https://qiita.com/alice/items/1\n2. T2\n   https://qiita.com/alice/items/2"
        );
        assert_eq!(format_articles(&FetchResult::default()), "No articles found.");
    }
}

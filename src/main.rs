mod repl;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sentiment_analytics::{load_csv, HistorySummary, ReportGenerator};
use sentiment_core::config::AppConfig;
use sentiment_core::{Analyzer, Interpretation};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Log directive used when RUST_LOG is unset.
const DEFAULT_LOG_FILTER: &str =
    "sentiment_pro=info,sentiment_server=info,sentiment_analytics=info,sentiment_core=info,warn";

#[derive(Parser)]
#[command(
    name = "sentiment-pro",
    about = "Analyze the polarity and subjectivity of text",
    version,
    author
)]
struct Cli {
    /// Path to config file (default: ~/.config/sentiment-pro/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web app
    Serve {
        /// Bind host
        #[arg(long)]
        host: Option<String>,
        /// Bind port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Analyze a single piece of text and exit
    Analyze {
        /// Text to analyze
        text: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the interactive analyzer (default)
    Repl,

    /// Print statistics for an exported CSV file
    Summarize {
        /// Path to a CSV produced by the export
        path: PathBuf,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,
    /// Initialize default configuration file
    Init,
    /// Print config file path
    Path,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new(std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(h) = host {
                config.server.host = h;
            }
            if let Some(p) = port {
                config.server.port = p;
            }
            sentiment_server::serve(config).await?;
        }
        Some(Commands::Analyze { text, json }) => {
            let analyzer = Analyzer::from_config(&config)?;
            analyze_once(&analyzer, &text, json)?;
        }
        Some(Commands::Summarize { path }) => {
            let records = load_csv(&path)?;
            tracing::info!(path = %path.display(), count = records.len(), "Loaded history");
            print!(
                "{}",
                ReportGenerator::text_summary(&HistorySummary::from_records(&records))
            );
            if !records.is_empty() {
                println!();
                print!(
                    "{}",
                    ReportGenerator::history_list(
                        &records,
                        config.display.recent_limit,
                        config.display.preview_chars
                    )
                );
            }
        }
        Some(Commands::Config { action }) => {
            handle_config_command(action, &config)?;
        }
        Some(Commands::Repl) | None => {
            repl::run(config)?;
        }
    }

    Ok(())
}

fn analyze_once(analyzer: &Analyzer, text: &str, json: bool) -> Result<()> {
    let Some(record) = analyzer.analyze(text) else {
        if json {
            println!("null");
        } else {
            println!("Nothing to analyze.");
        }
        return Ok(());
    };

    if json {
        let value = serde_json::json!({
            "metrics": record.metrics(),
            "interpretation": Interpretation::of(&record),
            "record": record,
        });
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!("{}", ReportGenerator::result_line(&record));
        print!("{}", ReportGenerator::details(&record));
        println!("{}", ReportGenerator::interpretation(&record));
    }
    Ok(())
}

fn handle_config_command(action: Option<ConfigAction>, config: &AppConfig) -> Result<()> {
    match action {
        Some(ConfigAction::Show) | None => {
            let toml_str = toml::to_string_pretty(config)?;
            println!("{}", toml_str);
        }
        Some(ConfigAction::Init) => {
            let path = AppConfig::default_path();
            if path.exists() {
                println!("Config already exists at: {}", path.display());
            } else {
                config.save()?;
                println!("Created default config at: {}", path.display());
            }
        }
        Some(ConfigAction::Path) => {
            println!("{}", AppConfig::default_path().display());
        }
    }
    Ok(())
}

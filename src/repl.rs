use anyhow::Result;
use rustyline::error::ReadlineError;
use rustyline::{Config as RlConfig, DefaultEditor};
use sentiment_analytics::{save_csv, HistorySummary, ReportGenerator};
use sentiment_core::config::AppConfig;
use sentiment_core::{Analyzer, SentimentCategory, SessionHistory};
use std::path::Path;

const BANNER: &str = r#"
  ╔═══════════════════════════════════════════╗
  ║        🎭 Sentiment Analyzer Pro          ║
  ║   Polarity and subjectivity of your text  ║
  ╚═══════════════════════════════════════════╝

  Type some text and press Enter to analyze it.
  Commands:
    /stats          Show session statistics
    /history        Show recent analyses
    /details        Toggle detailed analysis
    /clear          Clear session history
    /export <path>  Save history as CSV
    /help           Show this help
    /exit           Quit
"#;

/// Interactive state for one REPL run.
struct Repl {
    analyzer: Analyzer,
    history: SessionHistory,
    show_details: bool,
    config: AppConfig,
}

/// Run the interactive REPL.
pub fn run(config: AppConfig) -> Result<()> {
    println!("{}", BANNER);

    let analyzer = Analyzer::from_config(&config)?;
    println!("  Scorer: {}", analyzer.scorer_name());
    println!();

    let mut repl = Repl {
        analyzer,
        history: SessionHistory::new(),
        show_details: false,
        config,
    };

    let rl_config = RlConfig::builder().auto_add_history(true).build();
    let history_path = AppConfig::data_dir().join("repl_history.txt");
    let mut rl = DefaultEditor::with_config(rl_config)?;
    let _ = rl.load_history(&history_path);

    loop {
        let prompt = format!(
            "\x1b[1;36m{}\x1b[0m \x1b[1;32m❯\x1b[0m ",
            repl.history.len()
        );

        match rl.readline(&prompt) {
            Ok(line) => {
                let input = line.trim();
                if input.is_empty() {
                    continue;
                }

                if input.starts_with('/') {
                    if !repl.handle_command(input)? {
                        break;
                    }
                    continue;
                }

                repl.analyze(input);
            }
            Err(ReadlineError::Interrupted) => {
                println!("^C");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye!");
                break;
            }
            Err(e) => {
                eprintln!("Input error: {}", e);
                break;
            }
        }
    }

    if let Some(parent) = history_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let _ = rl.save_history(&history_path);

    Ok(())
}

fn ansi_color(category: SentimentCategory) -> &'static str {
    match category {
        SentimentCategory::Positive => "\x1b[1;32m",
        SentimentCategory::Negative => "\x1b[1;31m",
        SentimentCategory::Neutral => "\x1b[1;33m",
    }
}

impl Repl {
    fn analyze(&mut self, text: &str) {
        let Some(record) = self.analyzer.analyze(text) else {
            return;
        };
        println!(
            "{}{}\x1b[0m",
            ansi_color(record.sentiment),
            ReportGenerator::result_line(&record)
        );
        if self.show_details {
            print!("{}", ReportGenerator::details(&record));
            println!("{}", ReportGenerator::interpretation(&record));
        }
        self.history.push(record);
    }

    /// Handle a slash command. Returns `true` to continue the loop, `false` to exit.
    fn handle_command(&mut self, input: &str) -> Result<bool> {
        let (cmd, arg) = match input.split_once(' ') {
            Some((cmd, arg)) => (cmd, arg.trim()),
            None => (input, ""),
        };

        match cmd {
            "/exit" | "/quit" | "/q" => {
                println!("Goodbye!");
                return Ok(false);
            }
            "/stats" => {
                let summary = HistorySummary::from_records(self.history.records());
                print!("{}", ReportGenerator::text_summary(&summary));
                for slice in summary.distribution() {
                    if slice.count > 0 {
                        println!("  {}", ReportGenerator::share_bar(slice.category, slice.share, 20));
                    }
                }
            }
            "/history" | "/ls" => {
                print!(
                    "{}",
                    ReportGenerator::history_list(
                        self.history.records(),
                        self.config.display.recent_limit,
                        self.config.display.preview_chars
                    )
                );
            }
            "/details" => {
                self.show_details = !self.show_details;
                println!(
                    "Detailed analysis {}.",
                    if self.show_details { "on" } else { "off" }
                );
            }
            "/clear" => {
                let cleared = self.history.len();
                self.history.clear();
                tracing::debug!(cleared, "Cleared history");
                println!("Cleared session history.");
            }
            "/export" => {
                let path = if arg.is_empty() {
                    self.config.export.file_name.as_str()
                } else {
                    arg
                };
                match save_csv(self.history.records(), Path::new(path)) {
                    Ok(()) => println!("Exported {} analyses to {}", self.history.len(), path),
                    Err(e) => eprintln!("\x1b[0;31mExport failed: {}\x1b[0m", e),
                }
            }
            "/help" | "/?" => {
                println!("  /stats          Show session statistics");
                println!("  /history        Show recent analyses");
                println!("  /details        Toggle detailed analysis");
                println!("  /clear          Clear session history");
                println!("  /export <path>  Save history as CSV");
                println!("  /help           Show this help");
                println!("  /exit           Quit");
            }
            _ => {
                println!(
                    "Unknown command: {}. Type /help for available commands.",
                    cmd
                );
            }
        }

        Ok(true)
    }
}

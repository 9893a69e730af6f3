use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use toxmeter::config::Config;
use toxmeter::output::charts::ChartData;
use toxmeter::output::terminal;
use toxmeter::toxicity::analyzer::{analyze, check_input, Analysis};
use toxmeter::toxicity::error::AnalysisError;
use toxmeter::toxicity::score::Category;
use toxmeter::toxicity::traits::CompletionModel;

/// toxmeter: six-category toxicity analysis.
///
/// Sends text to a Gemini model, extracts the JSON score it returns, and
/// shows an overall verdict with per-category charts.
#[derive(Parser)]
#[command(name = "toxmeter", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a piece of text (argument, --file, or stdin)
    Analyze {
        /// The text to analyze. Reads stdin when omitted.
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(long, conflicts_with = "text")]
        file: Option<PathBuf>,

        /// Print the analysis and chart data as JSON
        #[arg(long)]
        json: bool,
    },

    /// Analyze one line at a time until `:q` or end of input
    Interactive,

    /// Show the active configuration
    Status,

    /// Run the browser dashboard
    #[cfg(feature = "web")]
    Serve {
        /// Port to listen on (default: 8080)
        #[arg(long, default_value = "8080")]
        port: u16,

        /// Address to bind (default: 127.0.0.1)
        #[arg(long, default_value = "127.0.0.1")]
        bind: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging to stderr so --json output on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("toxmeter=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { text, file, json } => {
            let text = read_input(text, file)?;
            // Blank input is reported even when no key is configured
            if let Err(e) = check_input(&text) {
                if json {
                    print_json(&Err(e))?;
                    std::process::exit(1);
                }
                return Err(e.into());
            }
            let model = config.build_model()?;

            let result = run_one(&model, &text, !json).await;

            if json {
                print_json(&result)?;
                if result.is_err() {
                    std::process::exit(1);
                }
            } else {
                match result {
                    Ok(analysis) => terminal::display_analysis(&analysis),
                    Err(e) => return Err(e.into()),
                }
            }
        }

        Commands::Interactive => {
            let model = config.build_model()?;
            info!(model = model.name(), "Starting interactive session");

            println!("{}", "Toxic Comment Detection System".bold());
            println!("Enter text to analyze, one line at a time. `:q` to quit.\n");

            let mut lines = BufReader::new(tokio::io::stdin()).lines();
            loop {
                print!("{} ", ">".bold());
                std::io::stdout().flush()?;

                let Some(line) = lines.next_line().await? else {
                    println!();
                    break;
                };
                if line.trim() == ":q" {
                    break;
                }

                match run_one(&model, &line, true).await {
                    Ok(analysis) => terminal::display_analysis(&analysis),
                    Err(e) => terminal::display_error(&e),
                }
            }
        }

        Commands::Status => {
            println!("Model: {}", config.model);
            println!("Endpoint: {}", config.api_base);
            println!("Timeout: {}s", config.timeout.as_secs());
            if config.api_key.is_empty() {
                println!("API key: {}", "not set".red());
                println!("  Add GEMINI_API_KEY to your .env file");
            } else {
                println!("API key: {}", "set".green());
            }
            let labels: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
            println!("Categories: {}", labels.join(", "));
        }

        #[cfg(feature = "web")]
        Commands::Serve { port, bind } => {
            let model = config.build_model_or_placeholder()?;
            if config.api_key.is_empty() {
                tracing::warn!("GEMINI_API_KEY not set; every analysis will fail until it is");
            }
            toxmeter::web::run_server(std::sync::Arc::from(model), port, &bind).await?;
        }
    }

    Ok(())
}

/// Run one analysis, optionally with a busy spinner.
async fn run_one(
    model: &dyn CompletionModel,
    text: &str,
    spinner: bool,
) -> Result<Analysis, AnalysisError> {
    let pb = spinner.then(|| terminal::busy_spinner("Analyzing ..."));
    let result = analyze(model, text).await;
    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    result
}

/// Resolve the text to analyze from the argument, a file, or stdin.
fn read_input(text: Option<String>, file: Option<PathBuf>) -> Result<String> {
    if let Some(text) = text {
        return Ok(text);
    }
    if let Some(path) = file {
        return std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()));
    }
    std::io::read_to_string(std::io::stdin()).context("Failed to read stdin")
}

/// Print a result as JSON: `{analysis, charts}` or `{error, kind}`.
fn print_json(result: &Result<Analysis, AnalysisError>) -> Result<()> {
    let value = match result {
        Ok(analysis) => serde_json::json!({
            "analysis": analysis,
            "charts": ChartData::from_score(&analysis.scores),
        }),
        Err(e) => serde_json::json!({
            "error": e.to_string(),
            "kind": e.kind(),
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

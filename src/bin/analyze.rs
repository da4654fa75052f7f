use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use detector::chat::ChatService;
use detector::classifier::{Classifier, InferenceClassifier};
use detector::credibility::CredibilityService;
use detector::format_analysis;
use detector::gemini::GeminiClient;
use detector::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "analyze")]
#[command(about = "Run fake-news detection, credibility analysis or chat from the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format a saved credibility answer into markup (no network).
    Format(Input),
    /// Classify text as fake or real news.
    Classify(Input),
    /// Ask the generative model for a credibility critique.
    Credibility(Input),
    /// Ask the media-literacy assistant a question.
    Chat(Input),
}

#[derive(Args, Debug)]
struct Input {
    /// Inline text. Falls back to --file, then stdin.
    text: Option<String>,
    #[arg(long)]
    file: Option<PathBuf>,
}

impl Input {
    async fn read(self) -> Result<String> {
        let text = match (self.text, self.file) {
            (Some(text), _) => text,
            (None, Some(path)) => tokio::fs::read_to_string(&path)
                .await
                .with_context(|| format!("failed reading input file: {}", path.display()))?,
            (None, None) => {
                let mut buf = String::new();
                tokio::io::stdin()
                    .read_to_string(&mut buf)
                    .await
                    .context("failed reading stdin")?;
                buf
            }
        };

        if text.trim().is_empty() {
            anyhow::bail!("no text provided");
        }
        Ok(text)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = AppConfig::from_env();

    match cli.command {
        Command::Format(input) => {
            let result = format_analysis(&input.read().await?);
            println!("{}", result.markup);
            print_score(result.score);
        }
        Command::Classify(input) => {
            let text = input.read().await?;
            let classifier = InferenceClassifier::new(&config.classifier);
            let result = classifier.classify(&text).await?;
            println!(
                "{} (confidence {:.2}%)",
                result.label.display_name(),
                result.confidence * 100.0
            );
        }
        Command::Credibility(input) => {
            let text = input.read().await?;
            let service = CredibilityService::new(Arc::new(GeminiClient::new(&config.gemini)));
            let result = service.analyze(&text).await;
            println!("{}", result.markup);
            print_score(result.score);
        }
        Command::Chat(input) => {
            let message = input.read().await?;
            let chat = ChatService::new(Arc::new(GeminiClient::new(&config.gemini)));
            println!("{}", chat.answer(&message).await);
        }
    }

    Ok(())
}

fn print_score(score: Option<u32>) {
    match score {
        Some(score) => println!("Credibility score: {score}/10"),
        None => println!("Credibility score: n/a"),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

//! Sends one prompt to the configured Ollama server and prints the answer.
//!
//! ```text
//! ollama-probe "Productivity is about systems, not willpower."
//! ollama-probe --title "Weekly review #planning" "- inbox" "- calendar"
//! ```

use anyhow::{bail, Result};
use clap::Parser;
use tagtimer_lib::{settings::OllamaSettings, utils::init_logging, OllamaClient};

#[derive(Debug, Parser)]
#[command(about = "Check a local Ollama server and run one completion")]
struct Args {
    /// Expand the idea as the notes of an activity with this title
    #[arg(long)]
    title: Option<String>,

    /// Ollama base URL (defaults to settings / TAGTIMER_OLLAMA_URL)
    #[arg(long)]
    url: Option<String>,

    /// Model name (defaults to settings / TAGTIMER_OLLAMA_MODEL)
    #[arg(long)]
    model: Option<String>,

    #[arg(long)]
    verbose: bool,

    #[arg(default_value = "Productivity is about systems, not willpower.")]
    idea: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let mut settings = OllamaSettings::default().with_env_overrides();
    if let Some(url) = args.url {
        settings.base_url = url;
    }
    if let Some(model) = args.model {
        settings.model = model;
    }
    let client = OllamaClient::from_settings(&settings);

    if !client.is_available().await {
        bail!("Ollama is not reachable at {}", client.base_url());
    }

    let idea = args.idea.join("\n");
    let answer = match args.title {
        Some(title) => client.expand_note(&title, &idea).await?,
        None => {
            let prompt = format!("Write a short paragraph expanding on this idea: {idea}");
            client.generate(&prompt).await?
        }
    };

    println!("Response from {}:\n{}", client.model(), answer);
    Ok(())
}

mod app;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use mikra_core::TextMode;

#[derive(Parser)]
#[command(name = "mikra", version, about = "Oral-reading diagnostics for Hebrew")]
struct Cli {
    /// Print debug information
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a student's oral reading against a target text
    Analyze {
        /// File containing the target text the student was asked to read
        #[arg(long)]
        text: PathBuf,

        /// Pre-recorded audio file (wav, mp3, webm, ogg, opus, m4a, aac, flac)
        #[arg(long, conflicts_with = "record")]
        audio: Option<PathBuf>,

        /// Record from the microphone instead of loading a file
        #[arg(long)]
        record: bool,

        /// Whether the target text is pointed (has niqqud)
        #[arg(long, default_value = "pointed")]
        mode: TextMode,

        /// Student's grade, e.g. ג
        #[arg(long)]
        grade: Option<String>,

        /// Student's age
        #[arg(long)]
        age: Option<String>,

        /// Pronunciation tradition / dialect
        #[arg(long)]
        dialect: Option<String>,

        /// Free-form teacher notes to pass to the model
        #[arg(long)]
        notes: Option<String>,

        /// Model name (overrides settings)
        #[arg(long)]
        model: Option<String>,

        /// Sampling temperature (overrides settings)
        #[arg(long)]
        temperature: Option<f64>,

        /// Proxy endpoint; takes precedence over any API key
        #[arg(long)]
        proxy_url: Option<String>,

        /// Provider API key (or set GEMINI_API_KEY)
        #[arg(long)]
        api_key: Option<String>,

        /// Also write the report as an HTML file
        #[arg(long)]
        html: Option<PathBuf>,
    },

    /// Record from the microphone and save the audio to a file
    Record {
        /// Output path; the extension is chosen by the selected encoding
        #[arg(long, short)]
        output: PathBuf,
    },

    /// Interactive configuration wizard
    Setup,

    /// Show or change stored settings
    Config {
        /// Print current settings
        #[arg(long)]
        show: bool,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        temperature: Option<f64>,

        #[arg(long)]
        proxy_url: Option<String>,

        #[arg(long)]
        api_key: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    mikra_core::set_verbose(cli.verbose);

    match cli.command {
        Command::Analyze {
            text,
            audio,
            record,
            mode,
            grade,
            age,
            dialect,
            notes,
            model,
            temperature,
            proxy_url,
            api_key,
            html,
        } => {
            let options = commands::analyze::AnalyzeOptions {
                text,
                audio,
                record,
                mode,
                grade,
                age,
                dialect,
                notes,
                model,
                temperature,
                proxy_url,
                api_key,
                html,
            };
            commands::analyze::run(options).await
        }
        Command::Record { output } => commands::record::run(&output),
        Command::Setup => commands::setup::run(),
        Command::Config {
            show,
            model,
            temperature,
            proxy_url,
            api_key,
        } => commands::config::run(show, model, temperature, proxy_url, api_key),
    }
}

//! The end-to-end analysis flow: text + audio in, rendered report out.

use anyhow::{Context, Result, bail};
use std::path::PathBuf;

use mikra_core::report::html;
use mikra_core::{
    AnalysisClient, ParsedCompletion, ReadingSession, Recorder, Routing, Settings, StudentContext,
    TextMode, load_audio_file, parse_completion, project, verbose,
};

use crate::app::{self, Status, status};
use crate::output;

pub struct AnalyzeOptions {
    pub text: PathBuf,
    pub audio: Option<PathBuf>,
    pub record: bool,
    pub mode: TextMode,
    pub grade: Option<String>,
    pub age: Option<String>,
    pub dialect: Option<String>,
    pub notes: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f64>,
    pub proxy_url: Option<String>,
    pub api_key: Option<String>,
    pub html: Option<PathBuf>,
}

pub async fn run(options: AnalyzeOptions) -> Result<()> {
    let settings = Settings::load();

    let target_text = std::fs::read_to_string(&options.text)
        .with_context(|| format!("failed to read {}", options.text.display()))?;

    let mut session = ReadingSession::new();
    attach_audio(&mut session, &options)?;

    // CLI flags win over stored settings; settings already fall back to the
    // environment for credentials.
    let model = options.model.unwrap_or_else(|| settings.model.clone());
    let temperature = options.temperature.unwrap_or(settings.temperature);
    let proxy_url = options.proxy_url.clone().or_else(|| settings.proxy_url());
    let api_key = options.api_key.clone().or_else(|| settings.api_key());
    let routing = Routing::from_options(proxy_url.as_deref(), api_key.as_deref())?;

    let context = StudentContext {
        grade: options.grade,
        age: options.age,
        dialect: options.dialect,
        teacher_notes: options.notes,
    };

    let request =
        session.prepare_request(&target_text, options.mode, context, &model, temperature, routing)?;

    let duration = request
        .audio
        .duration_secs
        .map(|s| format!("{s:.1}s"))
        .unwrap_or_else(|| "unknown length".to_string());
    status(
        Status::Info,
        &format!(
            "Submitting {} words with {duration} of audio to {model}...",
            request.word_count
        ),
    );
    verbose!(
        "routing: {}",
        match &request.routing {
            Routing::Proxy(url) => format!("proxy {url}"),
            Routing::Direct(_) => "direct API".to_string(),
        }
    );

    let client = AnalysisClient::new();
    let completion = match client.submit(&request).await {
        Ok(completion) => completion,
        Err(err) => {
            // The status line is the sole report; exit nonzero directly so
            // the error is not printed a second time on the way out.
            status(Status::Bad, &format!("Analysis failed: {err}"));
            std::process::exit(1);
        }
    };
    verbose!("completion length: {} chars", completion.chars().count());

    match parse_completion(&completion) {
        ParsedCompletion::Report(report) => {
            let view = project(&report);
            output::print_report(&view);
            if let Some(path) = &options.html {
                std::fs::write(path, html::render_report(&view))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                status(Status::Ok, &format!("Report written to {}", path.display()));
            }
        }
        ParsedCompletion::Raw(text) => {
            status(
                Status::Warn,
                "The model's answer was not valid JSON; showing it verbatim.",
            );
            output::print_raw(&text);
            if let Some(path) = &options.html {
                std::fs::write(path, html::render_raw(&text))
                    .with_context(|| format!("failed to write {}", path.display()))?;
                status(Status::Ok, &format!("Report written to {}", path.display()));
            }
        }
    }

    Ok(())
}

fn attach_audio(session: &mut ReadingSession, options: &AnalyzeOptions) -> Result<()> {
    if options.record {
        let recorder = Recorder::start().context("failed to start recording")?;
        status(Status::Info, "Recording... press Enter to stop.");
        app::wait_for_enter()?;
        let asset = recorder.stop().context("failed to finalize recording")?;
        let duration = asset
            .duration_secs
            .map(|s| format!("{s:.1}s"))
            .unwrap_or_else(|| "unknown length".to_string());
        status(Status::Ok, &format!("Captured {duration} ({})", asset.mime_type));
        session.replace_audio(asset);
    } else if let Some(path) = &options.audio {
        session.replace_audio(load_audio_file(path)?);
    } else {
        bail!("no audio input: pass --audio <file> or --record");
    }
    Ok(())
}

//! Interactive configuration wizard.

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, Input, Password, Select, theme::ColorfulTheme};

use mikra_core::Settings;
use mikra_core::settings::{API_KEY_ENV_VAR, PROXY_URL_ENV_VAR};

use crate::app::{Status, status};

pub fn run() -> Result<()> {
    println!();
    println!("{}", style("mikra setup").bold().cyan());
    println!();

    let theme = ColorfulTheme::default();
    let mut settings = Settings::load();

    let routing_items = ["Proxy endpoint (recommended)", "Direct API key"];
    let routing = Select::with_theme(&theme)
        .with_prompt("How should analysis requests be sent?")
        .items(&routing_items)
        .default(if settings.proxy_url.is_some() { 0 } else { 1 })
        .interact()?;

    if routing == 0 {
        let proxy_url: String = Input::with_theme(&theme)
            .with_prompt("Proxy URL")
            .default(settings.proxy_url.clone().unwrap_or_default())
            .interact_text()?;
        settings.proxy_url = Some(proxy_url.trim().to_string()).filter(|u| !u.is_empty());
        println!(
            "  A proxy keeps the API key server-side; {PROXY_URL_ENV_VAR} also works per-run."
        );
    } else {
        settings.proxy_url = None;
        println!("  Get a key from https://aistudio.google.com/apikey");
        let api_key = Password::with_theme(&theme)
            .with_prompt(format!("API key (blank to rely on {API_KEY_ENV_VAR})"))
            .allow_empty_password(true)
            .interact()?;
        settings.api_key = Some(api_key.trim().to_string()).filter(|k| !k.is_empty());
    }

    let model: String = Input::with_theme(&theme)
        .with_prompt("Model")
        .default(settings.model.clone())
        .interact_text()?;
    settings.model = model.trim().to_string();

    let temperature: f64 = Input::with_theme(&theme)
        .with_prompt("Temperature")
        .default(settings.temperature)
        .interact_text()?;
    settings.temperature = temperature;

    if Confirm::with_theme(&theme)
        .with_prompt("Save these settings?")
        .default(true)
        .interact()?
    {
        settings.save()?;
        if let Some(path) = Settings::path() {
            status(Status::Ok, &format!("Saved to {}", path.display()));
        }
        println!();
        println!("Try it out:");
        println!("  mikra analyze --text passage.txt --record");
    } else {
        status(Status::Warn, "Nothing saved.");
    }

    Ok(())
}

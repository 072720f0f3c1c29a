//! Show or change stored settings non-interactively.

use anyhow::Result;

use mikra_core::Settings;

use crate::app::{Status, status};

pub fn run(
    show: bool,
    model: Option<String>,
    temperature: Option<f64>,
    proxy_url: Option<String>,
    api_key: Option<String>,
) -> Result<()> {
    let mut settings = Settings::load();

    let mut changed = false;
    if let Some(model) = model {
        settings.model = model;
        changed = true;
    }
    if let Some(temperature) = temperature {
        settings.temperature = temperature;
        changed = true;
    }
    if let Some(proxy_url) = proxy_url {
        // An empty value clears the field.
        settings.proxy_url = Some(proxy_url).filter(|u| !u.trim().is_empty());
        changed = true;
    }
    if let Some(api_key) = api_key {
        settings.api_key = Some(api_key).filter(|k| !k.trim().is_empty());
        changed = true;
    }

    if changed {
        settings.save()?;
        status(Status::Ok, "Settings updated.");
    }

    if show || !changed {
        print_settings(&settings);
    }

    Ok(())
}

fn print_settings(settings: &Settings) {
    if let Some(path) = Settings::path() {
        println!("settings file: {}", path.display());
    }
    println!("model:         {}", settings.model);
    println!("temperature:   {}", settings.temperature);
    println!(
        "proxy_url:     {}",
        settings.proxy_url.as_deref().unwrap_or("(not set)")
    );
    println!(
        "api_key:       {}",
        if settings.api_key.is_some() {
            "(stored)"
        } else {
            "(not set)"
        }
    );
}

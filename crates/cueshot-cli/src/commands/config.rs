use anyhow::{Context, Result};
use cueshot_infrastructure::{ConfigResolver, CueshotPaths};

pub fn show(api_key: Option<String>) -> Result<()> {
    match CueshotPaths::config_dir() {
        Ok(dir) => println!("Config directory: {}", dir.display()),
        Err(e) => println!("Config directory: unavailable ({e})"),
    }

    let (config, source) = ConfigResolver::from_system()
        .resolve(api_key)
        .context("Failed to resolve configuration")?;

    println!("API key:          {source}");
    println!("Model:            {}", config.model);
    println!("Endpoint:         {}", config.base_url);
    println!("Timeout:          {}s", config.timeout.as_secs());

    if !config.has_credential() {
        println!();
        println!(
            "No API key found. Set GEMINI_API_KEY or add it to secret.json:\n  {{\"gemini\": {{\"api_key\": \"...\"}}}}"
        );
    }

    Ok(())
}

use anyhow::Result;

use inquiry_form::{config::Settings, App};

#[tokio::main]
async fn main() -> Result<()> {
    let settings = Settings::new().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        eprintln!("\nSet INQUIRY_FORM__SERVER_URL or create inquiry-form.toml, e.g.");
        eprintln!("\nserver_url = \"http://localhost:3000\"");
        eprintln!("destination = \"https://example.edu/brochure.pdf\"");
        anyhow::anyhow!(e)
    })?;

    settings.validate().map_err(|e| {
        eprintln!("Configuration validation failed: {}", e);
        anyhow::anyhow!(e)
    })?;

    // Logging is initialized in App::run() so the terminal stays clean
    App::new(settings).run().await?;

    Ok(())
}

use car_assistant::{app, config, logging};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = config::load_config()?;
    // Held until exit so buffered log lines are flushed.
    let _logger = logging::init_logging(&config)?;
    log::info!("Starting car-assistant");

    app::run(&config).await?;

    log::info!("Session ended");
    Ok(())
}

use std::io;

use session_terminator::configuration::Settings;
use session_terminator::startup::Application;
use session_terminator::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    let subscriber = get_subscriber("session-terminator".into(), "info".into(), io::stdout);
    init_subscriber(subscriber);

    // Retrieve settings
    let config = Settings::get_config()?;

    // Prepare the application and run it until it is stopped
    let application = Application::build(config)?;
    tracing::info!(port = application.port(), "Serving session termination API");
    application.run_until_stopped().await?;

    Ok(())
}

use robokassa_gateway::app::{serve, StartupError};
use robokassa_gateway::config::AppConfig;
use robokassa_gateway::telemetry::init_tracing;

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    init_tracing(&config.server);

    if let Err(e) = serve(config).await {
        tracing::error!(error = %e, "Payment gateway service stopped");
        return Err(e);
    }
    Ok(())
}

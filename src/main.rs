use confirm_links::configuration::get_configuration;
use confirm_links::startup::Application;
use confirm_links::telemetry::{DEFAULT_ENV_FILTER, get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    let subscriber = get_subscriber("confirm_links", DEFAULT_ENV_FILTER, std::io::stdout)
        .map_err(std::io::Error::other)?;
    init_subscriber(subscriber).map_err(std::io::Error::other)?;

    // Panic if the store address or credential is missing
    let config = get_configuration().expect("Failed to read configuration.");

    let application = Application::build(config).await?;
    application.run().await
}

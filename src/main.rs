use procalyx_notify::configuration::get_configuration;
use procalyx_notify::startup::Application;
use procalyx_notify::telemetry::get_subscriber;
use procalyx_notify::telemetry::init_subscriber;

/// Initialise telemetry, load config, and run the submission loop.
#[tokio::main] // requires tokio features: macros, rt-multi-thread
async fn main() -> Result<(), anyhow::Error> {
    // logs go to stderr; stdout carries the prompt and status messages
    let subscriber = get_subscriber("procalyx-notify", "info", std::io::stderr);
    init_subscriber(subscriber);

    let cfg = get_configuration()?;
    Application::build(cfg)?.run_until_stopped().await?;
    Ok(())
}

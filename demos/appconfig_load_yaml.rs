//! Start an AppConfig session and load a YAML configuration profile into a struct.
//!
//! Credentials are read from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`. Replace the
//! identifiers below with the application, environment and profile of your deployment.
//! Run with `RUST_LOG=debug` to see session and fetch events.

use appconfig_loader::appconfig::{AppConfigClient, Configurator, Options};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Configuration {
    db_host: String,
    db_port: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let client = AppConfigClient::new(Some(Options {
        region: "eu-central-1".into(),
        application_id: "test".into(),
        environment_id: "TestEnvironment".into(),
        profile: "test-config".into(),
        poll_interval_seconds: 60,
        credentials_in_env: true,
        ..Default::default()
    }))?;

    client.prepare().await?;

    let configuration: Configuration = client.load_into_yaml().await?;
    println!("db host: {}", configuration.db_host);
    println!("db port: {}", configuration.db_port);

    Ok(())
}

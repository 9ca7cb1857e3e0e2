//! Read the raw configuration payload from a synchronous program.
//!
//! Options come from the environment: `AWS_REGION`, `APPCONFIG_APPLICATION_ID`,
//! `APPCONFIG_ENVIRONMENT_ID`, `APPCONFIG_PROFILE` and optionally
//! `APPCONFIG_POLL_INTERVAL_SECONDS` / `APPCONFIG_ENDPOINT_URL`.

use std::io::Read;

use appconfig_loader::appconfig::Options;
use appconfig_loader::blocking::appconfig::AppConfigClient;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let client = AppConfigClient::new(Some(Options::from_env()?))?;
    client.prepare()?;

    let mut raw = String::new();
    client.reader()?.read_to_string(&mut raw)?;
    println!("{raw}");

    Ok(())
}

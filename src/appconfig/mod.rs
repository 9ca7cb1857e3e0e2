#![doc = include_str!("README.md")]
mod api;
mod constants;
pub mod decode;
pub mod error;
pub mod fetch;
pub mod options;

pub use api::{AppConfigClient, ConfigReader, Configurator};
pub use decode::ConfigFormat;
pub use error::{AppConfigError, AppConfigErrorCode, AppConfigResult};
pub use fetch::{
    AppConfigDataClient, LatestConfiguration, SdkAppConfigDataClient, SessionRequest,
    StaticAppConfigDataClient,
};
pub use options::{CredentialSource, Options};

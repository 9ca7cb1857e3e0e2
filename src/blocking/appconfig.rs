use std::sync::Arc;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use super::{block_on, block_on_methods};
use crate::appconfig::{
    AppConfigDataClient, AppConfigResult, ConfigReader, Configurator, LatestConfiguration, Options,
};

pub use crate::appconfig::error;

/// Blocking counterpart of [`crate::appconfig::AppConfigClient`].
///
/// ```no_run
/// use appconfig_loader::appconfig::Options;
/// use appconfig_loader::blocking::appconfig::AppConfigClient;
/// use std::io::Read;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AppConfigClient::new(Some(Options::from_env()?))?;
/// client.prepare()?;
/// let mut raw = String::new();
/// client.reader()?.read_to_string(&mut raw)?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AppConfigClient {
    inner: crate::appconfig::AppConfigClient,
}

impl AppConfigClient {
    pub fn new(options: Option<Options>) -> AppConfigResult<Self> {
        crate::appconfig::AppConfigClient::new(options).map(Self::from)
    }

    pub fn with_data_client(
        options: Option<Options>,
        data_client: Arc<dyn AppConfigDataClient>,
    ) -> AppConfigResult<Self> {
        crate::appconfig::AppConfigClient::with_data_client(options, data_client).map(Self::from)
    }

    pub fn options(&self) -> &Options {
        self.inner.options()
    }

    block_on_methods! {
        fn prepare() -> AppConfigResult<()>;
        fn latest_configuration() -> AppConfigResult<LatestConfiguration>;
        fn load_config_bytes() -> AppConfigResult<Bytes>;
        fn reader() -> AppConfigResult<ConfigReader>;
    }

    pub fn load_into_yaml<T>(&self) -> AppConfigResult<T>
    where
        T: DeserializeOwned + Send,
    {
        block_on(self.inner.load_into_yaml())
    }

    pub fn load_into_json<T>(&self) -> AppConfigResult<T>
    where
        T: DeserializeOwned + Send,
    {
        block_on(self.inner.load_into_json())
    }

    pub fn load_into<T>(&self) -> AppConfigResult<T>
    where
        T: DeserializeOwned + Send,
    {
        block_on(self.inner.load_into())
    }

    /// Returns the async client this facade drives.
    pub fn as_async(&self) -> &crate::appconfig::AppConfigClient {
        &self.inner
    }
}

impl From<crate::appconfig::AppConfigClient> for AppConfigClient {
    fn from(inner: crate::appconfig::AppConfigClient) -> Self {
        Self { inner }
    }
}

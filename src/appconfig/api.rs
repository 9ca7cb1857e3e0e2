use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use async_lock::Mutex as AsyncMutex;
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::appconfig::decode::{decode, ConfigFormat};
use crate::appconfig::error::{not_prepared, AppConfigResult};
use crate::appconfig::fetch::{
    AppConfigDataClient, LatestConfiguration, SdkAppConfigDataClient, SessionRequest,
};
use crate::appconfig::options::Options;

/// Readable view over a configuration payload.
///
/// Implements both [`std::io::Read`] and [`tokio::io::AsyncRead`].
pub type ConfigReader = Cursor<Bytes>;

/// Loader contract: open a configuration session, then pull the latest payload out of it.
#[async_trait]
pub trait Configurator: Send + Sync {
    /// Starts a configuration session. Must succeed before anything can be loaded.
    async fn prepare(&self) -> AppConfigResult<()>;

    /// Polls the session for the latest configuration.
    async fn latest_configuration(&self) -> AppConfigResult<LatestConfiguration>;

    /// Returns the latest configuration payload as raw bytes.
    async fn load_config_bytes(&self) -> AppConfigResult<Bytes> {
        Ok(self.latest_configuration().await?.configuration)
    }

    /// Loads the configuration and deserializes it as YAML.
    async fn load_into_yaml<T>(&self) -> AppConfigResult<T>
    where
        Self: Sized,
        T: DeserializeOwned + Send,
    {
        let bytes = self.load_config_bytes().await?;
        decode(ConfigFormat::Yaml, &bytes)
    }

    /// Loads the configuration and deserializes it as JSON.
    async fn load_into_json<T>(&self) -> AppConfigResult<T>
    where
        Self: Sized,
        T: DeserializeOwned + Send,
    {
        let bytes = self.load_config_bytes().await?;
        decode(ConfigFormat::Json, &bytes)
    }

    /// Loads the configuration and picks the decoder from the payload's content type.
    ///
    /// Unknown or missing content types are decoded as YAML, which also accepts JSON documents.
    async fn load_into<T>(&self) -> AppConfigResult<T>
    where
        Self: Sized,
        T: DeserializeOwned + Send,
    {
        let latest = self.latest_configuration().await?;
        let format = latest
            .content_type
            .as_deref()
            .and_then(ConfigFormat::from_content_type)
            .unwrap_or(ConfigFormat::Yaml);
        decode(format, &latest.configuration)
    }

    /// Returns the latest configuration payload as a readable stream.
    async fn reader(&self) -> AppConfigResult<ConfigReader> {
        Ok(Cursor::new(self.load_config_bytes().await?))
    }
}

/// AWS AppConfig loader.
///
/// Cloning is cheap; clones share the same session.
///
/// # Examples
///
/// ```no_run
/// use appconfig_loader::appconfig::{AppConfigClient, Configurator, Options};
/// use serde::Deserialize;
///
/// #[derive(Deserialize)]
/// struct Database {
///     db_host: String,
///     db_port: String,
/// }
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AppConfigClient::new(Some(Options {
///     application_id: "billing".into(),
///     environment_id: "production".into(),
///     profile: "database".into(),
///     ..Default::default()
/// }))?;
/// client.prepare().await?;
/// let database: Database = client.load_into_yaml().await?;
/// println!("{}:{}", database.db_host, database.db_port);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AppConfigClient {
    inner: Arc<AppConfigClientInner>,
}

struct AppConfigClientInner {
    options: Options,
    state: AsyncMutex<ClientState>,
}

struct ClientState {
    data_client: Option<Arc<dyn AppConfigDataClient>>,
    session: Option<Session>,
}

struct Session {
    data_client: Arc<dyn AppConfigDataClient>,
    token: String,
    retained: Option<LatestConfiguration>,
}

impl AppConfigClient {
    /// Creates a loader, filling unset options with defaults.
    ///
    /// `None` behaves like [`Options::default`]: default region and poll interval, credentials
    /// read from the environment. No network call is made until [`Configurator::prepare`].
    pub fn new(options: Option<Options>) -> AppConfigResult<Self> {
        Self::build(options, None)
    }

    /// Creates a loader that talks to AppConfig through `data_client` instead of the AWS SDK.
    pub fn with_data_client(
        options: Option<Options>,
        data_client: Arc<dyn AppConfigDataClient>,
    ) -> AppConfigResult<Self> {
        Self::build(options, Some(data_client))
    }

    fn build(
        options: Option<Options>,
        data_client: Option<Arc<dyn AppConfigDataClient>>,
    ) -> AppConfigResult<Self> {
        let options = options.unwrap_or_default().with_defaults();
        options.validate_poll_interval()?;
        Ok(Self {
            inner: Arc::new(AppConfigClientInner {
                options,
                state: AsyncMutex::new(ClientState {
                    data_client,
                    session: None,
                }),
            }),
        })
    }

    /// Options in effect, after defaults were applied.
    pub fn options(&self) -> &Options {
        &self.inner.options
    }

    /// Returns `true` once a configuration session has been started.
    pub async fn is_prepared(&self) -> bool {
        self.inner.state.lock().await.session.is_some()
    }
}

#[async_trait]
impl Configurator for AppConfigClient {
    async fn prepare(&self) -> AppConfigResult<()> {
        let options = &self.inner.options;
        options.validate_identifiers()?;

        let mut state = self.inner.state.lock().await;
        let data_client = match state.data_client.clone() {
            Some(client) => client,
            None => {
                let client: Arc<dyn AppConfigDataClient> =
                    Arc::new(SdkAppConfigDataClient::connect(options).await?);
                state.data_client = Some(client.clone());
                client
            }
        };

        let token = data_client
            .start_configuration_session(&SessionRequest::from(options))
            .await?;
        log::debug!(
            "started AppConfig session for {}/{}/{}",
            options.application_id,
            options.environment_id,
            options.profile
        );

        state.session = Some(Session {
            data_client,
            token,
            retained: None,
        });
        Ok(())
    }

    async fn latest_configuration(&self) -> AppConfigResult<LatestConfiguration> {
        let mut state = self.inner.state.lock().await;
        let session = state.session.as_mut().ok_or_else(not_prepared)?;

        let latest = session
            .data_client
            .get_latest_configuration(&session.token)
            .await?;

        match latest.next_poll_token.as_deref() {
            Some(next) => session.token = next.to_string(),
            None => {
                log::warn!("AppConfig response carried no next poll token, reusing the current one")
            }
        }

        if latest.configuration.is_empty() {
            if let Some(retained) = &session.retained {
                log::debug!("AppConfig configuration unchanged since the last poll");
                return Ok(LatestConfiguration {
                    next_poll_token: latest.next_poll_token,
                    ..retained.clone()
                });
            }
        }

        log::debug!(
            "fetched AppConfig configuration version {} ({} bytes)",
            latest.version_label.as_deref().unwrap_or("<unlabelled>"),
            latest.configuration.len()
        );
        session.retained = Some(latest.clone());
        Ok(latest)
    }
}

impl fmt::Debug for AppConfigClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfigClient")
            .field("region", &self.inner.options.region)
            .field("application_id", &self.inner.options.application_id)
            .field("environment_id", &self.inner.options.environment_id)
            .field("profile", &self.inner.options.profile)
            .finish_non_exhaustive()
    }
}

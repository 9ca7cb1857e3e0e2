//! AppConfigData transport abstractions.
//!
//! The loader only needs the two data-plane calls of the service, `StartConfigurationSession`
//! and `GetLatestConfiguration`. They sit behind [`AppConfigDataClient`] so that the SDK-backed
//! transport can be swapped for an in-memory one in tests or local development.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use aws_config::environment::EnvironmentVariableCredentialsProvider;
use aws_config::{BehaviorVersion, Region};
use aws_sdk_appconfigdata::config::Credentials;
use aws_sdk_appconfigdata::error::DisplayErrorContext;
use aws_sdk_appconfigdata::Client;
use bytes::Bytes;
use url::Url;

use crate::appconfig::constants::STATIC_CREDENTIALS_PROVIDER_NAME;
use crate::appconfig::error::{
    fetch_failed, invalid_argument, session_start_failed, AppConfigResult,
};
use crate::appconfig::options::{CredentialSource, Options};

/// Identifies the configuration profile a session subscribes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionRequest {
    pub application_id: String,
    pub environment_id: String,
    pub profile: String,
    pub poll_interval_seconds: u32,
}

impl From<&Options> for SessionRequest {
    fn from(options: &Options) -> Self {
        Self {
            application_id: options.application_id.clone(),
            environment_id: options.environment_id.clone(),
            profile: options.profile.clone(),
            poll_interval_seconds: options.poll_interval_seconds,
        }
    }
}

/// Result of a single `GetLatestConfiguration` call.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LatestConfiguration {
    /// Raw payload. Empty when nothing changed since the previous poll of the session.
    pub configuration: Bytes,
    pub content_type: Option<String>,
    pub version_label: Option<String>,
    /// Token to present on the next poll.
    pub next_poll_token: Option<String>,
}

/// Abstraction over the AppConfigData API.
#[async_trait]
pub trait AppConfigDataClient: Send + Sync {
    /// Opens a configuration session and returns its initial token.
    async fn start_configuration_session(&self, request: &SessionRequest)
        -> AppConfigResult<String>;

    async fn get_latest_configuration(&self, token: &str) -> AppConfigResult<LatestConfiguration>;
}

/// [`AppConfigDataClient`] backed by `aws-sdk-appconfigdata`.
#[derive(Clone, Debug)]
pub struct SdkAppConfigDataClient {
    client: Client,
}

impl SdkAppConfigDataClient {
    /// Wraps an already configured SDK client.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Builds an SDK client for the region, credentials and endpoint described by `options`.
    pub async fn connect(options: &Options) -> AppConfigResult<Self> {
        let mut loader =
            aws_config::defaults(BehaviorVersion::latest()).region(Region::new(options.region.clone()));

        let credential_source = options.credential_source();
        log::debug!(
            "creating AppConfigData client for region {} ({:?} credentials)",
            options.region,
            credential_source
        );
        match credential_source {
            CredentialSource::Environment => {
                loader = loader.credentials_provider(EnvironmentVariableCredentialsProvider::new());
            }
            CredentialSource::Static {
                access_key_id,
                secret_access_key,
                session_token,
            } => {
                loader = loader.credentials_provider(Credentials::new(
                    access_key_id,
                    secret_access_key,
                    session_token,
                    None,
                    STATIC_CREDENTIALS_PROVIDER_NAME,
                ));
            }
            CredentialSource::DefaultChain => {}
        }

        if let Some(endpoint) = options.endpoint_url.as_deref() {
            loader = loader.endpoint_url(parse_endpoint(endpoint)?);
        }

        let sdk_config = loader.load().await;
        Ok(Self::new(Client::new(&sdk_config)))
    }
}

fn parse_endpoint(raw: &str) -> AppConfigResult<String> {
    let url = Url::parse(raw).map_err(|err| {
        invalid_argument(format!(
            "failed to create AWS session, invalid endpoint '{raw}': {err}"
        ))
    })?;
    match url.scheme() {
        "http" | "https" => Ok(raw.trim_end_matches('/').to_string()),
        other => Err(invalid_argument(format!(
            "failed to create AWS session, unsupported endpoint scheme '{other}'"
        ))),
    }
}

#[async_trait]
impl AppConfigDataClient for SdkAppConfigDataClient {
    async fn start_configuration_session(
        &self,
        request: &SessionRequest,
    ) -> AppConfigResult<String> {
        let poll_interval = i32::try_from(request.poll_interval_seconds).map_err(|_| {
            invalid_argument(format!(
                "poll interval {} does not fit the service's range",
                request.poll_interval_seconds
            ))
        })?;

        let output = self
            .client
            .start_configuration_session()
            .application_identifier(&request.application_id)
            .environment_identifier(&request.environment_id)
            .configuration_profile_identifier(&request.profile)
            .required_minimum_poll_interval_in_seconds(poll_interval)
            .send()
            .await
            .map_err(|err| session_start_failed(DisplayErrorContext(err)))?;

        output
            .initial_configuration_token()
            .map(str::to_string)
            .ok_or_else(|| session_start_failed("response carried no initial configuration token"))
    }

    async fn get_latest_configuration(&self, token: &str) -> AppConfigResult<LatestConfiguration> {
        let output = self
            .client
            .get_latest_configuration()
            .configuration_token(token)
            .send()
            .await
            .map_err(|err| fetch_failed(DisplayErrorContext(err)))?;

        Ok(LatestConfiguration {
            configuration: output
                .configuration()
                .map(|blob| Bytes::copy_from_slice(blob.as_ref()))
                .unwrap_or_default(),
            content_type: output.content_type().map(str::to_string),
            version_label: output.version_label().map(str::to_string),
            next_poll_token: output.next_poll_configuration_token().map(str::to_string),
        })
    }
}

/// In-memory client that serves the same payload on every poll.
///
/// Handy for unit tests and offline development where no AppConfig deployment exists.
#[derive(Debug)]
pub struct StaticAppConfigDataClient {
    configuration: Bytes,
    content_type: Option<String>,
    tokens: AtomicU64,
}

impl StaticAppConfigDataClient {
    pub fn new(configuration: impl Into<Bytes>, content_type: Option<&str>) -> Self {
        Self {
            configuration: configuration.into(),
            content_type: content_type.map(str::to_string),
            tokens: AtomicU64::new(0),
        }
    }

    fn next_token(&self) -> String {
        format!("static-token-{}", self.tokens.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl AppConfigDataClient for StaticAppConfigDataClient {
    async fn start_configuration_session(
        &self,
        _request: &SessionRequest,
    ) -> AppConfigResult<String> {
        Ok(self.next_token())
    }

    async fn get_latest_configuration(&self, _token: &str) -> AppConfigResult<LatestConfiguration> {
        Ok(LatestConfiguration {
            configuration: self.configuration.clone(),
            content_type: self.content_type.clone(),
            version_label: Some("static".to_string()),
            next_poll_token: Some(self.next_token()),
        })
    }
}

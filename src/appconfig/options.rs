//! Client options for the AppConfig loader.
//!
//! Mirrors the knobs of an AppConfig data-plane session: where the configuration lives
//! (application, environment, profile), how often the service lets the client poll, and
//! which credentials sign the requests.

use std::env;
use std::fmt;

use serde::Deserialize;

use crate::appconfig::constants::{
    DEFAULT_CREDENTIALS_IN_ENV, DEFAULT_POLL_INTERVAL_SECONDS, DEFAULT_REGION, ENV_APPLICATION_ID,
    ENV_DEFAULT_REGION, ENV_ENDPOINT_URL, ENV_ENVIRONMENT_ID, ENV_POLL_INTERVAL_SECONDS,
    ENV_PROFILE, ENV_REGION, MAX_POLL_INTERVAL_SECONDS, MIN_POLL_INTERVAL_SECONDS,
};
use crate::appconfig::error::{invalid_argument, AppConfigResult};

/// Options used to build an [`AppConfigClient`](crate::appconfig::AppConfigClient).
///
/// Empty strings and zero values are treated as "not set" and replaced by
/// [`Options::with_defaults`].
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Options {
    /// AWS region hosting the AppConfig application.
    pub region: String,
    /// AppConfig application ID or name.
    pub application_id: String,
    /// AppConfig environment ID or name.
    pub environment_id: String,
    /// AppConfig configuration profile ID or name.
    pub profile: String,
    /// Minimum poll interval requested when the session starts, in seconds.
    pub poll_interval_seconds: u32,
    /// Read credentials from `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_SESSION_TOKEN`.
    pub credentials_in_env: bool,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    /// Overrides the AppConfigData endpoint (VPC endpoints, LocalStack, mock servers).
    pub endpoint_url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            region: String::new(),
            application_id: String::new(),
            environment_id: String::new(),
            profile: String::new(),
            poll_interval_seconds: 0,
            credentials_in_env: DEFAULT_CREDENTIALS_IN_ENV,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            endpoint_url: None,
        }
    }
}

/// Where request signing credentials come from.
#[derive(Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// `AWS_ACCESS_KEY_ID` and friends.
    Environment,
    Static {
        access_key_id: String,
        secret_access_key: String,
        session_token: Option<String>,
    },
    /// Whatever the SDK's default provider chain resolves (profile files, IMDS, ...).
    DefaultChain,
}

impl fmt::Debug for CredentialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CredentialSource::Environment => f.write_str("Environment"),
            CredentialSource::Static { access_key_id, .. } => f
                .debug_struct("Static")
                .field("access_key_id", access_key_id)
                .finish_non_exhaustive(),
            CredentialSource::DefaultChain => f.write_str("DefaultChain"),
        }
    }
}

impl Options {
    /// Builds options from `AWS_REGION` and the `APPCONFIG_*` environment variables.
    ///
    /// Credentials are always read from the environment in this mode.
    pub fn from_env() -> AppConfigResult<Self> {
        let region = non_empty_var(ENV_REGION)
            .or_else(|| non_empty_var(ENV_DEFAULT_REGION))
            .unwrap_or_default();

        let poll_interval_seconds = match non_empty_var(ENV_POLL_INTERVAL_SECONDS) {
            Some(raw) => raw.trim().parse::<u32>().map_err(|err| {
                invalid_argument(format!(
                    "{ENV_POLL_INTERVAL_SECONDS} must be a number of seconds, got '{raw}': {err}"
                ))
            })?,
            None => 0,
        };

        Ok(Self {
            region,
            application_id: non_empty_var(ENV_APPLICATION_ID).unwrap_or_default(),
            environment_id: non_empty_var(ENV_ENVIRONMENT_ID).unwrap_or_default(),
            profile: non_empty_var(ENV_PROFILE).unwrap_or_default(),
            poll_interval_seconds,
            credentials_in_env: true,
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            endpoint_url: non_empty_var(ENV_ENDPOINT_URL),
        })
    }

    /// Fills unset fields with their defaults.
    pub fn with_defaults(mut self) -> Self {
        if self.region.is_empty() {
            self.region = DEFAULT_REGION.to_string();
        }
        if self.poll_interval_seconds == 0 {
            self.poll_interval_seconds = DEFAULT_POLL_INTERVAL_SECONDS;
        }
        self
    }

    /// Resolves which credentials the SDK client should sign with.
    pub fn credential_source(&self) -> CredentialSource {
        if self.credentials_in_env {
            return CredentialSource::Environment;
        }

        let access_key_id = self.access_key_id.as_deref().filter(|v| !v.is_empty());
        let secret_access_key = self.secret_access_key.as_deref().filter(|v| !v.is_empty());

        match (access_key_id, secret_access_key) {
            (Some(access_key_id), Some(secret_access_key)) => CredentialSource::Static {
                access_key_id: access_key_id.to_string(),
                secret_access_key: secret_access_key.to_string(),
                session_token: self.session_token.clone().filter(|v| !v.is_empty()),
            },
            (None, None) => CredentialSource::DefaultChain,
            _ => {
                log::warn!(
                    "static AWS credentials need both an access key id and a secret access key; \
                     falling back to the default credential chain"
                );
                CredentialSource::DefaultChain
            }
        }
    }

    pub(crate) fn validate_poll_interval(&self) -> AppConfigResult<()> {
        let range = MIN_POLL_INTERVAL_SECONDS..=MAX_POLL_INTERVAL_SECONDS;
        if !range.contains(&self.poll_interval_seconds) {
            return Err(invalid_argument(format!(
                "poll_interval_seconds must be between {} and {}, got {}",
                MIN_POLL_INTERVAL_SECONDS, MAX_POLL_INTERVAL_SECONDS, self.poll_interval_seconds
            )));
        }
        Ok(())
    }

    pub(crate) fn validate_identifiers(&self) -> AppConfigResult<()> {
        for (name, value) in [
            ("application_id", &self.application_id),
            ("environment_id", &self.environment_id),
            ("profile", &self.profile),
        ] {
            if value.trim().is_empty() {
                return Err(invalid_argument(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("region", &self.region)
            .field("application_id", &self.application_id)
            .field("environment_id", &self.environment_id)
            .field("profile", &self.profile)
            .field("poll_interval_seconds", &self.poll_interval_seconds)
            .field("credentials_in_env", &self.credentials_in_env)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &redacted(&self.secret_access_key))
            .field("session_token", &redacted(&self.session_token))
            .field("endpoint_url", &self.endpoint_url)
            .finish()
    }
}

fn redacted(value: &Option<String>) -> Option<&'static str> {
    value.as_ref().map(|_| "<redacted>")
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}

//! Payload decoding into caller-supplied types.

use serde::de::DeserializeOwned;

use crate::appconfig::error::{decode_failed, AppConfigResult};

/// Serialization format of an AppConfig payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    Yaml,
    Json,
}

impl ConfigFormat {
    /// Maps a `Content-Type` header value to a format, ignoring media type parameters.
    ///
    /// ```
    /// use appconfig_loader::appconfig::ConfigFormat;
    ///
    /// assert_eq!(
    ///     ConfigFormat::from_content_type("application/json; charset=utf-8"),
    ///     Some(ConfigFormat::Json)
    /// );
    /// assert_eq!(ConfigFormat::from_content_type("text/plain"), None);
    /// ```
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let media_type = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match media_type.as_str() {
            "application/json" => Some(ConfigFormat::Json),
            "application/x-yaml" | "application/yaml" | "text/yaml" | "text/x-yaml" => {
                Some(ConfigFormat::Yaml)
            }
            _ => None,
        }
    }
}

/// Deserializes `bytes` as `format` into `T`.
pub fn decode<T>(format: ConfigFormat, bytes: &[u8]) -> AppConfigResult<T>
where
    T: DeserializeOwned,
{
    match format {
        ConfigFormat::Yaml => serde_yaml::from_slice(bytes).map_err(decode_failed),
        ConfigFormat::Json => serde_json::from_slice(bytes).map_err(decode_failed),
    }
}

use std::fmt::{Display, Formatter};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppConfigErrorCode {
    InvalidArgument,
    NotPrepared,
    SessionStart,
    Fetch,
    Decode,
}

impl AppConfigErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppConfigErrorCode::InvalidArgument => "appconfig/invalid-argument",
            AppConfigErrorCode::NotPrepared => "appconfig/not-prepared",
            AppConfigErrorCode::SessionStart => "appconfig/session-start",
            AppConfigErrorCode::Fetch => "appconfig/fetch",
            AppConfigErrorCode::Decode => "appconfig/decode",
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfigError {
    pub code: AppConfigErrorCode,
    message: String,
}

impl AppConfigError {
    pub fn new(code: AppConfigErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn code_str(&self) -> &'static str {
        self.code.as_str()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for AppConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code_str())
    }
}

impl std::error::Error for AppConfigError {}

pub type AppConfigResult<T> = Result<T, AppConfigError>;

pub fn invalid_argument(message: impl Into<String>) -> AppConfigError {
    AppConfigError::new(AppConfigErrorCode::InvalidArgument, message)
}

pub fn not_prepared() -> AppConfigError {
    AppConfigError::new(
        AppConfigErrorCode::NotPrepared,
        "configuration session not started, call prepare() first",
    )
}

pub fn session_start_failed(message: impl Display) -> AppConfigError {
    AppConfigError::new(
        AppConfigErrorCode::SessionStart,
        format!("failed to start AWS AppConfig session, {message}"),
    )
}

pub fn fetch_failed(message: impl Display) -> AppConfigError {
    AppConfigError::new(
        AppConfigErrorCode::Fetch,
        format!("failed to get latest AWS appconfig configuration, {message}"),
    )
}

pub fn decode_failed(message: impl Display) -> AppConfigError {
    AppConfigError::new(
        AppConfigErrorCode::Decode,
        format!("failed to unmarshal AWS appconfig configuration, {message}"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code() {
        let err = fetch_failed("timed out");
        assert_eq!(
            err.to_string(),
            "failed to get latest AWS appconfig configuration, timed out (appconfig/fetch)"
        );
        assert_eq!(err.code, AppConfigErrorCode::Fetch);
    }

    #[test]
    fn not_prepared_has_dedicated_code() {
        assert_eq!(not_prepared().code_str(), "appconfig/not-prepared");
    }
}

pub const DEFAULT_REGION: &str = "eu-central-1";
pub const DEFAULT_POLL_INTERVAL_SECONDS: u32 = 60;
pub const DEFAULT_CREDENTIALS_IN_ENV: bool = true;
pub const MIN_POLL_INTERVAL_SECONDS: u32 = 15;
pub const MAX_POLL_INTERVAL_SECONDS: u32 = 86_400;
pub const STATIC_CREDENTIALS_PROVIDER_NAME: &str = "appconfig-loader-static";

pub const ENV_REGION: &str = "AWS_REGION";
pub const ENV_DEFAULT_REGION: &str = "AWS_DEFAULT_REGION";
pub const ENV_APPLICATION_ID: &str = "APPCONFIG_APPLICATION_ID";
pub const ENV_ENVIRONMENT_ID: &str = "APPCONFIG_ENVIRONMENT_ID";
pub const ENV_PROFILE: &str = "APPCONFIG_PROFILE";
pub const ENV_POLL_INTERVAL_SECONDS: &str = "APPCONFIG_POLL_INTERVAL_SECONDS";
pub const ENV_ENDPOINT_URL: &str = "APPCONFIG_ENDPOINT_URL";

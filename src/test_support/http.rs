use httpmock::MockServer;

use crate::appconfig::Options;

/// Start a fresh `httpmock::MockServer` standing in for the AppConfigData endpoint.
pub async fn start_mock_server() -> MockServer {
    MockServer::start_async().await
}

/// Options that point the SDK client at `server` and sign with throwaway static credentials.
pub fn mock_options(server: &MockServer) -> Options {
    Options {
        region: "us-east-1".into(),
        application_id: "billing".into(),
        environment_id: "staging".into(),
        profile: "service-config".into(),
        poll_interval_seconds: 45,
        credentials_in_env: false,
        access_key_id: Some("AKIDEXAMPLE".into()),
        secret_access_key: Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into()),
        session_token: None,
        endpoint_url: Some(server.base_url()),
    }
}

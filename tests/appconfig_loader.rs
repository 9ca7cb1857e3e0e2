use appconfig_loader::appconfig::{AppConfigClient, Configurator, Options};
use httpmock::prelude::*;
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize, PartialEq)]
struct Configuration {
    db_host: String,
    db_port: String,
}

fn options(server: &MockServer) -> Options {
    Options {
        region: "eu-central-1".into(),
        application_id: "test".into(),
        environment_id: "TestEnvironment".into(),
        profile: "test-config".into(),
        credentials_in_env: false,
        access_key_id: Some("AKIDEXAMPLE".into()),
        secret_access_key: Some("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into()),
        endpoint_url: Some(server.base_url()),
        ..Default::default()
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn prepare_then_load_yaml_through_the_sdk() {
    let server = MockServer::start_async().await;
    let session = server
        .mock_async(|when, then| {
            when.method(POST).path("/configurationsessions").json_body(json!({
                "ApplicationIdentifier": "test",
                "EnvironmentIdentifier": "TestEnvironment",
                "ConfigurationProfileIdentifier": "test-config",
                "RequiredMinimumPollIntervalInSeconds": 60
            }));
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "InitialConfigurationToken": "initial" }));
        })
        .await;
    let first_poll = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/configuration")
                .query_param("configuration_token", "initial");
            then.status(200)
                .header("Content-Type", "application/x-yaml")
                .header("Next-Poll-Configuration-Token", "second")
                .header("Next-Poll-Interval-In-Seconds", "60")
                .header("Version-Label", "1")
                .body("db_host: db.internal\ndb_port: \"5432\"\n");
        })
        .await;
    let second_poll = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/configuration")
                .query_param("configuration_token", "second");
            then.status(200)
                .header("Content-Type", "application/x-yaml")
                .header("Next-Poll-Configuration-Token", "third")
                .header("Next-Poll-Interval-In-Seconds", "60")
                .body("");
        })
        .await;

    let client = AppConfigClient::new(Some(options(&server))).unwrap();
    client.prepare().await.unwrap();

    let configuration: Configuration = client.load_into_yaml().await.unwrap();
    assert_eq!(
        configuration,
        Configuration {
            db_host: "db.internal".into(),
            db_port: "5432".into(),
        }
    );

    // An unchanged configuration comes back as an empty body.
    let unchanged = client.load_config_bytes().await.unwrap();
    assert_eq!(unchanged, "db_host: db.internal\ndb_port: \"5432\"\n");

    session.assert_async().await;
    first_poll.assert_async().await;
    second_poll.assert_async().await;
}

#[tokio::test(flavor = "multi_thread")]
async fn fetch_failure_is_surfaced_with_context() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/configurationsessions");
            then.status(201)
                .header("content-type", "application/json")
                .json_body(json!({ "InitialConfigurationToken": "initial" }));
        })
        .await;
    server
        .mock_async(|when, then| {
            when.method(GET).path("/configuration");
            then.status(400)
                .header("content-type", "application/json")
                .header("x-amzn-errortype", "BadRequestException")
                .json_body(json!({ "Message": "Token is expired" }));
        })
        .await;

    let client = AppConfigClient::new(Some(options(&server))).unwrap();
    client.prepare().await.unwrap();

    let err = client.load_into_json::<Configuration>().await.unwrap_err();
    assert_eq!(err.code_str(), "appconfig/fetch");
    assert!(err
        .to_string()
        .starts_with("failed to get latest AWS appconfig configuration, "));
}

#[tokio::test(flavor = "multi_thread")]
async fn loading_without_prepare_is_rejected() {
    let client = AppConfigClient::new(None).unwrap();
    let err = client.reader().await.unwrap_err();
    assert_eq!(err.code_str(), "appconfig/not-prepared");
}

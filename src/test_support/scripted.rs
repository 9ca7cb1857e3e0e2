use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::appconfig::error::AppConfigResult;
use crate::appconfig::fetch::{AppConfigDataClient, LatestConfiguration, SessionRequest};

/// Transport that replays queued responses and records every call it receives.
#[derive(Default)]
pub struct ScriptedAppConfigDataClient {
    sessions: Mutex<VecDeque<AppConfigResult<String>>>,
    polls: Mutex<VecDeque<AppConfigResult<LatestConfiguration>>>,
    session_requests: Mutex<Vec<SessionRequest>>,
    polled_tokens: Mutex<Vec<String>>,
}

impl ScriptedAppConfigDataClient {
    pub fn push_session(&self, result: AppConfigResult<String>) -> &Self {
        self.sessions.lock().unwrap().push_back(result);
        self
    }

    pub fn push_poll(&self, result: AppConfigResult<LatestConfiguration>) -> &Self {
        self.polls.lock().unwrap().push_back(result);
        self
    }

    pub fn session_requests(&self) -> Vec<SessionRequest> {
        self.session_requests.lock().unwrap().clone()
    }

    pub fn polled_tokens(&self) -> Vec<String> {
        self.polled_tokens.lock().unwrap().clone()
    }
}

/// A poll response carrying `payload` and rotating to `next_token`.
pub fn poll_response(payload: &'static str, next_token: &str) -> LatestConfiguration {
    LatestConfiguration {
        configuration: Bytes::from_static(payload.as_bytes()),
        content_type: None,
        version_label: None,
        next_poll_token: Some(next_token.to_string()),
    }
}

#[async_trait]
impl AppConfigDataClient for ScriptedAppConfigDataClient {
    async fn start_configuration_session(
        &self,
        request: &SessionRequest,
    ) -> AppConfigResult<String> {
        self.session_requests.lock().unwrap().push(request.clone());
        self.sessions
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected start_configuration_session call")
    }

    async fn get_latest_configuration(&self, token: &str) -> AppConfigResult<LatestConfiguration> {
        self.polled_tokens.lock().unwrap().push(token.to_string());
        self.polls
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected get_latest_configuration call")
    }
}

//! Test utilities shared across crate-level unit tests.

pub mod http;
pub mod scripted;

pub use http::{mock_options, start_mock_server};
pub use scripted::{poll_response, ScriptedAppConfigDataClient};

//! Single-state test harness for the order-processing workflow.
//!
//! Requests run exactly one named state of a workflow definition through a
//! `TestState`-style API, optionally with a mocked result or error and an
//! injected execution context, and the response is checked with fluent
//! assertions. Retry, catch and fan-out semantics are evaluated by the service;
//! this crate only builds requests and inspects the reported outcome.
//!
//! - [`runner`]: fluent request builder plus assertions over the last response.
//! - [`helper`]: one call per workflow step with inline status checks.
//! - [`adapters`]: the [`TestStateApi`] boundary and the AWS Step Functions client.

pub mod adapters;
pub mod assertions;
pub mod config;
pub mod contract;
pub mod definition;
pub mod error;
pub mod helper;
mod logging;
pub mod request;
pub mod runner;

pub use adapters::test_state_api::TestStateApi;
pub use config::HarnessConfig;
pub use contract::{
    ErrorDetails, InspectionData, InspectionField, InspectionLevel, MockError, MockInput,
    StateConfiguration, TestStateRequest, TestStateResponse, TestStatus,
};
pub use definition::WorkflowDefinition;
pub use error::TestStateError;
pub use helper::{CallbackContext, RetryScenario, StateCall, StateTestHelper};
pub use request::TestStateRequestBuilder;
pub use runner::StateTestRunner;

#[cfg(feature = "sfn")]
pub use adapters::sfn::SfnTestStateApi;

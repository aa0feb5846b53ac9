#![allow(dead_code)]

pub mod responses;
pub mod scripted_api;

use std::path::PathBuf;

use order_workflow_harness::definition::DEFAULT_DEFINITION_PATH;
use order_workflow_harness::WorkflowDefinition;

/// Workspace copy of the order-processing definition.
pub fn order_definition_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../..")
        .join(DEFAULT_DEFINITION_PATH)
}

pub fn order_definition() -> WorkflowDefinition {
    WorkflowDefinition::load(order_definition_path()).expect("order definition should load")
}

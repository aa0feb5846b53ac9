//! Lambda handlers invoked by the order-processing workflow.
//!
//! Handlers are plain functions over typed events so they can be tested
//! without a Lambda runtime; the binaries under `src/bin` wire them into
//! `lambda_runtime`.

pub mod config;
pub mod handlers;
mod logging;

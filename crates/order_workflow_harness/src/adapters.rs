pub mod test_state_api;

#[cfg(feature = "sfn")]
pub mod sfn;

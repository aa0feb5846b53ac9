use aws_sdk_sfn::error::DisplayErrorContext;
use aws_sdk_sfn::operation::test_state::TestStateOutput;
use aws_sdk_sfn::types::{
    InspectionData as SfnInspectionData, InspectionLevel as SfnInspectionLevel, MockErrorOutput,
    MockInput as SfnMockInput, TestStateConfiguration,
};

use crate::adapters::test_state_api::TestStateApi;
use crate::contract::{
    ErrorDetails, InspectionData, MockInput, StateConfiguration, TestStateRequest,
    TestStateResponse, TestStatus,
};

/// `TestState` client for AWS Step Functions.
///
/// Calls are blocking: the adapter owns a single-threaded runtime and waits for
/// each response before returning, so it must not be used from inside another
/// Tokio runtime.
pub struct SfnTestStateApi {
    client: aws_sdk_sfn::Client,
    runtime: tokio::runtime::Runtime,
}

impl SfnTestStateApi {
    pub fn connect(region: &str) -> Result<Self, String> {
        let runtime = build_runtime()?;
        let aws_config = runtime.block_on(
            aws_config::defaults(aws_config::BehaviorVersion::latest())
                .region(aws_config::Region::new(region.to_string()))
                .load(),
        );
        Ok(Self {
            client: aws_sdk_sfn::Client::new(&aws_config),
            runtime,
        })
    }

    pub fn from_client(client: aws_sdk_sfn::Client) -> Result<Self, String> {
        Ok(Self {
            client,
            runtime: build_runtime()?,
        })
    }
}

impl TestStateApi for SfnTestStateApi {
    fn test_state(&self, request: &TestStateRequest) -> Result<TestStateResponse, String> {
        let mut call = self
            .client
            .test_state()
            .definition(request.definition.clone())
            .state_name(request.state_name.clone())
            .input(request.input.clone())
            .inspection_level(SfnInspectionLevel::from(request.inspection_level.as_str()))
            .set_mock(request.mock.as_ref().map(sdk_mock))
            .set_context(request.context.clone())
            .set_state_configuration(
                request
                    .state_configuration
                    .as_ref()
                    .map(sdk_state_configuration),
            )
            .set_role_arn(request.role_arn.clone());
        if request.reveal_secrets {
            call = call.reveal_secrets(true);
        }

        let output = self
            .runtime
            .block_on(call.send())
            .map_err(|error| format!("TestState request failed: {}", DisplayErrorContext(&error)))?;
        decode_output(&output)
    }
}

fn build_runtime() -> Result<tokio::runtime::Runtime, String> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|error| format!("failed to start tokio runtime: {error}"))
}

fn sdk_mock(mock: &MockInput) -> SfnMockInput {
    match mock {
        MockInput::Result(result) => SfnMockInput::builder().result(result.clone()).build(),
        MockInput::ErrorOutput(error) => SfnMockInput::builder()
            .error_output(
                MockErrorOutput::builder()
                    .error(error.error.clone())
                    .cause(error.cause.clone())
                    .build(),
            )
            .build(),
    }
}

fn sdk_state_configuration(config: &StateConfiguration) -> TestStateConfiguration {
    TestStateConfiguration::builder()
        .set_retrier_retry_count(config.retrier_retry_count)
        .set_error_caused_by_state(config.error_caused_by_state.clone())
        .set_map_iteration_failure_count(config.map_iteration_failure_count)
        .set_map_item_reader_data(config.map_item_reader_data.clone())
        .build()
}

fn decode_output(output: &TestStateOutput) -> Result<TestStateResponse, String> {
    let status = output
        .status()
        .ok_or_else(|| "TestState response did not include a status".to_string())?
        .as_str()
        .parse::<TestStatus>()?;

    Ok(TestStateResponse {
        status,
        output: output.output().map(str::to_string),
        error: output.error().map(str::to_string),
        cause: output.cause().map(str::to_string),
        next_state: output.next_state().map(str::to_string),
        inspection_data: output.inspection_data().map(decode_inspection),
    })
}

fn decode_inspection(inspection: &SfnInspectionData) -> InspectionData {
    InspectionData {
        input: inspection.input().map(str::to_string),
        after_input_path: inspection.after_input_path().map(str::to_string),
        after_parameters: inspection.after_parameters().map(str::to_string),
        after_arguments: inspection.after_arguments().map(str::to_string),
        result: inspection.result().map(str::to_string),
        after_result_selector: inspection.after_result_selector().map(str::to_string),
        after_result_path: inspection.after_result_path().map(str::to_string),
        variables: inspection.variables().map(str::to_string),
        error_details: inspection.error_details().map(|details| ErrorDetails {
            retry_index: details.retry_index(),
            catch_index: details.catch_index(),
            retry_backoff_interval_seconds: details.retry_backoff_interval_seconds(),
        }),
        tolerated_failure_count: inspection.tolerated_failure_count(),
        tolerated_failure_percentage: inspection.tolerated_failure_percentage(),
        max_concurrency: inspection.max_concurrency(),
    }
}

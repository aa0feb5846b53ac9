use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use order_workflow_harness::{
    HarnessConfig, InspectionLevel, MockError, SfnTestStateApi, StateTestRunner,
    TestStateResponse, WorkflowDefinition,
};
use serde_json::Value;

#[derive(Parser)]
#[command(
    name = "test_state",
    about = "Run one state of a workflow definition through the Step Functions TestState API",
    long_about = "Run one state of a workflow definition through the Step Functions TestState API.\n\
                  Defaults come from SFN_TEST_REGION, SFN_TEST_DEFINITION_PATH,\n\
                  SFN_TEST_INSPECTION_LEVEL and SFN_TEST_ROLE_ARN."
)]
struct Cli {
    /// Name of the state to execute
    #[arg(long)]
    state: String,
    /// Workflow definition file
    #[arg(long)]
    definition: Option<PathBuf>,
    /// State input as JSON text, or @path to read it from a file
    #[arg(long)]
    input: Option<String>,
    /// Mocked successful result (JSON text or @path)
    #[arg(long)]
    mock_result: Option<String>,
    /// Mocked error name; takes precedence over --mock-result
    #[arg(long)]
    mock_error: Option<String>,
    /// Cause reported with --mock-error
    #[arg(long, default_value = "", requires = "mock_error")]
    mock_cause: String,
    /// Execution context object (JSON text or @path)
    #[arg(long)]
    context: Option<String>,
    /// Retry attempt to simulate
    #[arg(long)]
    retry_count: Option<i32>,
    /// Nested state a Map/Parallel failure is attributed to
    #[arg(long)]
    error_caused_by: Option<String>,
    /// INFO, DEBUG or TRACE
    #[arg(long)]
    inspection_level: Option<InspectionLevel>,
    /// Unmask sensitive fields in inspection data
    #[arg(long)]
    reveal_secrets: bool,
    /// AWS region
    #[arg(long)]
    region: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(response) => match serde_json::to_string_pretty(&response) {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("error: failed to render response: {error}");
                ExitCode::FAILURE
            }
        },
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<TestStateResponse, String> {
    let config = HarnessConfig::from_env().map_err(|error| error.to_string())?;
    let definition_path = cli.definition.unwrap_or(config.definition_path);
    let definition =
        WorkflowDefinition::load(&definition_path).map_err(|error| error.to_string())?;
    let api = SfnTestStateApi::connect(cli.region.as_deref().unwrap_or(&config.region))?;

    let mut runner = StateTestRunner::new(&api, &definition);
    runner
        .with_inspection_level(cli.inspection_level.unwrap_or(config.inspection_level))
        .with_reveal_secrets(cli.reveal_secrets);
    if let Some(role_arn) = config.role_arn {
        runner.with_role_arn(role_arn);
    }
    if let Some(raw) = &cli.input {
        runner.with_input(read_json_arg("--input", raw)?);
    }
    if let Some(raw) = &cli.mock_result {
        runner.with_mock_result(&read_json_arg("--mock-result", raw)?);
    }
    if let Some(error) = cli.mock_error {
        runner.with_mock_error_output(MockError::new(error, cli.mock_cause));
    }
    if let Some(raw) = &cli.context {
        runner.with_context(&read_json_arg("--context", raw)?);
    }
    if let Some(retry_count) = cli.retry_count {
        runner.with_retrier_retry_count(retry_count);
    }
    if let Some(state_name) = cli.error_caused_by {
        runner.with_error_caused_by_state(state_name);
    }

    runner.execute(&cli.state).map_err(|error| error.to_string())?;
    Ok(runner.response().clone())
}

fn read_json_arg(flag: &str, raw: &str) -> Result<Value, String> {
    let text = match raw.strip_prefix('@') {
        Some(path) => fs::read_to_string(path)
            .map_err(|error| format!("{flag}: failed to read '{path}': {error}"))?,
        None => raw.to_string(),
    };
    serde_json::from_str(&text).map_err(|error| format!("{flag}: invalid JSON: {error}"))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn reads_inline_json_arguments() {
        let value = read_json_arg("--input", "{\"orderId\":\"order-1\"}").expect("inline json");
        assert_eq!(value["orderId"], "order-1");
    }

    #[test]
    fn reads_json_arguments_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"{\"approved\": true}").expect("write json");
        let raw = format!("@{}", file.path().display());

        let value = read_json_arg("--mock-result", &raw).expect("file json");
        assert_eq!(value["approved"], true);
    }

    #[test]
    fn names_the_flag_on_invalid_json() {
        let error = read_json_arg("--context", "{oops").expect_err("invalid json");
        assert!(error.starts_with("--context: invalid JSON"));
    }

    #[test]
    fn cli_parses_mock_error_with_cause() {
        let cli = Cli::try_parse_from([
            "test_state",
            "--state",
            "ValidateOrder",
            "--mock-error",
            "ValidationException",
            "--mock-cause",
            "bad order",
            "--inspection-level",
            "trace",
        ])
        .expect("arguments should parse");

        assert_eq!(cli.state, "ValidateOrder");
        assert_eq!(cli.mock_error.as_deref(), Some("ValidationException"));
        assert_eq!(cli.mock_cause, "bad order");
        assert_eq!(cli.inspection_level, Some(InspectionLevel::Trace));
    }
}

use lambda_runtime::{service_fn, Error, LambdaEvent};
use order_workflow_lambda::config::PaymentConfig;
use order_workflow_lambda::handlers::process_payment::{
    process_payment, ProcessPaymentEvent, ProcessPaymentResponse,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ProcessPaymentResponse, Error> {
    let payment: ProcessPaymentEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid process_payment event: {error}")))?;
    let config = PaymentConfig::from_env().map_err(|error| Error::from(error.to_string()))?;

    let mut rng = StdRng::from_entropy();
    Ok(process_payment(
        &payment,
        Some(event.context.request_id.as_str()),
        &config,
        &mut rng,
    ))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}

use lambda_runtime::{service_fn, Error, LambdaEvent};
use order_workflow_lambda::handlers::validate_order::{
    validate_order, ValidateOrderEvent, ValidateOrderResponse,
};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<ValidateOrderResponse, Error> {
    let order: ValidateOrderEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid validate_order event: {error}")))?;
    Ok(validate_order(&order))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}

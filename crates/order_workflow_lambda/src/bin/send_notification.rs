use lambda_runtime::{service_fn, Error, LambdaEvent};
use order_workflow_lambda::config::NotificationConfig;
use order_workflow_lambda::handlers::send_notification::{
    send_notification, SendNotificationEvent, SendNotificationResponse,
};
use serde_json::Value;

async fn handle_request(event: LambdaEvent<Value>) -> Result<SendNotificationResponse, Error> {
    let notification: SendNotificationEvent = serde_json::from_value(event.payload)
        .map_err(|error| Error::from(format!("invalid send_notification event: {error}")))?;
    Ok(send_notification(&notification, &NotificationConfig::from_env()))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    lambda_runtime::run(service_fn(handle_request)).await
}

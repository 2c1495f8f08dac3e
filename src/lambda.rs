use aws_lambda_events::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use docgen_lambda::utils::{logger, validation::Validate};
use docgen_lambda::{DefaultHandler, HandlerConfig};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

async fn function_handler(
    handler: &DefaultHandler,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    tracing::debug!(request_id = %event.context.request_id, "Handling document request");

    // Failures are already encoded in the response.
    Ok(handler.handle(event.payload).await)
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    let config = HandlerConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!(error = %e, "Invalid handler configuration");
        return Err(e.into());
    }
    tracing::info!(
        config_path = %config.config_path.display(),
        cors = config.cors_origin.is_some(),
        "Starting docgen Lambda function"
    );

    let handler = DefaultHandler::with_defaults(config);
    let handler = &handler;

    run(service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| async move {
        function_handler(handler, event).await
    }))
    .await
}

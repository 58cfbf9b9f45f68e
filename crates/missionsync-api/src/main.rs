use lambda_http::{Error, Request, run, service_fn};
use missionsync_api::ApiContext;
use missionsync_core::utils::logging::init_tracing;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    info!("Starting Missionsync API Lambda function");

    // Initialize API context
    let ctx = ApiContext::new().await?;

    // Run the Lambda runtime with our handler
    run(service_fn(|event: Request| {
        let ctx = ctx.clone();
        async move { missionsync_api::handler(ctx, event).await }
    }))
    .await
}

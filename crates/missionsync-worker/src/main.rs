use lambda_runtime::{Error, LambdaEvent, run, service_fn};
use missionsync_worker::{WorkerContext, handler};
use missionsync_core::utils::logging::init_tracing;
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();

    info!("Starting Missionsync worker Lambda");

    let ctx = Arc::new(WorkerContext::from_env().await?);

    run(service_fn(move |event: LambdaEvent<Value>| {
        let ctx = ctx.clone();
        async move { handler(&ctx, event).await }
    }))
    .await
}

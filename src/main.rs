use aws_lambda_events::event::kinesis::KinesisEvent;
use lambda_runtime::{LambdaEvent, service_fn};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use searchfeed::config::SearchConfig;
use searchfeed::handler::{BatchHandler, Response};
use searchfeed::search::SearchDomainClient;

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        // the hosting runtime stamps log lines itself
        .without_time()
        .init();

    lambda_runtime::run(service_fn(handle)).await
}

async fn handle(event: LambdaEvent<KinesisEvent>) -> Result<Response, lambda_runtime::Error> {
    let config = SearchConfig::from_env()?;
    debug!(?config, "loaded search config");

    let sink = SearchDomainClient::new(&config)?;
    let response = BatchHandler::new(sink).handle(event.payload).await?;

    Ok(response)
}

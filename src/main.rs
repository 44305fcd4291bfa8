use std::sync::Arc;

use carinfo_proxy::logger;
use carinfo_proxy::proxy::config::ProxyConfig;
use carinfo_proxy::proxy::upstream::client::UpstreamClient;
use carinfo_proxy::proxy::AxumServer;
use tracing::warn;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    logger::init_logger();

    let config = ProxyConfig::load().map_err(anyhow::Error::msg)?;
    if config.api_key.is_none() {
        warn!("GEMINI_API_KEY is not set; every request will fail until it is provided");
    }

    let upstream = Arc::new(UpstreamClient::new());
    let (_server, handle) = AxumServer::start(config, upstream)
        .await
        .map_err(anyhow::Error::msg)?;

    handle.await?;
    Ok(())
}

use anyhow::Context;
use srv_discovery::{ServiceQuery, ServiceResolver};
use tracing_subscriber::EnvFilter;

// Usage: cargo run --example resolve -- namenode.service.consul [dns-host] [dns-port]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let service = args.next().context("missing service name")?;

    // Without an explicit DNS host the system configuration is used.
    let mut builder = ServiceResolver::builder();
    if let Some(host) = args.next() {
        builder = builder.dns_host(host);
    }
    if let Some(port) = args.next() {
        builder = builder.dns_port(port.parse().context("invalid dns port")?);
    }

    let resolver = builder
        .build()
        .await
        .context("failed to build ServiceResolver")?;

    let query = ServiceQuery::new(service)?;
    for endpoint in resolver.resolve(&query).await? {
        println!("{endpoint}");
    }

    Ok(())
}

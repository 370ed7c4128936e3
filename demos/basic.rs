use std::time::Duration;

use dogstatsd_reporter::{ReporterBuilder, DEFAULT_REGISTRY};

// Run against a local dogstatsd agent (https://docs.datadoghq.com/developers/dogstatsd),
// or point DD_AGENT_HOST somewhere else.
#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let addr = std::env::var("DD_AGENT_HOST").unwrap_or_else(|_| "127.0.0.1:8125".to_owned());
    let reporter = ReporterBuilder::new()
        .interval(Duration::from_secs(2))
        .percentiles([0.25, 0.99])
        .tags(["env:dev"])
        .host_tag()
        .build(None, &addr)?;
    let handle = reporter.spawn();

    let requests = DEFAULT_REGISTRY.counter("demo.requests[endpoint:/]");
    let inflight = DEFAULT_REGISTRY.int_gauge("demo.inflight");
    let latency = DEFAULT_REGISTRY.timer("demo.latency");

    let mut ticker = tokio::time::interval(Duration::from_millis(200));
    for i in 0..100u64 {
        ticker.tick().await;
        requests.incr();
        inflight.set((i % 7) as i64);
        latency.record(Duration::from_millis(5 + i % 20));
    }

    handle.shutdown().await;
    Ok(())
}

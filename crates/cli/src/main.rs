//! # Copper DNS
//!
//! Main entry point: loads configuration, wires the resolution pipeline,
//! starts the background jobs and serves DNS over UDP and TCP.

mod bootstrap;
mod server;

use clap::Parser;
use copper_dns_domain::CliOverrides;
use copper_dns_infrastructure::dns::transport::{DnsTransport, UdpTransport};
use copper_dns_infrastructure::dns::{
    AnswerCache, DnsServerHandler, Forwarder, HealthChecker, RecordStore, UpstreamPool, ZoneMatcher,
};
use copper_dns_jobs::{CacheSweepJob, HealthProbeJob, JobRunner};
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(name = "copper-dns")]
#[command(version)]
#[command(about = "A forwarding DNS server with local zones and answer caching")]
struct Cli {
    /// Path to the JSON configuration file
    #[arg(short, long, default_value = "config/prod.json")]
    config: String,

    /// DNS server port (overrides the configuration file)
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address (overrides the configuration file)
    #[arg(short = 'b', long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = bootstrap::config::load_config(
        Some(&cli.config),
        CliOverrides {
            dns_port: cli.dns_port,
            bind_address: cli.bind,
        },
    )?;

    bootstrap::logging::init_logging(&config);

    info!(
        config_file = %cli.config,
        upstreams = config.servers.len(),
        zones = config.domains.len(),
        "Configuration loaded"
    );

    let cache = Arc::new(AnswerCache::new());
    let pool = Arc::new(UpstreamPool::from_servers(&config.servers)?);
    let transport: Arc<dyn DnsTransport> =
        Arc::new(UdpTransport::new(config.forward.socket_pool_size));

    let forwarder = Arc::new(Forwarder::new(
        Arc::clone(&cache),
        Arc::clone(&pool),
        Arc::clone(&transport),
        Duration::from_millis(config.forward.query_timeout),
    ));
    let matcher = ZoneMatcher::new(Arc::new(RecordStore::new(config.domains.clone())));
    let handler = DnsServerHandler::new(matcher, forwarder);

    let checker = Arc::new(HealthChecker::new(
        Arc::clone(&pool),
        Arc::clone(&transport),
        &config.health,
    ));

    let shutdown = CancellationToken::new();
    JobRunner::new()
        .with_cache_sweep(
            CacheSweepJob::new(Arc::clone(&cache), config.cache.sweep_interval)
                .with_cancellation(shutdown.clone()),
        )
        .with_health_probe(
            HealthProbeJob::new(checker, config.health.interval)
                .with_cancellation(shutdown.clone()),
        )
        .start()
        .await;

    let bind_addr = format!("{}:{}", config.server.bind_address, config.server.dns_port);
    let result = server::dns::start_dns_server(bind_addr, handler, config.server.tcp_timeout).await;

    shutdown.cancel();
    result
}

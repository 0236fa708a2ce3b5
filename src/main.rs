use anyhow::Result;
use clap::Parser;
use snaproute_exporter::{config::Config, server};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/Default.toml")]
    config: String,

    /// SnapRoute REST API prefix (overrides config)
    #[arg(long, env = "SNAPROUTE_URL")]
    snaproute_url: Option<String>,

    /// Port to listen on for metrics (overrides config)
    #[arg(short, long, env = "EXPORTER_PORT")]
    port: Option<u16>,

    /// Address to bind to (overrides config)
    #[arg(short, long, env = "EXPORTER_ADDR")]
    addr: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!(
        "Starting SnapRoute FlexSwitch Exporter v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let mut config = Config::load(&args.config)?;

    // Override with CLI arguments if provided
    if let Some(url) = args.snaproute_url {
        config.snaproute.url = url;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(addr) = args.addr {
        config.server.addr = addr;
    }
    config.validate()?;

    info!("Configuration loaded successfully");
    info!("SnapRoute API: {}", config.snaproute.url);
    info!("Barefoot platform: {}", config.snaproute.is_barefoot);
    info!(
        "Collecting every {}s (ipv4 interfaces: {}, port deltas: {})",
        config.collector.interval_seconds,
        config.collector.collect_ipv4_interfaces,
        config.collector.port_deltas
    );
    info!(
        "Metrics endpoint: http://{}:{}/metrics",
        config.server.addr, config.server.port
    );

    if let Err(e) = server::start(config).await {
        error!("Server error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

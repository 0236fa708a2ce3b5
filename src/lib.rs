//! SnapRoute FlexSwitch Telemetry Exporter
//!
//! Polls the REST API of a SnapRoute FlexSwitch device and exposes what it
//! reports as Prometheus metrics.
//!
//! # Overview
//!
//! Every collection cycle walks a fixed list of telemetry domains (platform,
//! PSUs, SFPs, CoPP, VLANs, ports, ASIC summary, system status, route
//! statistics, buffer statistics). Each domain is one JSON document under
//! `/public/v1/state/`. Objects are turned into tagged samples and handed to
//! an [`sink::Accumulator`]; the exporter's accumulator is a Prometheus
//! registry served over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐        HTTP GET        ┌──────────────────┐
//! │ FlexSwitch  │ ◄────────────────────  │     Exporter     │
//! │  REST API   │   /public/v1/state/*   │                  │
//! └─────────────┘                        │  ┌────────────┐  │
//!                                        │  │ Collectors │  │
//!                                        │  └─────┬──────┘  │
//!                                        │        ▼ samples │     HTTP      ┌────────────┐
//!                                        │  ┌────────────┐  │ ◄───────────► │ Prometheus │
//!                                        │  │  Metrics   │  │   /metrics    └────────────┘
//!                                        │  └────────────┘  │
//!                                        └──────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`snaproute`] - REST client, transport seam and document types
//! - [`collectors`] - Per-domain collectors and the collection cycle
//! - [`identity`] - Hostname and management address discovery
//! - [`sink`] - Sample sink interface and in-memory sink
//! - [`metrics`] - Prometheus sink
//! - [`server`] - HTTP server and collection loop
//! - [`config`] - Configuration management
//! - [`error`] - Error types
//!
//! # Quick Start
//!
//! ```no_run
//! use snaproute_exporter::{config::Config, server};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config/Default.toml")?;
//!     server::start(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! Embedding the collector with another sink:
//!
//! ```no_run
//! use snaproute_exporter::collectors::SnapRouteCollector;
//! use snaproute_exporter::sink::MemorySink;
//! use snaproute_exporter::snaproute::SnapRouteClient;
//!
//! # async fn run() -> snaproute_exporter::error::Result<()> {
//! let client = SnapRouteClient::new("http://switch1:8080/public/v1/", 64);
//! let mut collector = SnapRouteCollector::new(client);
//! let sink = MemorySink::new();
//! collector.gather(&sink).await?;
//! println!("{} samples", sink.len());
//! # Ok(())
//! # }
//! ```

pub mod collectors;
pub mod config;
pub mod error;
pub mod identity;
pub mod metrics;
pub mod server;
pub mod sink;
pub mod snaproute;

//! Collection Cycle
//!
//! [`SnapRouteCollector::gather`] runs one cycle: resolve the host identity,
//! then walk the domains in [`COLLECTION_ORDER`], stopping at the first failure.
//!
//! The whole cycle runs under a [`NotReadyGuard`]. If identity resolution
//! fails, a collector panics, or the cycle future is dropped midway, the guard
//! emits a single `status{ready=false}` sample tagged with the hostname and the
//! cycle ends without an error. [`SnapRouteCollector::last_fault`] tells such a
//! cycle apart from a clean one. Domain failures disarm the guard and are
//! returned to the caller.

use super::deltas::PortCounterHistory;
use super::{
    asic_summary, buffer_stats, copp, emit_not_ready, ipv4_intf, platform, port, psu, route_stats,
    sfp, system_status, vlan, CollectionContext, Domain,
};
use crate::config::Config;
use crate::error::{ExporterError, IdentityError, Result};
use crate::identity::{self, Identity};
use crate::sink::Accumulator;
use crate::snaproute::{HttpTransport, SnapRouteClient, Transport};
use chrono::{DateTime, Utc};
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use tracing::{debug, error, info, warn};

/// Fixed processing order of the built-in domains
pub const COLLECTION_ORDER: [Domain; 10] = [
    platform::DOMAIN,
    psu::DOMAIN,
    sfp::DOMAIN,
    copp::DOMAIN,
    vlan::DOMAIN,
    port::DOMAIN,
    asic_summary::DOMAIN,
    system_status::DOMAIN,
    route_stats::DOMAIN,
    buffer_stats::DOMAIN,
];

/// Why a cycle that returned `Ok(())` still collected nothing useful
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleFault {
    Identity,
    Panic,
}

impl CycleFault {
    /// Short label for the fault, used as a metric label
    pub fn kind(self) -> &'static str {
        match self {
            CycleFault::Identity => "identity",
            CycleFault::Panic => "panic",
        }
    }
}

type IdentityResolver = Box<dyn Fn() -> std::result::Result<Identity, IdentityError> + Send + Sync>;

/// Emits the fallback "not ready" sample unless disarmed
pub struct NotReadyGuard<'a> {
    sink: &'a dyn Accumulator,
    armed: bool,
}

impl<'a> NotReadyGuard<'a> {
    pub fn arm(sink: &'a dyn Accumulator) -> Self {
        Self { sink, armed: true }
    }

    pub fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for NotReadyGuard<'_> {
    fn drop(&mut self) {
        if self.armed {
            error!("Problem reading from SnapRoute");
            emit_not_ready(self.sink, &identity::local_hostname());
        }
    }
}

pub struct SnapRouteCollector<T = HttpTransport> {
    client: SnapRouteClient<T>,
    is_barefoot: bool,
    collect_ipv4_interfaces: bool,
    port_history: Option<PortCounterHistory>,
    last_cycle: Option<DateTime<Utc>>,
    last_fault: Option<CycleFault>,
    resolve_identity: IdentityResolver,
}

impl SnapRouteCollector<HttpTransport> {
    pub fn from_config(config: &Config) -> Self {
        let client = SnapRouteClient::new(config.snaproute.url.clone(), config.snaproute.max_pages);
        let mut collector = Self::new(client)
            .with_barefoot(config.snaproute.is_barefoot)
            .with_ipv4_interfaces(config.collector.collect_ipv4_interfaces);
        if config.collector.port_deltas {
            collector = collector.with_port_deltas();
        }
        collector
    }
}

impl<T: Transport> SnapRouteCollector<T> {
    pub fn new(client: SnapRouteClient<T>) -> Self {
        Self {
            client,
            is_barefoot: false,
            collect_ipv4_interfaces: false,
            port_history: None,
            last_cycle: None,
            last_fault: None,
            resolve_identity: Box::new(identity::resolve_identity),
        }
    }

    /// Record the device family. Nothing reads it yet.
    pub fn with_barefoot(mut self, is_barefoot: bool) -> Self {
        self.is_barefoot = is_barefoot;
        self
    }

    pub fn with_ipv4_interfaces(mut self, enabled: bool) -> Self {
        self.collect_ipv4_interfaces = enabled;
        self
    }

    pub fn with_port_deltas(mut self) -> Self {
        self.port_history = Some(PortCounterHistory::new());
        self
    }

    /// Replace host identity discovery
    pub fn with_identity_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn() -> std::result::Result<Identity, IdentityError> + Send + Sync + 'static,
    {
        self.resolve_identity = Box::new(resolver);
        self
    }

    pub fn is_barefoot(&self) -> bool {
        self.is_barefoot
    }

    pub fn client(&self) -> &SnapRouteClient<T> {
        &self.client
    }

    /// Start time of the most recent cycle that got past the port domain
    pub fn last_cycle(&self) -> Option<DateTime<Utc>> {
        self.last_cycle
    }

    /// Fault that ended the most recent cycle after reporting not ready
    pub fn last_fault(&self) -> Option<CycleFault> {
        self.last_fault
    }

    pub fn port_history(&self) -> Option<&PortCounterHistory> {
        self.port_history.as_ref()
    }

    /// Run one collection cycle against `sink`
    ///
    /// # Returns
    ///
    /// * `Ok(())` - every domain was collected, or the cycle hit an identity
    ///   failure or a panic and reported it as `status{ready=false}`; the
    ///   latter two are recorded in [`Self::last_fault`]
    /// * `Err(_)` - a domain failed to fetch or decode; later domains were skipped
    pub async fn gather(&mut self, sink: &dyn Accumulator) -> Result<()> {
        self.last_fault = None;
        let guard = NotReadyGuard::arm(sink);
        let outcome = AssertUnwindSafe(self.collect_cycle(sink))
            .catch_unwind()
            .await;

        match outcome {
            Ok(Ok(())) => {
                guard.disarm();
                Ok(())
            }
            Ok(Err(ExporterError::Identity(e))) => {
                warn!("Identity resolution failed: {}", e);
                self.last_fault = Some(CycleFault::Identity);
                drop(guard);
                Ok(())
            }
            Ok(Err(e)) => {
                guard.disarm();
                Err(e)
            }
            Err(panic) => {
                warn!("Collection cycle panicked: {}", panic_message(panic.as_ref()));
                self.last_fault = Some(CycleFault::Panic);
                drop(guard);
                Ok(())
            }
        }
    }

    async fn collect_cycle(&mut self, sink: &dyn Accumulator) -> Result<()> {
        let started = Utc::now();
        let identity = (self.resolve_identity)()?;
        debug!(
            "Collecting from {} as {} (ipv4 {:?}, ipv6 {:?})",
            self.client.base_url(),
            identity.hostname,
            identity.mgmt_ipv4,
            identity.mgmt_ipv6
        );

        if let Some(history) = self.port_history.as_mut() {
            history.begin_cycle();
        }

        let ctx = CollectionContext {
            client: &self.client,
            sink,
            identity: &identity,
            timestamp: started,
        };

        platform::collect_platform_metrics(&ctx).await?;
        psu::collect_psu_metrics(&ctx).await?;
        sfp::collect_sfp_metrics(&ctx).await?;
        copp::collect_copp_metrics(&ctx).await?;
        vlan::collect_vlan_metrics(&ctx).await?;
        port::collect_port_metrics(&ctx, self.port_history.as_mut()).await?;

        self.last_cycle = Some(started);

        asic_summary::collect_asic_summary_metrics(&ctx).await?;
        system_status::collect_system_status_metrics(&ctx).await?;
        route_stats::collect_route_stats_metrics(&ctx).await?;
        buffer_stats::collect_buffer_stats_metrics(&ctx).await?;

        if self.collect_ipv4_interfaces {
            ipv4_intf::collect_ipv4_intf_metrics(&ctx).await?;
        }

        if let Some(history) = self.port_history.as_mut() {
            history.commit();
        }

        info!(
            "Collection cycle finished in {} ms",
            (Utc::now() - started).num_milliseconds()
        );
        Ok(())
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

//! Domain Collectors
//!
//! One collector per SnapRoute telemetry domain. Each collector fetches its
//! state document, decodes it and turns every object into tagged samples.
//!
//! # Architecture
//!
//! Collectors follow a consistent pattern:
//! - Accept a `CollectionContext` holding the client, the sink, the resolved
//!   host identity and the cycle timestamp
//! - Fetch through [`CollectionContext::fetch`] / [`CollectionContext::fetch_list`],
//!   which apply the domain's [`FailurePolicy`]
//! - Emit through a declarative [`FieldSpec`] table, one sample per row
//!
//! # Error Handling
//!
//! Every transport or decode failure ends the cycle. Core health and inventory
//! domains first announce it with a `status` sample carrying `ready=false`;
//! statistics domains only return the error.

use crate::error::Result;
use crate::identity::Identity;
use crate::sink::{Accumulator, FieldValue, Fields, SampleKind, Tags};
use crate::snaproute::types::Entry;
use crate::snaproute::{SnapRouteClient, Transport};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use tracing::warn;

/// What a domain failure does besides ending the cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Emit `status{ready=false}` before returning the error
    AnnounceNotReady,
    /// Return the error without any sample
    Silent,
}

/// Static description of one telemetry domain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    pub name: &'static str,
    pub path: &'static str,
    pub policy: FailurePolicy,
}

/// One row of a domain's emission table
pub struct FieldSpec<O> {
    pub name: &'static str,
    pub kind: SampleKind,
    pub value: fn(&O) -> FieldValue,
}

impl<O> FieldSpec<O> {
    pub const fn field(name: &'static str, value: fn(&O) -> FieldValue) -> Self {
        Self {
            name,
            kind: SampleKind::Field,
            value,
        }
    }

    pub const fn gauge(name: &'static str, value: fn(&O) -> FieldValue) -> Self {
        Self {
            name,
            kind: SampleKind::Gauge,
            value,
        }
    }

    pub const fn counter(name: &'static str, value: fn(&O) -> FieldValue) -> Self {
        Self {
            name,
            kind: SampleKind::Counter,
            value,
        }
    }
}

/// Emit one sample per table row, all sharing `tags` and `timestamp`
pub fn emit_fields<O>(
    sink: &dyn Accumulator,
    measurement: &str,
    table: &[FieldSpec<O>],
    object: &O,
    tags: &Tags,
    timestamp: DateTime<Utc>,
) {
    for spec in table {
        let mut fields = Fields::new();
        fields.insert(spec.name.to_string(), (spec.value)(object));
        match spec.kind {
            SampleKind::Field => sink.add_fields(measurement, fields, tags.clone(), timestamp),
            SampleKind::Gauge => sink.add_gauge(measurement, fields, tags.clone(), timestamp),
            SampleKind::Counter => sink.add_counter(measurement, fields, tags.clone(), timestamp),
        }
    }
}

/// `status{ready=false}` tagged with the hostname only
pub fn emit_not_ready(sink: &dyn Accumulator, hostname: &str) {
    let mut fields = Fields::new();
    fields.insert("ready".to_string(), FieldValue::Bool(false));
    sink.add_fields("status", fields, host_tags(hostname), Utc::now());
}

pub fn host_tags(hostname: &str) -> Tags {
    let mut tags = Tags::new();
    tags.insert("hostname".to_string(), hostname.to_string());
    tags
}

/// Shared context passed to all collectors
pub struct CollectionContext<'a, T> {
    /// SnapRoute API client
    pub client: &'a SnapRouteClient<T>,
    /// Destination of every sample
    pub sink: &'a dyn Accumulator,
    /// Host identity resolved at cycle start
    pub identity: &'a Identity,
    /// Cycle start, stamped on every domain sample
    pub timestamp: DateTime<Utc>,
}

impl<T: Transport> CollectionContext<'_, T> {
    /// Fetch a single-object document for `domain`
    pub async fn fetch<D: DeserializeOwned>(&self, domain: &Domain) -> Result<D> {
        let result = self.client.query(domain.name, domain.path).await;
        self.contain(domain, result)
    }

    /// Fetch every entry of a list document for `domain`
    pub async fn fetch_list<P>(&self, domain: &Domain) -> Result<Vec<Entry<P>>>
    where
        P: DeserializeOwned + Default,
    {
        let result = self.client.query_list(domain.name, domain.path).await;
        self.contain(domain, result)
    }

    fn contain<R>(&self, domain: &Domain, result: Result<R>) -> Result<R> {
        if result.is_err() {
            warn!("{} collection failed, aborting cycle", domain.name);
            if domain.policy == FailurePolicy::AnnounceNotReady {
                emit_not_ready(self.sink, &self.identity.hostname);
            }
        }
        result
    }

    /// Tags for device-wide documents
    pub fn device_tags(&self) -> Tags {
        let mut tags = host_tags(&self.identity.hostname);
        tags.insert("mgmt-ip".to_string(), self.identity.mgmt_ipv4.clone());
        tags.insert("mgmt-ipv6".to_string(), self.identity.mgmt_ipv6.clone());
        tags
    }

    /// Tags for one object of a list domain, keyed by its discriminator
    pub fn entry_tags(&self, key: &str, value: impl Into<String>) -> Tags {
        let mut tags = Tags::new();
        tags.insert(key.to_string(), value.into());
        tags.insert("Hostname".to_string(), self.identity.hostname.clone());
        tags.insert("mgmtip".to_string(), self.identity.mgmt_ipv4.clone());
        tags.insert("mgmtipv6".to_string(), self.identity.mgmt_ipv6.clone());
        tags
    }

    pub fn host_tags(&self) -> Tags {
        host_tags(&self.identity.hostname)
    }

    pub fn emit<O>(&self, measurement: &str, table: &[FieldSpec<O>], object: &O, tags: &Tags) {
        emit_fields(self.sink, measurement, table, object, tags, self.timestamp);
    }
}

// Collector modules
pub mod asic_summary;
pub mod buffer_stats;
pub mod copp;
pub mod cycle;
pub mod deltas;
pub mod ipv4_intf;
pub mod platform;
pub mod port;
pub mod psu;
pub mod route_stats;
pub mod sfp;
pub mod system_status;
pub mod vlan;

// Re-export collector functions for convenient access
pub use asic_summary::collect_asic_summary_metrics;
pub use buffer_stats::collect_buffer_stats_metrics;
pub use copp::collect_copp_metrics;
pub use cycle::{CycleFault, SnapRouteCollector, COLLECTION_ORDER};
pub use deltas::{PortCounterHistory, PortCounters};
pub use ipv4_intf::collect_ipv4_intf_metrics;
pub use platform::collect_platform_metrics;
pub use port::collect_port_metrics;
pub use psu::collect_psu_metrics;
pub use route_stats::collect_route_stats_metrics;
pub use sfp::collect_sfp_metrics;
pub use system_status::collect_system_status_metrics;
pub use vlan::collect_vlan_metrics;

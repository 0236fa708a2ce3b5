//! Buffer Statistics Collector
//!
//! Per-port buffer usage from the ASIC buffer statistics tracker.
//!
//! # Samples Produced
//! - `bufferportstats` (counter) - EgressPort, IngressPort, PortBufferStat
//!   - Tags: IntfRef, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::BufferPortStatObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "bufferportstats",
    path: "state/bufferportstats",
    policy: FailurePolicy::Silent,
};

type Spec = FieldSpec<BufferPortStatObject>;

pub const FIELDS: &[Spec] = &[
    Spec::counter("EgressPort", |b| b.egress_port.into()),
    Spec::counter("IngressPort", |b| b.ingress_port.into()),
    Spec::counter("PortBufferStat", |b| b.port_buffer_stat.into()),
];

pub async fn collect_buffer_stats_metrics<T: Transport>(
    ctx: &CollectionContext<'_, T>,
) -> Result<()> {
    let ports = ctx.fetch_list::<BufferPortStatObject>(&DOMAIN).await?;
    for port in &ports {
        let tags = ctx.entry_tags("IntfRef", port.object.intf_ref.clone());
        ctx.emit("bufferportstats", FIELDS, &port.object, &tags);
    }
    debug!("Updated buffer stats for {} ports", ports.len());
    Ok(())
}

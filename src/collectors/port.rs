//! Port State Collector
//!
//! Link state and traffic counters for every front-panel port.
//!
//! # Samples Produced
//! - `ports`
//!   - fields: OperState, OperSpeed
//!   - counters: IfInUcastPkts, IfOutUcastPkts, IfinDiscards, IfoutDiscards,
//!     IfInOctets, IfOutOctets, IfEtherPkts, IfEtherMCPkts, IfEtherBcastPkts
//!   - Tags: port (IntfRef), Hostname, mgmtip, mgmtipv6
//! - `portdeltas` (gauge, only with port deltas enabled) - counter growth
//!   since the previous successful cycle, same tags

use super::deltas::{PortCounterHistory, PortCounters};
use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::PortObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "port",
    path: "state/Ports",
    policy: FailurePolicy::AnnounceNotReady,
};

type Spec = FieldSpec<PortObject>;

// Dashboards read OperSpeed as the oper-state string; keep it that way.
pub const FIELDS: &[Spec] = &[
    Spec::field("OperState", |p| (&p.oper_state).into()),
    Spec::field("OperSpeed", |p| (&p.oper_state).into()),
    Spec::counter("IfInUcastPkts", |p| p.if_in_ucast_pkts.into()),
    Spec::counter("IfOutUcastPkts", |p| p.if_out_ucast_pkts.into()),
    Spec::counter("IfinDiscards", |p| p.if_in_discards.into()),
    Spec::counter("IfoutDiscards", |p| p.if_out_discards.into()),
    Spec::counter("IfInOctets", |p| p.if_in_octets.into()),
    Spec::counter("IfOutOctets", |p| p.if_out_octets.into()),
    Spec::counter("IfEtherPkts", |p| p.if_ether_pkts.into()),
    Spec::counter("IfEtherMCPkts", |p| p.if_ether_mc_pkts.into()),
    Spec::counter("IfEtherBcastPkts", |p| p.if_ether_bcast_pkts.into()),
];

type DeltaSpec = FieldSpec<PortCounters>;

pub const DELTA_FIELDS: &[DeltaSpec] = &[
    DeltaSpec::gauge("IfInUcastPkts", |d| d.in_ucast_pkts.into()),
    DeltaSpec::gauge("IfOutUcastPkts", |d| d.out_ucast_pkts.into()),
    DeltaSpec::gauge("IfInDiscards", |d| d.in_discards.into()),
    DeltaSpec::gauge("IfOutDiscards", |d| d.out_discards.into()),
    DeltaSpec::gauge("IfEtherPkts", |d| d.ether_pkts.into()),
    DeltaSpec::gauge("IfEtherMCPkts", |d| d.ether_mc_pkts.into()),
    DeltaSpec::gauge("IfEtherBcastPkts", |d| d.ether_bcast_pkts.into()),
];

fn counters_of(port: &PortObject) -> PortCounters {
    PortCounters {
        in_ucast_pkts: port.if_in_ucast_pkts,
        out_ucast_pkts: port.if_out_ucast_pkts,
        in_discards: port.if_in_discards,
        out_discards: port.if_out_discards,
        ether_pkts: port.if_ether_pkts,
        ether_mc_pkts: port.if_ether_mc_pkts,
        ether_bcast_pkts: port.if_ether_bcast_pkts,
    }
}

/// Collects port state and counters from SnapRoute
///
/// # Arguments
///
/// * `ctx` - Collection context
/// * `history` - Counter history; when present, `portdeltas` samples are
///   emitted for ports seen in the previous successful cycle
pub async fn collect_port_metrics<T: Transport>(
    ctx: &CollectionContext<'_, T>,
    mut history: Option<&mut PortCounterHistory>,
) -> Result<()> {
    let ports = ctx.fetch_list::<PortObject>(&DOMAIN).await?;
    for port in &ports {
        let tags = ctx.entry_tags("port", port.object.intf_ref.clone());
        ctx.emit("ports", FIELDS, &port.object, &tags);

        if let Some(history) = history.as_deref_mut() {
            if let Some(delta) = history.observe(port.object.if_index, counters_of(&port.object)) {
                ctx.emit("portdeltas", DELTA_FIELDS, &delta, &tags);
            }
        }
    }
    debug!("Updated metrics for {} ports", ports.len());
    Ok(())
}

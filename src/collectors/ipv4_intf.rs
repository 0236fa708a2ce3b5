//! IPv4 Interface Collector
//!
//! Opt-in (`collector.collect_ipv4_interfaces`). Runs after every other domain
//! and fails silently like the other statistics domains.
//!
//! # Samples Produced
//! - `ipv4intf`
//!   - fields: IpAddr, OperState, LastUpEventTime, LastDownEventTime, L2IntfType
//!   - counters: NumUpEvents, NumDownEvents
//!   - gauges: L2IntfId
//!   - Tags: IntfRef, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::Ipv4IntfObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "ipv4intf",
    path: "state/IPv4Intfs",
    policy: FailurePolicy::Silent,
};

type Spec = FieldSpec<Ipv4IntfObject>;

pub const FIELDS: &[Spec] = &[
    Spec::field("IpAddr", |i| (&i.ip_addr).into()),
    Spec::field("OperState", |i| (&i.oper_state).into()),
    Spec::counter("NumUpEvents", |i| i.num_up_events.into()),
    Spec::counter("NumDownEvents", |i| i.num_down_events.into()),
    Spec::field("LastUpEventTime", |i| (&i.last_up_event_time).into()),
    Spec::field("LastDownEventTime", |i| (&i.last_down_event_time).into()),
    Spec::field("L2IntfType", |i| (&i.l2_intf_type).into()),
    Spec::gauge("L2IntfId", |i| i.l2_intf_id.into()),
];

pub async fn collect_ipv4_intf_metrics<T: Transport>(
    ctx: &CollectionContext<'_, T>,
) -> Result<()> {
    let intfs = ctx.fetch_list::<Ipv4IntfObject>(&DOMAIN).await?;
    for intf in &intfs {
        let tags = ctx.entry_tags("IntfRef", intf.object.intf_ref.clone());
        ctx.emit("ipv4intf", FIELDS, &intf.object, &tags);
    }
    debug!("Updated metrics for {} IPv4 interfaces", intfs.len());
    Ok(())
}

//! Control Plane Policing Collector
//!
//! Per-protocol CoPP policer rates and packet counts from `state/coppstate`.
//!
//! # Samples Produced
//! - `copp`
//!   - gauges: PeakRate, BurstRate
//!   - counters: GreenPackets, RedPackets
//!   - Tags: Protocol, Hostname, mgmtip, mgmtipv6

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::CoppObject;
use crate::snaproute::Transport;
use tracing::debug;

pub const DOMAIN: Domain = Domain {
    name: "copp",
    path: "state/coppstate",
    policy: FailurePolicy::AnnounceNotReady,
};

type Spec = FieldSpec<CoppObject>;

pub const FIELDS: &[Spec] = &[
    Spec::gauge("PeakRate", |c| c.peak_rate.into()),
    Spec::gauge("BurstRate", |c| c.burst_rate.into()),
    Spec::counter("GreenPackets", |c| c.green_packets.into()),
    Spec::counter("RedPackets", |c| c.red_packets.into()),
];

pub async fn collect_copp_metrics<T: Transport>(ctx: &CollectionContext<'_, T>) -> Result<()> {
    let policers = ctx.fetch_list::<CoppObject>(&DOMAIN).await?;
    for policer in &policers {
        let tags = ctx.entry_tags("Protocol", policer.object.protocol.clone());
        ctx.emit("copp", FIELDS, &policer.object, &tags);
    }
    debug!("Updated CoPP metrics for {} protocols", policers.len());
    Ok(())
}

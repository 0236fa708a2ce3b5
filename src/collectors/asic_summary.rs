//! ASIC Summary Collector
//!
//! # Samples Produced
//! - `asicsum` (counter) - ModuleId, NumPortsUp, NumPortsDown, NumVlans,
//!   NumV4Intfs, NumV6Intfs, NumV4Adjs, NumV6Adjs, NumV4Routes, NumV6Routes,
//!   NumECMPRoutes
//!   - Tags: hostname

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::{AsicSummary, AsicSummaryObject};
use crate::snaproute::Transport;

pub const DOMAIN: Domain = Domain {
    name: "asicsummary",
    path: "state/asicsummary",
    policy: FailurePolicy::Silent,
};

type Spec = FieldSpec<AsicSummaryObject>;

pub const FIELDS: &[Spec] = &[
    Spec::counter("ModuleId", |a| a.module_id.into()),
    Spec::counter("NumPortsUp", |a| a.num_ports_up.into()),
    Spec::counter("NumPortsDown", |a| a.num_ports_down.into()),
    Spec::counter("NumVlans", |a| a.num_vlans.into()),
    Spec::counter("NumV4Intfs", |a| a.num_v4_intfs.into()),
    Spec::counter("NumV6Intfs", |a| a.num_v6_intfs.into()),
    Spec::counter("NumV4Adjs", |a| a.num_v4_adjs.into()),
    Spec::counter("NumV6Adjs", |a| a.num_v6_adjs.into()),
    Spec::counter("NumV4Routes", |a| a.num_v4_routes.into()),
    Spec::counter("NumV6Routes", |a| a.num_v6_routes.into()),
    Spec::counter("NumECMPRoutes", |a| a.num_ecmp_routes.into()),
];

pub async fn collect_asic_summary_metrics<T: Transport>(
    ctx: &CollectionContext<'_, T>,
) -> Result<()> {
    let summary: AsicSummary = ctx.fetch(&DOMAIN).await?;
    ctx.emit("asicsum", FIELDS, &summary.object, &ctx.host_tags());
    Ok(())
}

//! Route Statistics Collector
//!
//! # Samples Produced
//! - `routestats` (counter) - TotalRouteCount, ECMPRouteCount, IPv4RouteCount,
//!   IPv6RouteCount
//!   - Tags: hostname

use super::{CollectionContext, Domain, FailurePolicy, FieldSpec};
use crate::error::Result;
use crate::snaproute::types::{RouteStats, RouteStatsObject};
use crate::snaproute::Transport;

pub const DOMAIN: Domain = Domain {
    name: "routestat",
    path: "state/routestat",
    policy: FailurePolicy::Silent,
};

type Spec = FieldSpec<RouteStatsObject>;

pub const FIELDS: &[Spec] = &[
    Spec::counter("TotalRouteCount", |r| r.total_route_count.into()),
    Spec::counter("ECMPRouteCount", |r| r.ecmp_route_count.into()),
    Spec::counter("IPv4RouteCount", |r| r.v4_route_count.into()),
    Spec::counter("IPv6RouteCount", |r| r.v6_route_count.into()),
];

pub async fn collect_route_stats_metrics<T: Transport>(
    ctx: &CollectionContext<'_, T>,
) -> Result<()> {
    let stats: RouteStats = ctx.fetch(&DOMAIN).await?;
    ctx.emit("routestats", FIELDS, &stats.object, &ctx.host_tags());
    Ok(())
}
